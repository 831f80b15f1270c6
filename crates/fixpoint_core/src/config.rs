//! Precision settings for the integer inverse square root.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Newton-Raphson settings for [`FixedScalar::inv_sqrt`].
///
/// More iterations trade speed for accuracy. Every peer in a lockstep session
/// must use the same value, so pass one config around explicitly instead of
/// building it ad hoc at call sites.
///
/// [`FixedScalar::inv_sqrt`]: crate::scalar::FixedScalar::inv_sqrt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InvSqrtConfig {
    iterations: u32,
}

impl InvSqrtConfig {
    /// Iteration count that keeps Q16 error below 0.001 on `[1, 20]`.
    pub const DEFAULT_ITERATIONS: u32 = 4;

    /// Create a config running `iterations` refinement steps.
    ///
    /// Zero is allowed and yields the raw power-of-two initial estimate.
    #[must_use]
    pub fn new(iterations: u32) -> Self {
        tracing::debug!(iterations, "Inverse square root config");
        Self { iterations }
    }

    /// Number of Newton-Raphson refinement steps.
    #[must_use]
    pub const fn iterations(self) -> u32 {
        self.iterations
    }

    /// Copy of this config with a different iteration count.
    #[must_use]
    pub fn with_iterations(self, iterations: u32) -> Self {
        Self::new(iterations)
    }
}

impl Default for InvSqrtConfig {
    fn default() -> Self {
        Self {
            iterations: Self::DEFAULT_ITERATIONS,
        }
    }
}
