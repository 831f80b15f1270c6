//! Determinism testing utilities.
//!
//! Provides a harness for verifying that fixed-point workloads produce
//! identical raw bits given identical inputs.
//!
//! # Testing Strategy
//!
//! Lockstep peers must agree on every bit. Sources of non-determinism this
//! crate guards against include:
//!
//! - **Floating-point math**: Different CPUs and compilers round differently.
//!   All arithmetic goes through [`fixpoint_core::FixedScalar`] integers.
//!
//! - **Operation order**: Fixed-point multiplication truncates, so
//!   regrouping an expression changes its low bits. Golden raw values pin
//!   the grouping.
//!
//! - **Hidden shared state**: Precision settings travel in
//!   [`fixpoint_core::InvSqrtConfig`] rather than globals, so parallel
//!   workloads cannot interfere.
//!
//! # Test Levels
//!
//! 1. **Unit tests**: Individual operations match golden raw values
//! 2. **Property tests**: Random inputs still produce reproducible outputs
//! 3. **Workload tests**: Multi-tick rotation scenarios are reproducible
//! 4. **Parallel tests**: Running N workloads on N threads all match

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::thread;

use fixpoint_core::InvSqrtConfig;

use crate::fixtures::RotationWorkload;

/// Result of a determinism test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeterminismResult {
    /// Whether all runs produced identical results.
    pub is_deterministic: bool,
    /// Hashes from each run.
    pub hashes: Vec<u64>,
    /// Number of ticks simulated.
    pub ticks: u64,
}

impl DeterminismResult {
    /// Get all unique hashes (should be 1 for a deterministic workload).
    #[must_use]
    pub fn unique_hashes(&self) -> Vec<u64> {
        let mut unique: Vec<u64> = self.hashes.clone();
        unique.sort_unstable();
        unique.dedup();
        unique
    }

    /// Assert that the workload was deterministic, with a detailed error message.
    ///
    /// # Panics
    ///
    /// Panics if the workload produced different hashes across runs.
    pub fn assert_deterministic(&self) {
        if !self.is_deterministic {
            let unique = self.unique_hashes();
            panic!(
                "Workload is non-deterministic!\n\
                 Runs: {}\n\
                 Ticks: {}\n\
                 Unique hashes: {} (expected 1)\n\
                 All hashes: {:?}",
                self.hashes.len(),
                self.ticks,
                unique.len(),
                self.hashes
            );
        }
    }
}

/// Result of parallel workload runs.
#[derive(Debug, Clone)]
pub struct ParallelRunResult {
    /// Final state hash from each workload.
    pub hashes: Vec<u64>,
    /// Number of ticks each workload ran.
    pub ticks: u64,
    /// Number of workloads run.
    pub num_runs: usize,
}

impl ParallelRunResult {
    /// Check if all workloads produced identical results.
    #[must_use]
    pub fn is_deterministic(&self) -> bool {
        self.hashes.windows(2).all(|w| w[0] == w[1])
    }

    /// Assert all workloads matched.
    ///
    /// # Panics
    ///
    /// Panics if workloads produced different hashes.
    pub fn assert_deterministic(&self) {
        if !self.is_deterministic() {
            let mut unique: Vec<u64> = self.hashes.clone();
            unique.sort_unstable();
            unique.dedup();
            panic!(
                "Parallel workloads diverged!\n\
                 Runs: {}\n\
                 Ticks: {}\n\
                 Unique hashes: {}\n\
                 All hashes: {:?}",
                self.num_runs,
                self.ticks,
                unique.len(),
                self.hashes
            );
        }
    }
}

/// Run a workload multiple times and verify determinism.
///
/// # Arguments
///
/// * `runs` - Number of times to run the workload
/// * `ticks` - Number of ticks to advance per run
/// * `setup` - Function to create initial state
/// * `step` - Function to advance state by one tick
/// * `hash` - Function to compute state hash
///
/// # Example
///
/// ```
/// use fixpoint_core::InvSqrtConfig;
/// use fixpoint_test_utils::determinism::verify_determinism;
/// use fixpoint_test_utils::fixtures::RotationWorkload;
///
/// let config = InvSqrtConfig::default();
/// let result = verify_determinism(
///     5,   // Run 5 times
///     100, // 100 ticks each
///     RotationWorkload::standard,
///     |w| w.step(&config),
///     RotationWorkload::state_hash,
/// );
/// result.assert_deterministic();
/// ```
pub fn verify_determinism<S, Setup, Step, HashFn>(
    runs: usize,
    ticks: u64,
    setup: Setup,
    step: Step,
    hash: HashFn,
) -> DeterminismResult
where
    Setup: Fn() -> S,
    Step: Fn(&mut S),
    HashFn: Fn(&S) -> u64,
{
    let mut hashes = Vec::with_capacity(runs);

    for _ in 0..runs {
        let mut state = setup();

        for _ in 0..ticks {
            step(&mut state);
        }

        hashes.push(hash(&state));
    }

    let is_deterministic = hashes.windows(2).all(|w| w[0] == w[1]);
    tracing::debug!(runs, ticks, is_deterministic, "Determinism check finished");

    DeterminismResult {
        is_deterministic,
        hashes,
        ticks,
    }
}

/// Simplified determinism verification for [`RotationWorkload`].
///
/// Runs the workload twice with identical setup and verifies the final
/// state hashes match exactly.
pub fn verify_workload_determinism<F>(setup_fn: F, num_ticks: u64, config: &InvSqrtConfig) -> bool
where
    F: Fn() -> RotationWorkload,
{
    let result = verify_determinism(
        2,
        num_ticks,
        &setup_fn,
        |w| w.step(config),
        RotationWorkload::state_hash,
    );
    result.is_deterministic
}

/// Run N workloads on scoped threads and collect final hashes.
///
/// Catches anything that depends on thread scheduling or shared state.
pub fn run_parallel_workloads<F>(
    setup_fn: F,
    num_runs: usize,
    num_ticks: u64,
    config: &InvSqrtConfig,
) -> ParallelRunResult
where
    F: Fn() -> RotationWorkload + Sync,
{
    let hashes = thread::scope(|s| {
        let handles: Vec<_> = (0..num_runs)
            .map(|_| {
                s.spawn(|| {
                    let mut workload = setup_fn();
                    for _ in 0..num_ticks {
                        workload.step(config);
                    }
                    workload.state_hash()
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|h| h.join().expect("workload thread panicked"))
            .collect()
    });

    ParallelRunResult {
        hashes,
        ticks: num_ticks,
        num_runs,
    }
}

/// Compare two workload runs tick-by-tick, finding first divergence.
///
/// # Returns
///
/// `None` if runs are deterministic, `Some(tick)` if they diverge at that
/// tick.
pub fn find_first_divergence<F>(setup_fn: F, num_ticks: u64, config: &InvSqrtConfig) -> Option<u64>
where
    F: Fn() -> RotationWorkload,
{
    let mut a = setup_fn();
    let mut b = setup_fn();

    if a.state_hash() != b.state_hash() {
        return Some(0);
    }

    for tick in 1..=num_ticks {
        a.step(config);
        b.step(config);

        if a.state_hash() != b.state_hash() {
            return Some(tick);
        }
    }

    None
}

/// Compute a simple hash for any hashable value.
pub fn compute_hash<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Proptest strategies for fixed-point values.
///
/// Ranges keep products inside the Q16 range so properties are not
/// dominated by intentional wraparound.
pub mod strategies {
    use fixpoint_core::{QuatQ16, Vec3Q16, Q16};
    use proptest::prelude::*;

    /// Any raw Q16 value.
    pub fn arb_q16_raw() -> impl Strategy<Value = Q16> {
        any::<i32>().prop_map(Q16::from_raw)
    }

    /// Q16 value in `[lo, hi)` whole units, at full fractional precision.
    pub fn arb_q16_in(lo: i32, hi: i32) -> impl Strategy<Value = Q16> {
        ((lo << 16)..(hi << 16)).prop_map(Q16::from_raw)
    }

    /// Q16 value in `[-100, 100)` (squares stay in range).
    pub fn arb_q16_small() -> impl Strategy<Value = Q16> {
        arb_q16_in(-100, 100)
    }

    /// Non-zero Q16 value whose magnitude is at least one.
    pub fn arb_q16_nonzero() -> impl Strategy<Value = Q16> {
        prop_oneof![arb_q16_in(1, 100), arb_q16_in(-100, -1)]
    }

    /// Strictly positive Q16 value in `[1, 20)`.
    pub fn arb_q16_inv_sqrt_domain() -> impl Strategy<Value = Q16> {
        arb_q16_in(1, 20)
    }

    /// Integer multiplier for scaling properties.
    pub fn arb_small_int() -> impl Strategy<Value = i32> {
        -50i32..50i32
    }

    /// Vector with components in `[-10, 10)`.
    pub fn arb_vec3_q16() -> impl Strategy<Value = Vec3Q16> {
        (arb_q16_in(-10, 10), arb_q16_in(-10, 10), arb_q16_in(-10, 10))
            .prop_map(|(x, y, z)| Vec3Q16::new(x, y, z))
    }

    /// Quaternion with components in `[-2, 2)`.
    pub fn arb_quat_q16() -> impl Strategy<Value = QuatQ16> {
        (arb_q16_in(-2, 2), arb_q16_in(-2, 2), arb_q16_in(-2, 2), arb_q16_in(-2, 2))
            .prop_map(|(w, x, y, z)| QuatQ16::new(w, Vec3Q16::new(x, y, z)))
    }

    /// Small-angle increment with per-axis half-angles below `0.1`.
    pub fn arb_small_rotation() -> impl Strategy<Value = QuatQ16> {
        let half_angle = -6553i32..6553i32;
        (half_angle.clone(), half_angle.clone(), half_angle).prop_map(|(x, y, z)| {
            QuatQ16::from_small_rotation(Vec3Q16::new(
                Q16::from_raw(x),
                Q16::from_raw(y),
                Q16::from_raw(z),
            ))
        })
    }
}
