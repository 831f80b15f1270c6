//! Error types for fixed-point arithmetic.
//!
//! The taxonomy is deliberately narrow. Overflow is *not* an error: every
//! operation wraps in two's complement exactly like native `i32` arithmetic,
//! and keeping values within `|value| < 2^(31 - FRAC_BITS)` is the caller's
//! responsibility.

use thiserror::Error;

/// Result type alias using [`FixedError`].
pub type Result<T> = std::result::Result<T, FixedError>;

/// Errors raised by fixed-point operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FixedError {
    /// Division (or re-scaling) by a zero raw divisor.
    #[error("Division by zero")]
    DivisionByZero,

    /// Inverse square root of a value that is not strictly positive.
    #[error("Inverse square root requires a positive value, got raw {raw}")]
    NonPositiveInvSqrt {
        /// Raw bits of the rejected input.
        raw: i32,
    },
}
