//! # Fixpoint Core
//!
//! Deterministic fixed-point math for lockstep simulation.
//!
//! This crate contains **only** pure integer arithmetic:
//! - No floating point in any computation (floats appear only at the
//!   conversion boundary)
//! - No IO
//! - No global state
//!
//! This guarantees that every peer running the same operations on the same
//! inputs obtains bit-identical results, regardless of CPU or compiler.
//!
//! ## Crate Structure
//!
//! - [`scalar`] - [`FixedScalar`] generic over fractional bits ([`Q16`], [`Q6`])
//! - [`vector`] - [`Vector3`] built from scalar operations
//! - [`quaternion`] - [`Quaternion`] rotation composition and application
//! - [`config`] - [`InvSqrtConfig`] precision settings
//! - [`error`] - [`FixedError`]
//!
//! ## Overflow
//!
//! Arithmetic wraps like native `i32`. Keep Q16 values within `±32768` and Q6
//! values within `±2^25`, including intermediate products.
//!
//! ## Example
//!
//! ```
//! use fixpoint_core::prelude::*;
//!
//! let quarter = Q16::from_float(0.25);
//! assert_eq!(quarter * Q16::TWO, Q16::HALF);
//!
//! let v = Vec3Q16::from_float(0.0, 0.832, 0.554);
//! assert_eq!(QuatQ16::identity().rotate(v), v);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod config;
pub mod error;
pub mod quaternion;
pub mod scalar;
pub mod vector;

pub use config::InvSqrtConfig;
pub use error::{FixedError, Result};
pub use quaternion::{QuatQ16, QuatQ6, Quaternion};
pub use scalar::{FixedScalar, Q16, Q6};
pub use vector::{Vec3Q16, Vec3Q6, Vector3};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::InvSqrtConfig;
    pub use crate::error::{FixedError, Result};
    pub use crate::quaternion::{QuatQ16, QuatQ6, Quaternion};
    pub use crate::scalar::{FixedScalar, Q16, Q6};
    pub use crate::vector::{Vec3Q16, Vec3Q6, Vector3};
}
