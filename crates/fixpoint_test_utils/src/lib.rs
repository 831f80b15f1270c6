//! # Fixpoint Test Utilities
//!
//! Shared testing utilities for the workspace:
//! - Floating-point reference model (glam) for tolerance comparisons
//! - Determinism test harness
//! - Fixture builders and a rotation workload
//! - Property-based testing strategies

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod determinism;
pub mod fixtures;
pub mod reference;

/// Re-export proptest for convenience.
pub use proptest;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install a test-friendly tracing subscriber once per process.
///
/// Honors `RUST_LOG` (e.g. `RUST_LOG=fixpoint_core=trace`). Later calls are
/// no-ops, so every test may call it.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
