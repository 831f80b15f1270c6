//! Serde interop: values serialize as raw bits so they survive exactly.
//!
//! Run with: `cargo test -p fixpoint_core --features serde`

#![cfg(feature = "serde")]

use fixpoint_core::{InvSqrtConfig, QuatQ16, Vec3Q16, Q16};

#[test]
fn test_scalar_serializes_as_raw_bits() {
    let q = Q16::from_float(1.5);
    assert_eq!(serde_json::to_string(&q).unwrap(), "98304");
    let back: Q16 = serde_json::from_str("98304").unwrap();
    assert_eq!(back, q);
}

#[test]
fn test_quaternion_roundtrip_is_exact() {
    let q = QuatQ16::from_small_rotation(Vec3Q16::from_float(0.07, -0.01, 0.003));
    let json = serde_json::to_string(&q).unwrap();
    let back: QuatQ16 = serde_json::from_str(&json).unwrap();
    assert_eq!(back, q);
}

#[test]
fn test_config_roundtrip() {
    let config = InvSqrtConfig::new(6);
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(json, r#"{"iterations":6}"#);
    let back: InvSqrtConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}
