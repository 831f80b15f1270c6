//! Vector and quaternion tests against the `f32` reference model.

use approx::assert_abs_diff_eq;
use fixpoint_core::{InvSqrtConfig, QuatQ16, QuatQ6, Vec3Q16, Vec3Q6, Q16};
use fixpoint_test_utils::determinism::strategies::*;
use fixpoint_test_utils::fixtures::{vec3_f, RotationWorkload};
use fixpoint_test_utils::reference::{rotation_trajectory, to_glam_quat, to_glam_vec3};
use glam::{Quat, Vec3};
use proptest::prelude::*;

// =============================================================================
// Composition stability
// =============================================================================

#[test]
fn test_composed_rotation_tracks_reference() {
    let steps = rotation_trajectory::<16>([0.07, 0.0, 0.0], [0.0, 0.832, 0.554], 10);
    assert_eq!(steps.len(), 10);
    for step in steps {
        assert!(
            step.max_error < 0.001,
            "difference too big at step {}:\nfixed: {:?}\nreference: {:?}",
            step.step,
            step.fixed,
            step.reference
        );
    }
}

#[test]
fn test_composed_oblique_rotation_tracks_reference() {
    let steps = rotation_trajectory::<16>([0.03, -0.04, 0.05], [1.0, 0.0, 0.0], 10);
    for step in steps {
        assert!(step.max_error < 0.001, "step {}: {}", step.step, step.max_error);
    }
}

#[test]
fn test_composed_rotation_golden_bits() {
    // Pins the evaluation order of mul and rotate: any regrouping changes
    // these raw values.
    let config = InvSqrtConfig::default();
    let mut workload = RotationWorkload::standard();
    for _ in 0..10 {
        workload.step(&config);
    }

    let q = workload.orientation;
    assert_eq!(
        [q.w().raw(), q.x().raw(), q.y().raw(), q.z().raw()],
        [50_112, 42_238, 0, 0]
    );
    let p = workload.world_point;
    assert_eq!([p.x.raw(), p.y.raw(), p.z.raw()], [0, -26_556, 59_885]);
}

#[test]
fn test_renormalization_bounds_drift() {
    let config = InvSqrtConfig::default();

    let mut drifting = RotationWorkload::standard();
    let mut corrected = RotationWorkload::standard().with_renormalization(8);
    let mut worst = 0.0_f32;
    for _ in 0..1000 {
        drifting.step(&config);
        corrected.step(&config);
        worst = worst.max((corrected.orientation.norm_squared().to_float() - 1.0).abs());
    }

    assert!(worst < 0.001, "renormalized drift {worst}");
    assert!(drifting.orientation.norm_squared().to_float() > 1.01);
}

// =============================================================================
// Quaternion laws
// =============================================================================

#[test]
fn test_identity_rotation_is_noop() {
    let v = Vec3Q16::from_float(0.0, 0.832, 0.554);
    assert_eq!(QuatQ16::identity().rotate(v), Vec3Q16::from_float(0.0, 0.832, 0.554));

    let v6 = Vec3Q6::from_float(0.0, 0.832, 0.554);
    assert_eq!(QuatQ6::identity().rotate(v6), v6);
}

#[test]
fn test_single_rotation_matches_glam() {
    let axis = Vec3::new(1.0, 2.0, -0.5).normalize();
    let reference = Quat::from_axis_angle(axis, 0.9);
    let q = QuatQ16::from_float(reference.w, reference.x, reference.y, reference.z);

    let v = vec3_f(0.3, -0.7, 0.2);
    let rotated = to_glam_vec3(q.rotate(v));
    let expected = to_glam_quat(q).mul_vec3(to_glam_vec3(v));
    assert_abs_diff_eq!(rotated.x, expected.x, epsilon = 0.001);
    assert_abs_diff_eq!(rotated.y, expected.y, epsilon = 0.001);
    assert_abs_diff_eq!(rotated.z, expected.z, epsilon = 0.001);
}

#[test]
fn test_product_matches_glam() {
    let a = Quat::from_axis_angle(Vec3::Y, 0.6);
    let b = Quat::from_axis_angle(Vec3::X, -1.1);
    let qa = QuatQ16::from_float(a.w, a.x, a.y, a.z);
    let qb = QuatQ16::from_float(b.w, b.x, b.y, b.z);

    let fixed = to_glam_quat(qa * qb);
    let expected = a * b;
    assert_abs_diff_eq!(fixed.w, expected.w, epsilon = 0.001);
    assert_abs_diff_eq!(fixed.x, expected.x, epsilon = 0.001);
    assert_abs_diff_eq!(fixed.y, expected.y, epsilon = 0.001);
    assert_abs_diff_eq!(fixed.z, expected.z, epsilon = 0.001);
}

#[test]
fn test_normalize_ignores_z_component() {
    let config = InvSqrtConfig::default();
    // |(0.6, 0.8)| is 1 already; Z stays as large as it was.
    let v = Vec3Q16::new(Q16::from_int(6), Q16::from_int(8), Q16::from_int(50));
    let n = to_glam_vec3(v.normalize(&config).unwrap());
    assert_abs_diff_eq!(n.x, 0.6, epsilon = 0.001);
    assert_abs_diff_eq!(n.y, 0.8, epsilon = 0.001);
    assert_abs_diff_eq!(n.z, 5.0, epsilon = 0.01);
    assert!(n.length() > 4.0, "Z does not contribute to the magnitude");
}

proptest! {
    #[test]
    fn prop_identity_is_exact_left_and_right(q in arb_quat_q16()) {
        let identity = QuatQ16::identity();
        prop_assert_eq!(identity.mul(q), q);
        prop_assert_eq!(q.mul(identity), q);
    }

    #[test]
    fn prop_identity_rotation_is_exact(v in arb_vec3_q16()) {
        prop_assert_eq!(QuatQ16::identity().rotate(v), v);
    }

    #[test]
    fn prop_cross_is_anticommutative(a in arb_vec3_q16(), b in arb_vec3_q16()) {
        prop_assert_eq!(a.cross(b), b.cross(a).neg());
    }

    #[test]
    fn prop_small_rotation_preserves_length(inc in arb_small_rotation(), v in arb_vec3_q16()) {
        let before = to_glam_vec3(v).length();
        let after = to_glam_vec3(inc.rotate(v)).length();
        // Near-unit increments scale by at most |q|², plus truncation.
        prop_assert!((after - before).abs() < 0.01 + before * 0.001, "{} -> {}", before, after);
    }
}
