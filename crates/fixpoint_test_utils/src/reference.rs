//! Floating-point reference model.
//!
//! Fixed-point results are approximations of real arithmetic. These helpers
//! run the same computation through glam's `f32` types so tests can bound the
//! difference instead of asserting exact values.

use fixpoint_core::{Quaternion, Vector3};
use glam::{Quat, Vec3};

/// Convert a fixed-point vector to glam.
#[must_use]
pub fn to_glam_vec3<const F: u32>(v: Vector3<F>) -> Vec3 {
    Vec3::from_array(v.to_float())
}

/// Convert a fixed-point quaternion to glam, without normalizing.
#[must_use]
pub fn to_glam_quat<const F: u32>(q: Quaternion<F>) -> Quat {
    Quat::from_xyzw(
        q.x().to_float(),
        q.y().to_float(),
        q.z().to_float(),
        q.w().to_float(),
    )
}

/// Largest absolute per-component difference between `fixed` and `reference`.
#[must_use]
pub fn max_component_error<const F: u32>(fixed: Vector3<F>, reference: Vec3) -> f32 {
    (to_glam_vec3(fixed) - reference).abs().max_element()
}

/// Small-angle increment `{ 1 - |v|² / 2, v }` in `f32`.
#[must_use]
pub fn small_rotation(v: Vec3) -> Quat {
    Quat::from_xyzw(v.x, v.y, v.z, 1.0 - 0.5 * v.length_squared())
}

/// One step of a fixed-point vs reference rotation trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryStep {
    /// Number of increments composed so far (1-based).
    pub step: usize,
    /// Rotated vector computed in fixed point.
    pub fixed: Vec3,
    /// Rotated vector computed in `f32`.
    pub reference: Vec3,
    /// Largest per-component difference.
    pub max_error: f32,
}

/// Compose a small rotation increment `steps` times from identity in both
/// fixed point and `f32`, rotating `start` after every composition.
///
/// # Example
///
/// ```
/// use fixpoint_test_utils::reference::rotation_trajectory;
///
/// let steps = rotation_trajectory::<16>([0.07, 0.0, 0.0], [0.0, 0.832, 0.554], 10);
/// assert!(steps.iter().all(|s| s.max_error < 0.001));
/// ```
#[must_use]
pub fn rotation_trajectory<const F: u32>(
    increment: [f32; 3],
    start: [f32; 3],
    steps: usize,
) -> Vec<TrajectoryStep> {
    let inc_fixed = Quaternion::<F>::from_small_rotation(Vector3::from_float(
        increment[0],
        increment[1],
        increment[2],
    ));
    let inc_ref = small_rotation(Vec3::from_array(increment));

    let start_fixed = Vector3::<F>::from_float(start[0], start[1], start[2]);
    let start_ref = Vec3::from_array(start);

    let mut rotation_fixed = Quaternion::<F>::identity();
    let mut rotation_ref = Quat::IDENTITY;

    (1..=steps)
        .map(|step| {
            rotation_fixed = rotation_fixed.mul(inc_fixed);
            rotation_ref = rotation_ref * inc_ref;

            let fixed = rotation_fixed.rotate(start_fixed);
            let reference = rotation_ref.mul_vec3(start_ref);
            let max_error = max_component_error(fixed, reference);

            TrajectoryStep {
                step,
                fixed: to_glam_vec3(fixed),
                reference,
                max_error,
            }
        })
        .collect()
}
