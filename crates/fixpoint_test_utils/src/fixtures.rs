//! Test fixtures and helpers.
//!
//! Shorthand constructors plus a small rotation workload that exercises
//! scalar, vector and quaternion arithmetic together, the way a simulation
//! tick would.

use std::hash::{Hash, Hasher};

use fixpoint_core::{InvSqrtConfig, QuatQ16, Vec3Q16, Q16};

/// Create a Q16 number from an integer.
#[must_use]
pub fn q16(n: i32) -> Q16 {
    Q16::from_int(n)
}

/// Create a Q16 number from a float (for tests only).
///
/// Note: In real simulation code, never use floats.
/// This is only for convenient test setup.
#[must_use]
pub fn q16_f(n: f32) -> Q16 {
    Q16::from_float(n)
}

/// Create a Q16 vector from floats (for tests only).
#[must_use]
pub fn vec3_f(x: f32, y: f32, z: f32) -> Vec3Q16 {
    Vec3Q16::from_float(x, y, z)
}

/// Spinning body: an orientation integrated from a constant angular
/// increment, carrying a body-space point into world space every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RotationWorkload {
    /// Accumulated orientation.
    pub orientation: QuatQ16,
    /// Per-tick rotation increment.
    pub increment: QuatQ16,
    /// Body-space point.
    pub local_point: Vec3Q16,
    /// Latest world-space position of `local_point`.
    pub world_point: Vec3Q16,
    /// Renormalize the orientation every this many ticks (0 = never).
    pub renormalize_every: u64,
    /// Ticks advanced so far.
    pub tick: u64,
}

impl RotationWorkload {
    /// Start at identity with the given per-tick angular increment.
    #[must_use]
    pub fn new(increment: Vec3Q16, local_point: Vec3Q16) -> Self {
        Self {
            orientation: QuatQ16::identity(),
            increment: QuatQ16::from_small_rotation(increment),
            local_point,
            world_point: local_point,
            renormalize_every: 0,
            tick: 0,
        }
    }

    /// The canonical scenario: a slow spin about X applied to a point
    /// tilted out of the XY plane.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(vec3_f(0.07, 0.0, 0.0), vec3_f(0.0, 0.832, 0.554))
    }

    /// Renormalize every `ticks` ticks.
    #[must_use]
    pub fn with_renormalization(mut self, ticks: u64) -> Self {
        self.renormalize_every = ticks;
        self
    }

    /// Advance one tick.
    pub fn step(&mut self, config: &InvSqrtConfig) {
        self.tick += 1;
        self.orientation = self.orientation.mul(self.increment);
        if self.renormalize_every != 0 && self.tick % self.renormalize_every == 0 {
            if let Ok(normalized) = self.orientation.normalize(config) {
                self.orientation = normalized;
            }
        }
        self.world_point = self.orientation.rotate(self.local_point);
    }

    /// Hash of every raw bit of state.
    #[must_use]
    pub fn state_hash(&self) -> u64 {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helpers() {
        assert_eq!(q16(3), Q16::from_int(3));
        assert_eq!(q16_f(0.5), Q16::HALF);
        assert_eq!(vec3_f(1.0, 0.0, 0.0), Vec3Q16::UNIT_X);
    }

    #[test]
    fn test_workload_advances() {
        let config = InvSqrtConfig::default();
        let mut workload = RotationWorkload::standard();
        let before = workload.state_hash();
        workload.step(&config);
        assert_eq!(workload.tick, 1);
        assert_ne!(workload.state_hash(), before);
        assert_ne!(workload.world_point, workload.local_point);
    }
}
