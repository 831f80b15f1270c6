//! Fixed-point quaternion for composing and applying rotations.
//!
//! Fixed-point multiplication truncates, so it is neither associative nor
//! distributive. The Hamilton product and the rotation formula below are
//! evaluated in one fixed grouping; changing the order of operations changes
//! the low bits and breaks parity with peers running the same code.

use std::ops::Mul;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::InvSqrtConfig;
use crate::error::Result;
use crate::scalar::FixedScalar;
use crate::vector::Vector3;

/// Quaternion with scalar part `w` and vector part `v`.
///
/// Represents a rotation only when unit-length. Normalization is not
/// enforced: repeated multiplication drifts, and callers renormalize with
/// [`Quaternion::normalize`] when it matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Quaternion<const F: u32> {
    /// Scalar part.
    pub w: FixedScalar<F>,
    /// Vector part.
    pub v: Vector3<F>,
}

/// Quaternion of [`Q16`](crate::scalar::Q16) components.
pub type QuatQ16 = Quaternion<16>;

/// Quaternion of [`Q6`](crate::scalar::Q6) components.
pub type QuatQ6 = Quaternion<6>;

impl<const F: u32> Quaternion<F> {
    /// The identity rotation.
    pub const IDENTITY: Self = Self::new(FixedScalar::ONE, Vector3::ZERO);

    /// Create a quaternion from its scalar and vector parts.
    #[must_use]
    pub const fn new(w: FixedScalar<F>, v: Vector3<F>) -> Self {
        Self { w, v }
    }

    /// The identity rotation.
    #[must_use]
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Create a quaternion from `f32` components, truncating each toward zero.
    #[must_use]
    pub fn from_float(w: f32, x: f32, y: f32, z: f32) -> Self {
        Self::new(FixedScalar::from_float(w), Vector3::from_float(x, y, z))
    }

    /// Small-angle rotation increment `{ 1 - |v|² / 2, v }`.
    ///
    /// `v` is half the rotation angle times the unit axis. Accurate to second
    /// order for small angles, which is what per-tick angular velocity
    /// integration needs.
    #[must_use]
    pub const fn from_small_rotation(v: Vector3<F>) -> Self {
        let w = FixedScalar::ONE.sub(FixedScalar::HALF.mul(v.dot(v)));
        Self::new(w, v)
    }

    /// Scalar part.
    #[must_use]
    pub const fn w(self) -> FixedScalar<F> {
        self.w
    }

    /// Vector part.
    #[must_use]
    pub const fn v(self) -> Vector3<F> {
        self.v
    }

    /// X component of the vector part.
    #[must_use]
    pub const fn x(self) -> FixedScalar<F> {
        self.v.x
    }

    /// Y component of the vector part.
    #[must_use]
    pub const fn y(self) -> FixedScalar<F> {
        self.v.y
    }

    /// Z component of the vector part.
    #[must_use]
    pub const fn z(self) -> FixedScalar<F> {
        self.v.z
    }

    /// Hamilton product `self * other`: apply `other`, then `self`.
    ///
    /// Evaluated as `w = a.w·b.w - a.v·b.v` and
    /// `v = ((a.v × b.v) + b.v·a.w) + a.v·b.w`.
    #[must_use]
    pub const fn mul(self, other: Self) -> Self {
        let w = self.w.mul(other.w).sub(self.v.dot(other.v));
        let v = self
            .v
            .cross(other.v)
            .add(other.v.mul(self.w))
            .add(self.v.mul(other.w));
        Self::new(w, v)
    }

    /// Rotate `v` by this quaternion.
    ///
    /// Uses `v + 2w(q × v) + 2q × (q × v)` rather than the full
    /// `q v q*` sandwich. A non-unit quaternion rotates and scales.
    #[must_use]
    pub const fn rotate(self, v: Vector3<F>) -> Vector3<F> {
        let cross = self.v.cross(v);
        v.add(cross.mul(FixedScalar::TWO.mul(self.w)))
            .add(self.v.mul(FixedScalar::TWO).cross(cross))
    }

    /// Conjugate `{ w, -v }`, the inverse rotation for unit quaternions.
    #[must_use]
    pub const fn conjugate(self) -> Self {
        Self::new(self.w, self.v.neg())
    }

    /// Sum of the squares of all four components.
    #[must_use]
    pub const fn norm_squared(self) -> FixedScalar<F> {
        self.w.mul(self.w).add(self.v.dot(self.v))
    }

    /// Scale all four components by the inverse square root of the norm.
    ///
    /// Inverse square root returns exactly one for inputs `<= 1`, so only
    /// quaternions that have grown past unit length are shrunk. That is the
    /// direction small-angle composition drifts in.
    ///
    /// # Errors
    ///
    /// Propagates [`FixedError::NonPositiveInvSqrt`] for the zero quaternion.
    ///
    /// [`FixedError::NonPositiveInvSqrt`]: crate::error::FixedError::NonPositiveInvSqrt
    pub fn normalize(self, config: &InvSqrtConfig) -> Result<Self> {
        let inv_len = self.norm_squared().inv_sqrt(config)?;
        Ok(Self::new(self.w.mul(inv_len), self.v.mul(inv_len)))
    }
}

impl<const F: u32> Default for Quaternion<F> {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl<const F: u32> Mul for Quaternion<F> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Quaternion::mul(self, rhs)
    }
}

impl<const F: u32> Mul<Vector3<F>> for Quaternion<F> {
    type Output = Vector3<F>;

    fn mul(self, rhs: Vector3<F>) -> Self::Output {
        self.rotate(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FixedError;
    use crate::scalar::Q16;
    use crate::vector::Vec3Q16;

    #[test]
    fn test_identity_accessors() {
        let q = QuatQ16::identity();
        assert_eq!(q.w(), Q16::ONE);
        assert_eq!(q.x(), Q16::ZERO);
        assert_eq!(q.y(), Q16::ZERO);
        assert_eq!(q.z(), Q16::ZERO);
        assert_eq!(QuatQ16::default(), q);
    }

    #[test]
    fn test_identity_rotation_is_noop() {
        let v = Vec3Q16::from_float(0.0, 0.832, 0.554);
        assert_eq!(QuatQ16::identity().rotate(v), v);
    }

    #[test]
    fn test_quarter_turn_about_z() {
        // cos(45°) = sin(45°) ≈ 0.70710678
        let q = QuatQ16::from_float(0.707_106_8, 0.0, 0.0, 0.707_106_8);
        let [x, y, z] = (q * Vec3Q16::UNIT_X).to_float();
        assert!(x.abs() < 0.001, "x = {x}");
        assert!((y - 1.0).abs() < 0.001, "y = {y}");
        assert!(z.abs() < 0.001, "z = {z}");
    }

    #[test]
    fn test_mul_is_not_commutative() {
        let a = QuatQ16::from_float(0.707_106_8, 0.707_106_8, 0.0, 0.0);
        let b = QuatQ16::from_float(0.707_106_8, 0.0, 0.707_106_8, 0.0);
        assert_ne!(a * b, b * a);
    }

    #[test]
    fn test_conjugate_undoes_rotation() {
        let q = QuatQ16::from_float(0.707_106_8, 0.0, 0.707_106_8, 0.0);
        let product = q.mul(q.conjugate());
        assert!((product.w.to_float() - 1.0).abs() < 0.001);
        assert!(product.v.x.to_float().abs() < 0.001);
        assert!(product.v.y.to_float().abs() < 0.001);
        assert!(product.v.z.to_float().abs() < 0.001);
    }

    #[test]
    fn test_small_rotation_increment() {
        let inc = QuatQ16::from_small_rotation(Vec3Q16::from_float(0.07, 0.0, 0.0));
        let expected_w = 1.0 - 0.5 * 0.07 * 0.07;
        assert!((inc.w.to_float() - expected_w).abs() < 0.0001);
        assert_eq!(inc.x(), Q16::from_float(0.07));
    }

    #[test]
    fn test_normalize_shrinks_grown_quaternion() {
        let config = InvSqrtConfig::default();
        let grown = QuatQ16::from_float(1.2, 0.0, 0.9, 0.0);
        let n = grown.normalize(&config).unwrap();
        assert!((n.norm_squared().to_float() - 1.0).abs() < 0.002);
        assert_eq!(
            QuatQ16::new(Q16::ZERO, Vec3Q16::ZERO).normalize(&config),
            Err(FixedError::NonPositiveInvSqrt { raw: 0 })
        );
    }
}
