//! Fixed-point 3D vector.

use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::InvSqrtConfig;
use crate::error::Result;
use crate::scalar::FixedScalar;

/// Three independent fixed-point components.
///
/// Every operation is a componentwise application of [`FixedScalar`]
/// arithmetic and inherits its wrapping overflow behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vector3<const F: u32> {
    /// X component.
    pub x: FixedScalar<F>,
    /// Y component.
    pub y: FixedScalar<F>,
    /// Z component.
    pub z: FixedScalar<F>,
}

/// Vector of [`Q16`](crate::scalar::Q16) components.
pub type Vec3Q16 = Vector3<16>;

/// Vector of [`Q6`](crate::scalar::Q6) components.
pub type Vec3Q6 = Vector3<6>;

impl<const F: u32> Vector3<F> {
    /// Zero vector.
    pub const ZERO: Self = Self::new(FixedScalar::ZERO, FixedScalar::ZERO, FixedScalar::ZERO);

    /// Unit vector along +X.
    pub const UNIT_X: Self = Self::new(FixedScalar::ONE, FixedScalar::ZERO, FixedScalar::ZERO);

    /// Unit vector along +Y.
    pub const UNIT_Y: Self = Self::new(FixedScalar::ZERO, FixedScalar::ONE, FixedScalar::ZERO);

    /// Unit vector along +Z.
    pub const UNIT_Z: Self = Self::new(FixedScalar::ZERO, FixedScalar::ZERO, FixedScalar::ONE);

    /// Create a vector from components.
    #[must_use]
    pub const fn new(x: FixedScalar<F>, y: FixedScalar<F>, z: FixedScalar<F>) -> Self {
        Self { x, y, z }
    }

    /// Create a vector from `f32` components, truncating each toward zero.
    #[must_use]
    pub fn from_float(x: f32, y: f32, z: f32) -> Self {
        Self::new(
            FixedScalar::from_float(x),
            FixedScalar::from_float(y),
            FixedScalar::from_float(z),
        )
    }

    /// Components as `f32`.
    #[must_use]
    pub fn to_float(self) -> [f32; 3] {
        [self.x.to_float(), self.y.to_float(), self.z.to_float()]
    }

    /// Componentwise sum.
    #[must_use]
    pub const fn add(self, other: Self) -> Self {
        Self::new(self.x.add(other.x), self.y.add(other.y), self.z.add(other.z))
    }

    /// Componentwise difference.
    #[must_use]
    pub const fn sub(self, other: Self) -> Self {
        Self::new(self.x.sub(other.x), self.y.sub(other.y), self.z.sub(other.z))
    }

    /// Componentwise negation.
    #[must_use]
    pub const fn neg(self) -> Self {
        Self::new(self.x.neg(), self.y.neg(), self.z.neg())
    }

    /// Uniform scale by `c`.
    #[must_use]
    pub const fn mul(self, c: FixedScalar<F>) -> Self {
        Self::new(self.x.mul(c), self.y.mul(c), self.z.mul(c))
    }

    /// Dot product, accumulated left to right in `FixedScalar` arithmetic
    /// (each product is truncated before the sum, no extra widening).
    #[must_use]
    pub const fn dot(self, other: Self) -> FixedScalar<F> {
        self.x
            .mul(other.x)
            .add(self.y.mul(other.y))
            .add(self.z.mul(other.z))
    }

    /// Cross product.
    #[must_use]
    pub const fn cross(self, other: Self) -> Self {
        Self::new(
            self.y.mul(other.z).sub(self.z.mul(other.y)),
            self.z.mul(other.x).sub(self.x.mul(other.z)),
            self.x.mul(other.y).sub(self.y.mul(other.x)),
        )
    }

    /// Squared length, `self.dot(self)`.
    #[must_use]
    pub const fn length_squared(self) -> FixedScalar<F> {
        self.dot(self)
    }

    /// Scale by the inverse square root of `x² + y²`.
    ///
    /// The magnitude deliberately ignores Z: this is long-standing behavior
    /// that callers in the XY plane rely on, so a vector with a Z component
    /// does not come out unit-length. Inverse square root also returns
    /// exactly one for magnitudes `<= 1`, leaving such vectors unchanged.
    ///
    /// # Errors
    ///
    /// Propagates [`FixedError::NonPositiveInvSqrt`] when `x² + y²` is zero,
    /// which includes the zero vector.
    ///
    /// [`FixedError::NonPositiveInvSqrt`]: crate::error::FixedError::NonPositiveInvSqrt
    pub fn normalize(self, config: &InvSqrtConfig) -> Result<Self> {
        let planar_sq = self.x.mul(self.x).add(self.y.mul(self.y));
        let inv_len = planar_sq.inv_sqrt(config)?;
        Ok(self.mul(inv_len))
    }
}

impl<const F: u32> Add for Vector3<F> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Vector3::add(self, rhs)
    }
}

impl<const F: u32> Sub for Vector3<F> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Vector3::sub(self, rhs)
    }
}

impl<const F: u32> Neg for Vector3<F> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Vector3::neg(self)
    }
}

impl<const F: u32> Mul<FixedScalar<F>> for Vector3<F> {
    type Output = Self;

    fn mul(self, rhs: FixedScalar<F>) -> Self::Output {
        Vector3::mul(self, rhs)
    }
}

impl<const F: u32> AddAssign for Vector3<F> {
    fn add_assign(&mut self, rhs: Self) {
        *self = Vector3::add(*self, rhs);
    }
}

impl<const F: u32> SubAssign for Vector3<F> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = Vector3::sub(*self, rhs);
    }
}

impl<const F: u32> From<[FixedScalar<F>; 3]> for Vector3<F> {
    fn from([x, y, z]: [FixedScalar<F>; 3]) -> Self {
        Self::new(x, y, z)
    }
}
