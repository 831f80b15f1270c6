//! Fixed-point scalar generic over the number of fractional bits.
//!
//! A [`FixedScalar<F>`] stores `value * 2^F` in an `i32`. All arithmetic is
//! integer arithmetic, so results are bit-identical on every platform.
//!
//! # Overflow
//!
//! Results outside `|value| < 2^(31 - F)` wrap around exactly like native
//! `i32` arithmetic. Nothing saturates and nothing reports an error; keeping
//! values in range is the caller's job. Multiplication and division widen to
//! `i64` internally, so only the final narrowing can wrap.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use fixed::types::{I16F16, I26F6};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::InvSqrtConfig;
use crate::error::{FixedError, Result};

/// Fixed-point number with `F` fractional bits in an `i32`.
///
/// `F` must lie in `1..=29` so that [`HALF`](Self::HALF), [`ONE`](Self::ONE)
/// and [`TWO`](Self::TWO) are representable; other widths fail to compile as
/// soon as one of those constants is used.
///
/// With the `serde` feature the value serializes as its raw bits, so exact
/// values survive any format.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct FixedScalar<const F: u32> {
    raw: i32,
}

/// Q15.16: 16 fractional bits. The primary simulation type.
pub type Q16 = FixedScalar<16>;

/// Q25.6: 6 fractional bits, for quantities that need range over precision.
pub type Q6 = FixedScalar<6>;

impl<const F: u32> FixedScalar<F> {
    /// Number of fractional bits.
    pub const FRAC_BITS: u32 = F;

    /// `0`.
    pub const ZERO: Self = Self::from_raw(0);

    /// Smallest positive value, `2^-F`.
    pub const EPSILON: Self = Self::from_raw(1);

    /// `0.5`.
    pub const HALF: Self = Self::from_raw(1 << (F - 1));

    /// `1`.
    pub const ONE: Self = Self::from_raw(1 << F);

    /// `2`.
    pub const TWO: Self = Self::from_raw(1 << (F + 1));

    /// Largest representable value.
    pub const MAX: Self = Self::from_raw(i32::MAX);

    /// Smallest (most negative) representable value.
    pub const MIN: Self = Self::from_raw(i32::MIN);

    /// `1.5` in raw form, the Newton-Raphson constant for inverse square root.
    const THREE_HALVES_RAW: i64 = 3 << (F - 1);

    const SCALE_F32: f32 = (1_i64 << F) as f32;
    const SCALE_F64: f64 = (1_i64 << F) as f64;

    /// Wrap raw scaled bits.
    #[must_use]
    pub const fn from_raw(raw: i32) -> Self {
        Self { raw }
    }

    /// Raw scaled bits.
    #[must_use]
    pub const fn raw(self) -> i32 {
        self.raw
    }

    /// Convert an `f32`, truncating toward zero.
    ///
    /// Lossy for fractions that are not multiples of `2^-F`. Out-of-range
    /// inputs saturate to [`MIN`](Self::MIN)/[`MAX`](Self::MAX) and NaN maps
    /// to zero (Rust float-to-int cast semantics).
    #[must_use]
    pub fn from_float(x: f32) -> Self {
        Self::from_raw((x * Self::SCALE_F32) as i32)
    }

    /// Convert an `f64`, truncating toward zero. Same edge cases as
    /// [`from_float`](Self::from_float).
    #[must_use]
    pub fn from_f64(x: f64) -> Self {
        Self::from_raw((x * Self::SCALE_F64) as i32)
    }

    /// Integer with an empty fractional part. High bits of `n` that do not
    /// fit are discarded.
    #[must_use]
    pub const fn from_int(n: i32) -> Self {
        Self::from_raw(n << F)
    }

    /// Value as `f32`. Inverse of [`from_float`](Self::from_float).
    #[must_use]
    pub fn to_float(self) -> f32 {
        self.raw as f32 / Self::SCALE_F32
    }

    /// Value as `f64`; exact for every raw value.
    #[must_use]
    pub fn to_f64(self) -> f64 {
        f64::from(self.raw) / Self::SCALE_F64
    }

    /// Integer part, rounded toward negative infinity.
    #[must_use]
    pub const fn to_int(self) -> i32 {
        self.raw >> F
    }

    /// Re-scale to an integer representation with `scale` steps per unit.
    ///
    /// Computes `raw / (2^F / scale)` with truncating division, which is exact
    /// only when `scale` evenly divides `2^F`.
    ///
    /// # Errors
    ///
    /// [`FixedError::DivisionByZero`] when `2^F / scale` is zero, i.e.
    /// `scale == 0` or `|scale| > 2^F`.
    pub fn to_scaled_int(self, scale: i32) -> Result<i32> {
        let divisor = Self::ONE
            .raw
            .checked_div(scale)
            .ok_or(FixedError::DivisionByZero)?;
        if divisor == 0 {
            return Err(FixedError::DivisionByZero);
        }
        Ok(self.raw.wrapping_div(divisor))
    }

    /// Wrapping addition.
    #[must_use]
    pub const fn add(self, rhs: Self) -> Self {
        Self::from_raw(self.raw.wrapping_add(rhs.raw))
    }

    /// Wrapping subtraction.
    #[must_use]
    pub const fn sub(self, rhs: Self) -> Self {
        Self::from_raw(self.raw.wrapping_sub(rhs.raw))
    }

    /// Wrapping negation; `MIN.neg() == MIN`.
    #[must_use]
    pub const fn neg(self) -> Self {
        Self::from_raw(self.raw.wrapping_neg())
    }

    /// Multiply with a 64-bit intermediate.
    ///
    /// The product is shifted right arithmetically (rounding toward negative
    /// infinity) and then narrowed, which wraps when the result is out of
    /// range.
    #[must_use]
    pub const fn mul(self, rhs: Self) -> Self {
        Self::from_raw(((self.raw as i64 * rhs.raw as i64) >> F) as i32)
    }

    /// Divide with a 64-bit intermediate, truncating toward zero.
    ///
    /// # Errors
    ///
    /// [`FixedError::DivisionByZero`] when `rhs` is zero.
    pub fn div(self, rhs: Self) -> Result<Self> {
        if rhs.raw == 0 {
            return Err(FixedError::DivisionByZero);
        }
        let wide = (i64::from(self.raw) << F) / i64::from(rhs.raw);
        Ok(Self::from_raw(wide as i32))
    }

    /// Absolute value; `MIN.abs() == MIN`.
    #[must_use]
    pub const fn abs(self) -> Self {
        Self::from_raw(self.raw.wrapping_abs())
    }

    /// Smaller of two values.
    #[must_use]
    pub const fn min(self, other: Self) -> Self {
        if self.raw <= other.raw {
            self
        } else {
            other
        }
    }

    /// Larger of two values.
    #[must_use]
    pub const fn max(self, other: Self) -> Self {
        if self.raw >= other.raw {
            self
        } else {
            other
        }
    }

    /// `-1`, `0` or `1` according to the sign.
    #[must_use]
    pub const fn signum(self) -> Self {
        match self.raw {
            0 => Self::ZERO,
            r if r < 0 => Self::ONE.neg(),
            _ => Self::ONE,
        }
    }

    /// `true` if the value is exactly zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.raw == 0
    }

    /// `true` if the value is strictly negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.raw < 0
    }

    /// Approximate `1 / sqrt(self)` with integer Newton-Raphson iterations.
    ///
    /// The initial estimate is the power of two `2^-(k / 2)`, where `k` is the
    /// number of right shifts that bring the raw value below `ONE`. Each
    /// iteration applies `y = y * (1.5 - (x / 2) * y^2)` in 64-bit
    /// intermediates and narrows back to `i32`. With the default four
    /// iterations the Q16 error stays below `0.001` for inputs in `[1, 20]`.
    ///
    /// Values `<= 1` take a fast path and return exactly `ONE`. This is
    /// inherited behavior that is only correct at `1`: `0.25` yields `1.0`,
    /// not `2.0`. It is kept as-is because existing callers depend on it.
    ///
    /// When `k / 2 > F` (only reachable for narrow formats such as [`Q6`] with
    /// large inputs) the estimate clamps to [`EPSILON`](Self::EPSILON).
    ///
    /// # Errors
    ///
    /// [`FixedError::NonPositiveInvSqrt`] when the value is zero or negative.
    pub fn inv_sqrt(self, config: &InvSqrtConfig) -> Result<Self> {
        if self.raw <= 0 {
            tracing::trace!(raw = self.raw, "Rejected non-positive inverse square root input");
            return Err(FixedError::NonPositiveInvSqrt { raw: self.raw });
        }
        if self.raw <= Self::ONE.raw {
            return Ok(Self::ONE);
        }

        // raw > ONE, so the bit length exceeds F.
        let shifts = (i32::BITS - self.raw.leading_zeros()) - F;
        let exponent = F.saturating_sub(shifts / 2);

        let half_x = i64::from(self.raw) >> 1;
        let mut y = 1_i64 << exponent;
        for _ in 0..config.iterations() {
            let y_sq = y.wrapping_mul(y) >> F;
            let half_x_y_sq = half_x.wrapping_mul(y_sq) >> F;
            let factor = Self::THREE_HALVES_RAW - half_x_y_sq;
            y = i64::from((y.wrapping_mul(factor) >> F) as i32);
        }

        Ok(Self::from_raw(y as i32))
    }

    /// [`inv_sqrt`](Self::inv_sqrt) with [`InvSqrtConfig::default`].
    pub fn inv_sqrt_default(self) -> Result<Self> {
        self.inv_sqrt(&InvSqrtConfig::default())
    }
}

impl<const F: u32> fmt::Debug for FixedScalar<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(raw {})", self.to_f64(), self.raw)
    }
}

impl<const F: u32> fmt::Display for FixedScalar<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_f64(), f)
    }
}

impl<const F: u32> From<i32> for FixedScalar<F> {
    fn from(n: i32) -> Self {
        Self::from_int(n)
    }
}

impl<const F: u32> Add for FixedScalar<F> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        FixedScalar::add(self, rhs)
    }
}

impl<const F: u32> Sub for FixedScalar<F> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        FixedScalar::sub(self, rhs)
    }
}

impl<const F: u32> Mul for FixedScalar<F> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        FixedScalar::mul(self, rhs)
    }
}

impl<const F: u32> Neg for FixedScalar<F> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        FixedScalar::neg(self)
    }
}

impl<const F: u32> AddAssign for FixedScalar<F> {
    fn add_assign(&mut self, rhs: Self) {
        *self = FixedScalar::add(*self, rhs);
    }
}

impl<const F: u32> SubAssign for FixedScalar<F> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = FixedScalar::sub(*self, rhs);
    }
}

impl<const F: u32> MulAssign for FixedScalar<F> {
    fn mul_assign(&mut self, rhs: Self) {
        *self = FixedScalar::mul(*self, rhs);
    }
}

// Bit-exact interop with the `fixed` crate's equivalent formats.

impl From<Q16> for I16F16 {
    fn from(value: Q16) -> Self {
        I16F16::from_bits(value.raw())
    }
}

impl From<I16F16> for Q16 {
    fn from(value: I16F16) -> Self {
        Q16::from_raw(value.to_bits())
    }
}

impl From<Q6> for I26F6 {
    fn from(value: Q6) -> Self {
        I26F6::from_bits(value.raw())
    }
}

impl From<I26F6> for Q6 {
    fn from(value: I26F6) -> Self {
        Q6::from_raw(value.to_bits())
    }
}
