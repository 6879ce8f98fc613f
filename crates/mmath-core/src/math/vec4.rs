// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::math::scalar;

/// Four-lane `f32` vector `(x, y, z, w)`.
///
/// The same storage serves 2D, 3D and 4D quantities. Elementwise operations
/// always touch all four lanes; the geometric helpers come in lane-count
/// variants (`dot4`, `dot3`, `dot2`, ...) that read only the leading lanes and
/// zero the rest of their vector results:
///
/// * `*3` operations ignore `w` and return `w = 0`.
/// * `*2` operations ignore `z`/`w` and return `z = w = 0`.
///
/// Inside a 4×4 transform `w = 1` marks a point and `w = 0` a direction.
///
/// # Examples
/// ```
/// use mmath_core::Vec4;
/// let a = Vec4::new(1.0, 0.0, 0.0, 0.0);
/// let b = Vec4::new(0.0, 1.0, 0.0, 0.0);
/// assert_eq!(a.cross3(b).to_array(), [0.0, 0.0, 1.0, 0.0]);
/// assert_eq!((a + b).to_array(), [1.0, 1.0, 0.0, 0.0]);
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec4 {
    data: [f32; 4],
}

impl Vec4 {
    /// All lanes zero.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    /// All lanes one.
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Positive X direction.
    pub const UNIT_X: Self = Self::new(1.0, 0.0, 0.0, 0.0);
    /// Positive Y direction.
    pub const UNIT_Y: Self = Self::new(0.0, 1.0, 0.0, 0.0);
    /// Positive Z direction.
    pub const UNIT_Z: Self = Self::new(0.0, 0.0, 1.0, 0.0);
    /// Homogeneous origin `(0, 0, 0, 1)`.
    pub const UNIT_W: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Creates a vector from lanes.
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { data: [x, y, z, w] }
    }

    /// Broadcasts `v` to every lane.
    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v, v)
    }

    /// Direction `(x, y, z, 0)`.
    pub const fn direction(x: f32, y: f32, z: f32) -> Self {
        Self::new(x, y, z, 0.0)
    }

    /// Point `(x, y, z, 1)`.
    pub const fn point(x: f32, y: f32, z: f32) -> Self {
        Self::new(x, y, z, 1.0)
    }

    /// Returns the lanes as an array.
    pub const fn to_array(self) -> [f32; 4] {
        self.data
    }

    /// X lane.
    pub const fn x(self) -> f32 {
        self.data[0]
    }

    /// Y lane.
    pub const fn y(self) -> f32 {
        self.data[1]
    }

    /// Z lane.
    pub const fn z(self) -> f32 {
        self.data[2]
    }

    /// W lane.
    pub const fn w(self) -> f32 {
        self.data[3]
    }

    /// Copy of `self` with the w lane replaced.
    pub const fn with_w(self, w: f32) -> Self {
        Self::new(self.data[0], self.data[1], self.data[2], w)
    }

    pub(crate) const fn lane(self, idx: usize) -> f32 {
        self.data[idx]
    }

    pub(crate) fn set_lane(&mut self, idx: usize, value: f32) {
        self.data[idx] = value;
    }

    /// Copy with lanes at `lanes..4` zeroed.
    pub(crate) fn masked(self, lanes: usize) -> Self {
        let mut out = self;
        for lane in out.data.iter_mut().skip(lanes) {
            *lane = 0.0;
        }
        out
    }

    fn map(self, f: impl Fn(f32) -> f32) -> Self {
        Self {
            data: self.data.map(f),
        }
    }

    fn zip(self, other: Self, f: impl Fn(f32, f32) -> f32) -> Self {
        Self::new(
            f(self.data[0], other.data[0]),
            f(self.data[1], other.data[1]),
            f(self.data[2], other.data[2]),
            f(self.data[3], other.data[3]),
        )
    }

    fn zip3(self, b: Self, c: Self, f: impl Fn(f32, f32, f32) -> f32) -> Self {
        Self::new(
            f(self.data[0], b.data[0], c.data[0]),
            f(self.data[1], b.data[1], c.data[1]),
            f(self.data[2], b.data[2], c.data[2]),
            f(self.data[3], b.data[3], c.data[3]),
        )
    }

    /// Lane-wise minimum.
    pub fn min(self, other: Self) -> Self {
        self.zip(other, f32::min)
    }

    /// Lane-wise maximum.
    pub fn max(self, other: Self) -> Self {
        self.zip(other, f32::max)
    }

    /// Lane-wise absolute value.
    pub fn abs(self) -> Self {
        self.map(f32::abs)
    }

    /// Lane-wise sign: `-1`, `0` or `1`.
    pub fn sign(self) -> Self {
        self.map(scalar::sign_zero)
    }

    /// Lane-wise sine (radians).
    pub fn sin(self) -> Self {
        self.map(f32::sin)
    }

    /// Lane-wise cosine (radians).
    pub fn cos(self) -> Self {
        self.map(f32::cos)
    }

    /// Lane-wise floor.
    pub fn floor(self) -> Self {
        self.map(f32::floor)
    }

    /// Lane-wise ceiling.
    pub fn ceil(self) -> Self {
        self.map(f32::ceil)
    }

    /// Lane-wise rounding, half away from zero.
    pub fn round(self) -> Self {
        self.map(f32::round)
    }

    /// Lane-wise clamp between `lo` and `hi`.
    pub fn clamp(self, lo: Self, hi: Self) -> Self {
        self.zip3(lo, hi, scalar::clamp)
    }

    /// Lane-wise [`scalar::sign_zero`].
    pub fn sign_zero(self) -> Self {
        self.sign()
    }

    /// Lane-wise [`scalar::sign_not_zero`].
    pub fn sign_not_zero(self) -> Self {
        self.map(scalar::sign_not_zero)
    }

    /// Lane-wise square.
    pub fn sqr(self) -> Self {
        self * self
    }

    /// Lane-wise clamp to `[0, 1]`.
    pub fn saturate(self) -> Self {
        self.map(scalar::saturate)
    }

    /// Lane-wise `(b - a) * t + a`.
    pub fn lerp(self, b: Self, t: Self) -> Self {
        self.zip3(b, t, scalar::lerp)
    }

    /// Lane-wise inverse of [`Vec4::lerp`].
    pub fn inverse_lerp(self, b: Self, v: Self) -> Self {
        self.zip3(b, v, scalar::inverse_lerp)
    }

    /// Lane-wise floored modulo.
    pub fn modulo(self, y: Self) -> Self {
        self.zip(y, scalar::modulo)
    }

    /// Lane-wise shortest angular difference `b - self`.
    pub fn angle_delta(self, b: Self) -> Self {
        self.zip(b, scalar::angle_delta)
    }

    /// Lane-wise wrap-aware interpolation.
    pub fn lerp_angle(self, b: Self, t: Self) -> Self {
        self.zip3(b, t, scalar::lerp_angle)
    }

    /// Lane-wise inverse of [`Vec4::lerp_angle`].
    pub fn inverse_lerp_angle(self, b: Self, v: Self) -> Self {
        self.zip3(b, v, scalar::inverse_lerp_angle)
    }

    fn dot_n(self, other: Self, lanes: usize) -> f32 {
        self.data
            .iter()
            .zip(other.data.iter())
            .take(lanes)
            .map(|(a, b)| a * b)
            .sum()
    }

    fn normalized_n(self, fallback: Self, lanes: usize) -> Self {
        let sqr = self.dot_n(self, lanes);
        if sqr <= 0.0 || !sqr.is_finite() {
            return fallback;
        }
        self.masked(lanes) / sqr.sqrt()
    }

    fn normalized_unsafe_n(self, lanes: usize) -> Self {
        let sqr = self.dot_n(self, lanes);
        debug_assert!(sqr > 0.0, "normalizing a zero-length vector");
        self.masked(lanes) / sqr.sqrt()
    }

    /// Swaps the first non-zero lane `m` with the next lane `n` (negating
    /// the one written to `m`) and normalizes.
    #[allow(clippy::float_cmp)]
    fn perpendicular_n(self, lanes: usize) -> Self {
        let Some(m) = (0..lanes).find(|&i| self.data[i] != 0.0) else {
            return Self::UNIT_X;
        };
        let n = (m + 1) % lanes;
        let mut out = Self::ZERO;
        out.data[n] = self.data[m];
        out.data[m] = -self.data[n];
        out.normalized_n(Self::UNIT_X, lanes)
    }

    /// Four-lane dot product.
    pub fn dot4(self, other: Self) -> f32 {
        self.dot_n(other, 4)
    }

    /// Four-lane squared length.
    pub fn sqr_magnitude4(self) -> f32 {
        self.dot4(self)
    }

    /// Four-lane length.
    pub fn magnitude4(self) -> f32 {
        self.sqr_magnitude4().sqrt()
    }

    /// Divides by the four-lane length; returns `fallback` for a zero or
    /// non-finite length.
    pub fn normalized4(self, fallback: Self) -> Self {
        self.normalized_n(fallback, 4)
    }

    /// Divides by the four-lane length without guarding zero. A zero input
    /// produces NaN lanes (and trips a debug assertion).
    pub fn normalized_unsafe4(self) -> Self {
        self.normalized_unsafe_n(4)
    }

    /// A unit vector orthogonal to `self` in four lanes; `UNIT_X` for zero.
    pub fn perpendicular4(self) -> Self {
        self.perpendicular_n(4)
    }

    /// Three-lane dot product.
    pub fn dot3(self, other: Self) -> f32 {
        self.dot_n(other, 3)
    }

    /// Three-lane cross product; `w = 0`.
    pub fn cross3(self, other: Self) -> Self {
        let [ax, ay, az, _] = self.data;
        let [bx, by, bz, _] = other.data;
        Self::direction(ay * bz - az * by, az * bx - ax * bz, ax * by - ay * bx)
    }

    /// Three-lane squared length.
    pub fn sqr_magnitude3(self) -> f32 {
        self.dot3(self)
    }

    /// Three-lane length.
    pub fn magnitude3(self) -> f32 {
        self.sqr_magnitude3().sqrt()
    }

    /// Three-lane normalization with a fallback for degenerate input.
    pub fn normalized3(self, fallback: Self) -> Self {
        self.normalized_n(fallback, 3)
    }

    /// Three-lane normalization without a zero guard.
    pub fn normalized_unsafe3(self) -> Self {
        self.normalized_unsafe_n(3)
    }

    /// A unit direction orthogonal to `self.xyz`; `UNIT_X` for zero.
    pub fn perpendicular3(self) -> Self {
        self.perpendicular_n(3)
    }

    /// Two-lane dot product.
    pub fn dot2(self, other: Self) -> f32 {
        self.dot_n(other, 2)
    }

    /// Two-lane cross product, the signed parallelogram area
    /// `a.x * b.y - a.y * b.x`.
    pub fn cross2(self, other: Self) -> f32 {
        self.data[0] * other.data[1] - self.data[1] * other.data[0]
    }

    /// Two-lane squared length.
    pub fn sqr_magnitude2(self) -> f32 {
        self.dot2(self)
    }

    /// Two-lane length.
    pub fn magnitude2(self) -> f32 {
        self.sqr_magnitude2().sqrt()
    }

    /// Two-lane normalization with a fallback for degenerate input.
    pub fn normalized2(self, fallback: Self) -> Self {
        self.normalized_n(fallback, 2)
    }

    /// Two-lane normalization without a zero guard.
    pub fn normalized_unsafe2(self) -> Self {
        self.normalized_unsafe_n(2)
    }

    /// A unit vector orthogonal to `(x, y)`, built from the first non-zero
    /// lane: `(-y, x)` when `x != 0`, otherwise `(y, 0)`. Normalized; `UNIT_X`
    /// for zero.
    pub fn perpendicular2(self) -> Self {
        self.perpendicular_n(2)
    }
}

impl From<[f32; 4]> for Vec4 {
    fn from(value: [f32; 4]) -> Self {
        Self { data: value }
    }
}

/// Three lanes become a direction (`w = 0`).
impl From<[f32; 3]> for Vec4 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::direction(x, y, z)
    }
}

impl From<Vec4> for [f32; 4] {
    fn from(value: Vec4) -> Self {
        value.data
    }
}

macro_rules! lane_op {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $op:tt) => {
        impl $trait for Vec4 {
            type Output = Self;
            fn $method(self, rhs: Self) -> Self {
                self.zip(rhs, |a, b| a $op b)
            }
        }

        impl $trait<f32> for Vec4 {
            type Output = Self;
            fn $method(self, rhs: f32) -> Self {
                self.map(|a| a $op rhs)
            }
        }

        impl $assign_trait for Vec4 {
            fn $assign_method(&mut self, rhs: Self) {
                *self = *self $op rhs;
            }
        }

        impl $assign_trait<f32> for Vec4 {
            fn $assign_method(&mut self, rhs: f32) {
                *self = *self $op rhs;
            }
        }
    };
}

lane_op!(Add, add, AddAssign, add_assign, +);
lane_op!(Sub, sub, SubAssign, sub_assign, -);
lane_op!(Mul, mul, MulAssign, mul_assign, *);
lane_op!(Div, div, DivAssign, div_assign, /);

impl Neg for Vec4 {
    type Output = Self;
    fn neg(self) -> Self {
        self.map(|a| -a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_lane_ops_ignore_and_clear_w() {
        let a = Vec4::new(3.0, 0.0, 4.0, 99.0);
        assert!((a.magnitude3() - 5.0).abs() < 1e-6);
        let n = a.normalized3(Vec4::UNIT_Y);
        assert_eq!(n.w().to_bits(), 0.0f32.to_bits());
        assert!((n.x() - 0.6).abs() < 1e-6);
    }

    #[test]
    fn normalized_returns_fallback_for_zero() {
        let fallback = Vec4::new(7.0, 8.0, 9.0, 10.0);
        assert_eq!(Vec4::ZERO.normalized4(fallback), fallback);
        assert_eq!(Vec4::new(0.0, 0.0, 0.0, 5.0).normalized3(fallback), fallback);
        assert_eq!(Vec4::new(0.0, 0.0, 5.0, 5.0).normalized2(fallback), fallback);
    }

    #[test]
    fn perpendicular_is_orthogonal_and_unit() {
        for v in [
            Vec4::new(1.0, 2.0, 3.0, 0.0),
            Vec4::new(0.0, 0.0, -2.0, 0.0),
            Vec4::new(0.0, 5.0, 0.0, 0.0),
        ] {
            let p = v.perpendicular3();
            assert!(p.dot3(v).abs() < 1e-5, "{v:?} -> {p:?}");
            assert!((p.magnitude3() - 1.0).abs() < 1e-5);
        }
        let p = Vec4::new(0.0, 0.0, 0.0, 2.0).perpendicular4();
        assert!(p.dot4(Vec4::new(0.0, 0.0, 0.0, 2.0)).abs() < 1e-6);
        assert_eq!(Vec4::ZERO.perpendicular3(), Vec4::UNIT_X);
    }

    #[test]
    fn perpendicular2_rotates_ninety_degrees() {
        let p = Vec4::new(2.0, 0.0, 0.0, 0.0).perpendicular2();
        assert_eq!(p.to_array(), [0.0, 1.0, 0.0, 0.0]);
        let p = Vec4::new(3.0, 4.0, 9.0, 9.0).perpendicular2();
        assert!((p.x() + 0.8).abs() < 1e-6 && (p.y() - 0.6).abs() < 1e-6, "{p:?}");
    }

    #[test]
    fn perpendicular2_starts_from_first_nonzero_lane() {
        let p = Vec4::new(0.0, 1.0, 0.0, 0.0).perpendicular2();
        assert_eq!(p.to_array(), [1.0, 0.0, 0.0, 0.0]);
        let p = Vec4::new(0.0, -3.0, 7.0, 0.0).perpendicular2();
        assert_eq!(p.to_array(), [-1.0, 0.0, 0.0, 0.0]);
        assert_eq!(Vec4::new(0.0, 0.0, 5.0, 0.0).perpendicular2(), Vec4::UNIT_X);
    }

    #[test]
    fn cross2_is_signed_area() {
        let a = Vec4::UNIT_X;
        let b = Vec4::UNIT_Y;
        assert!((a.cross2(b) - 1.0).abs() < 1e-6);
        assert!((b.cross2(a) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn compound_assignment_matches_pure_ops() {
        let a = Vec4::new(1.0, 2.0, 3.0, 4.0);
        let b = Vec4::new(0.5, -1.0, 2.0, 0.0);
        let mut c = a;
        c += b;
        assert_eq!(c, a + b);
        c *= 2.0;
        assert_eq!(c, (a + b) * 2.0);
        c -= a;
        c /= b.max(Vec4::ONE);
        assert_eq!(c, ((a + b) * 2.0 - a) / b.max(Vec4::ONE));
    }
}
