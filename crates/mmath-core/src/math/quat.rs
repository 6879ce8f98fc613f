// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::ops::{Mul, MulAssign, Neg};

use crate::math::{Mat4, Vec4, EPSILON};

/// Rotation quaternion stored as `(x, y, z, w)`, `w` being the scalar part.
///
/// * Angles are radians.
/// * Only unit quaternions describe rotations. [`Quat::vector_transform`] and
///   [`Quat::slerp`] assume unit input; [`Quat::to_mat4`] and
///   [`Quat::inversed`] accept any non-zero magnitude.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quat {
    data: [f32; 4],
}

impl Quat {
    /// The identity rotation `(0, 0, 0, 1)`.
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Creates a quaternion from components.
    ///
    /// Callers should provide finite components; use
    /// [`Quat::from_axis_angle`] for axis/angle construction.
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { data: [x, y, z, w] }
    }

    /// Returns the identity quaternion.
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Returns the quaternion as an array.
    pub const fn to_array(self) -> [f32; 4] {
        self.data
    }

    /// Components as a [`Vec4`], `w` in the last lane.
    pub const fn to_vec4(self) -> Vec4 {
        Vec4::new(self.data[0], self.data[1], self.data[2], self.data[3])
    }

    /// Rotation of `radians` about +X.
    pub fn rotate_x(radians: f32) -> Self {
        let (s, c) = (radians * 0.5).sin_cos();
        Self::new(s, 0.0, 0.0, c)
    }

    /// Rotation of `radians` about +Y.
    pub fn rotate_y(radians: f32) -> Self {
        let (s, c) = (radians * 0.5).sin_cos();
        Self::new(0.0, s, 0.0, c)
    }

    /// Rotation of `radians` about +Z.
    pub fn rotate_z(radians: f32) -> Self {
        let (s, c) = (radians * 0.5).sin_cos();
        Self::new(0.0, 0.0, s, c)
    }

    /// Rotation of `radians` about principal axis `index` (`0..=2`).
    pub(crate) fn rotate_axis(index: usize, radians: f32) -> Self {
        match index {
            0 => Self::rotate_x(radians),
            1 => Self::rotate_y(radians),
            _ => Self::rotate_z(radians),
        }
    }

    /// Constructs a quaternion from a rotation axis and angle in radians.
    ///
    /// Returns the identity quaternion when the axis length is ≤ `EPSILON`.
    /// Only the xyz lanes of `axis` are read.
    pub fn from_axis_angle(axis: Vec4, angle: f32) -> Self {
        let len_sq = axis.sqr_magnitude3();
        if len_sq <= EPSILON * EPSILON {
            return Self::identity();
        }
        let axis = axis.masked(3) / len_sq.sqrt();
        let (sin_half, cos_half) = (angle * 0.5).sin_cos();
        Self::new(
            axis.x() * sin_half,
            axis.y() * sin_half,
            axis.z() * sin_half,
            cos_half,
        )
    }

    /// Hamilton product `self ⊗ other`.
    ///
    /// The result applies `other` first and then `self`, the usual
    /// composition order for building compound rotations. Quaternion
    /// multiplication is non‑commutative.
    ///
    /// # Examples
    /// ```
    /// use core::f32::consts::FRAC_PI_2;
    /// use mmath_core::{Quat, Vec4};
    /// let yaw = Quat::rotate_y(FRAC_PI_2);
    /// let pitch = Quat::rotate_x(FRAC_PI_2);
    /// // pitch first, then yaw: +Y -> +Z -> +X
    /// let v = yaw.multiply(&pitch).vector_transform(Vec4::UNIT_Y);
    /// assert!((v.x() - 1.0).abs() < 1e-6);
    /// assert_ne!(yaw.multiply(&pitch), pitch.multiply(&yaw));
    /// ```
    pub fn multiply(&self, other: &Self) -> Self {
        let [ax, ay, az, aw] = self.data;
        let [bx, by, bz, bw] = other.data;

        Self::new(
            aw * bx + ax * bw + ay * bz - az * by,
            aw * by - ax * bz + ay * bw + az * bx,
            aw * bz + ax * by - ay * bx + az * bw,
            aw * bw - ax * bx - ay * by - az * bz,
        )
    }

    /// Four-component dot product.
    pub fn dot(&self, other: &Self) -> f32 {
        self.to_vec4().dot4(other.to_vec4())
    }

    /// Squared magnitude.
    pub fn sqr_magnitude(&self) -> f32 {
        self.dot(self)
    }

    /// Magnitude.
    pub fn magnitude(&self) -> f32 {
        self.sqr_magnitude().sqrt()
    }

    /// Unit-length copy, or `fallback` when the magnitude is zero or not
    /// finite.
    pub fn normalized(&self, fallback: Self) -> Self {
        let sqr = self.sqr_magnitude();
        if sqr <= 0.0 || !sqr.is_finite() {
            return fallback;
        }
        self.scaled(1.0 / sqr.sqrt())
    }

    /// Negates the vector part. Equals [`Quat::inversed`] only for unit input.
    pub fn conjugated(&self) -> Self {
        let [x, y, z, w] = self.data;
        Self::new(-x, -y, -z, w)
    }

    /// Multiplicative inverse `conjugate / |q|²`, valid for any non-zero
    /// quaternion. A zero quaternion yields non-finite components.
    pub fn inversed(&self) -> Self {
        self.conjugated().scaled(1.0 / self.sqr_magnitude())
    }

    fn scaled(&self, s: f32) -> Self {
        let [x, y, z, w] = self.data;
        Self::new(x * s, y * s, z * s, w * s)
    }

    fn added(&self, other: &Self) -> Self {
        let [ax, ay, az, aw] = self.data;
        let [bx, by, bz, bw] = other.data;
        Self::new(ax + bx, ay + by, az + bz, aw + bw)
    }

    /// Spherical interpolation from `self` (`t = 0`) to `other` (`t = 1`)
    /// along the shorter arc.
    ///
    /// When the inputs are nearly parallel the sine weights lose precision, so
    /// the result is a normalized linear blend instead.
    pub fn slerp(&self, other: &Self, t: f32) -> Self {
        let mut cos_theta = self.dot(other);
        let mut end = *other;
        if cos_theta < 0.0 {
            cos_theta = -cos_theta;
            end = -end;
        }

        if cos_theta > 1.0 - 1e-5 {
            let blended = self.scaled(1.0 - t).added(&end.scaled(t));
            return blended.normalized(*self);
        }

        let theta = cos_theta.acos();
        let inv_sin = 1.0 / theta.sin();
        let wa = ((1.0 - t) * theta).sin() * inv_sin;
        let wb = (t * theta).sin() * inv_sin;
        self.scaled(wa).added(&end.scaled(wb))
    }

    /// Rotates the xyz lanes of `v`; `w` passes through unchanged.
    pub fn vector_transform(&self, v: Vec4) -> Vec4 {
        let [qx, qy, qz, qw] = self.data;
        let u = Vec4::direction(qx, qy, qz);
        let t = u.cross3(v) * 2.0;
        let rotated = v.masked(3) + t * qw + u.cross3(t);
        rotated.with_w(v.w())
    }

    /// Converts to a rotation matrix (column-major 4×4).
    ///
    /// Non-unit input is handled by scaling with `2 / |q|²`, so the result is
    /// the rotation of the normalized quaternion.
    pub fn to_mat4(&self) -> Mat4 {
        let [x, y, z, w] = self.data;
        let sqr = self.sqr_magnitude();
        let s = if sqr > 0.0 { 2.0 / sqr } else { 0.0 };

        let xx = x * x * s;
        let yy = y * y * s;
        let zz = z * z * s;
        let xy = x * y * s;
        let xz = x * z * s;
        let yz = y * z * s;
        let wx = w * x * s;
        let wy = w * y * s;
        let wz = w * z * s;

        Mat4::new([
            1.0 - (yy + zz),
            xy + wz,
            xz - wy,
            0.0,
            xy - wz,
            1.0 - (xx + zz),
            yz + wx,
            0.0,
            xz + wy,
            yz - wx,
            1.0 - (xx + yy),
            0.0,
            0.0,
            0.0,
            0.0,
            1.0,
        ])
    }
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Converts a 4‑element `[f32; 4]` array `(x, y, z, w)` into a `Quat`.
/// The components are taken verbatim; normalization is not enforced.
impl From<[f32; 4]> for Quat {
    fn from(value: [f32; 4]) -> Self {
        Self { data: value }
    }
}

impl From<Quat> for [f32; 4] {
    fn from(value: Quat) -> Self {
        value.data
    }
}

impl Mul for Quat {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl MulAssign for Quat {
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.multiply(&rhs);
    }
}

/// Component-wise negation; `-q` is the same rotation as `q`.
impl Neg for Quat {
    type Output = Self;
    fn neg(self) -> Self {
        self.scaled(-1.0)
    }
}
