// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Orientation constructors: axis/angle, from-to alignment and look-at.

use crate::math::{Axis, Mat4, Vec4, EPSILON};
use crate::MathError;

impl Mat4 {
    /// Rotation of `angle` given as `(cos, sin)` about the unit `axis`:
    /// `c·I + (1 - c)·aaᵀ + s·[a]×`.
    fn from_unit_axis_cos_sin(axis: Vec4, c: f32, s: f32) -> Self {
        let (x, y, z) = (axis.x(), axis.y(), axis.z());
        let t = 1.0 - c;
        Self::from_cols(
            Vec4::direction(t * x * x + c, t * x * y + s * z, t * x * z - s * y),
            Vec4::direction(t * x * y - s * z, t * y * y + c, t * y * z + s * x),
            Vec4::direction(t * x * z + s * y, t * y * z - s * x, t * z * z + c),
            Vec4::UNIT_W,
        )
    }

    /// Rotation of `radians` about `axis` (right-handed). The axis is
    /// normalized; a zero axis falls back to `+X`.
    pub fn axis_angle(axis: Vec4, radians: f32) -> Self {
        let (s, c) = radians.sin_cos();
        Self::from_unit_axis_cos_sin(axis.normalized3(Vec4::UNIT_X), c, s)
    }

    /// Shortest rotation that turns direction `from` onto direction `to`.
    ///
    /// Both inputs are normalized first. Parallel inputs give the identity;
    /// anti-parallel inputs give a half turn about
    /// [`Vec4::perpendicular3`] of `from`.
    ///
    /// # Examples
    /// ```
    /// use mmath_core::{Mat4, Vec4};
    /// let r = Mat4::align(Vec4::UNIT_X, Vec4::direction(0.0, 2.0, 0.0));
    /// let v = r.transform_direction(Vec4::UNIT_X);
    /// assert!((v.y() - 1.0).abs() < 1e-6);
    /// ```
    pub fn align(from: Vec4, to: Vec4) -> Self {
        let f = from.normalized3(Vec4::UNIT_X);
        let t = to.normalized3(Vec4::UNIT_X);
        let axis = f.cross3(t);
        let cos = f.dot3(t).clamp(-1.0, 1.0);
        let sin = axis.magnitude3();

        if sin <= EPSILON {
            if cos > 0.0 {
                return Self::IDENTITY;
            }
            return Self::from_unit_axis_cos_sin(f.perpendicular3(), -1.0, 0.0);
        }
        Self::from_unit_axis_cos_sin(axis / sin, cos, sin)
    }

    /// Alias of [`Mat4::align`].
    pub fn rotate_towards(from: Vec4, to: Vec4) -> Self {
        Self::align(from, to)
    }

    /// Rotation whose `forward` axis points along `target` and whose `up`
    /// axis leans towards `up_hint`.
    ///
    /// The forward and up columns are written with the sign of their
    /// [`Axis`]; the remaining column is the cross product of the other two
    /// in cyclic order, so the result is always a proper rotation. An
    /// `up_hint` parallel to `target` is replaced by a perpendicular of the
    /// forward direction.
    ///
    /// # Errors
    /// [`MathError::DegenerateAxes`] when `forward` and `up` name the same
    /// principal axis.
    pub fn look_at(target: Vec4, up_hint: Vec4, forward: Axis, up: Axis) -> Result<Self, MathError> {
        let fi = forward.index();
        let ui = up.index();
        if fi == ui {
            return Err(MathError::DegenerateAxes { forward, up });
        }

        let f = target.normalized3(Vec4::UNIT_Z);
        let side = up_hint.cross3(f).normalized3(f.perpendicular3());
        let u = f.cross3(side);

        let mut cols = [Vec4::ZERO; 3];
        cols[fi] = f * forward.sign();
        cols[ui] = u * up.sign();
        let xi = 3 - fi - ui;
        cols[xi] = cols[(xi + 1) % 3].cross3(cols[(xi + 2) % 3]);

        Ok(Self::from_cols(cols[0], cols[1], cols[2], Vec4::UNIT_W))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::ValidationFlags;
    use core::f32::consts::FRAC_PI_2;

    fn assert_vec_close(a: Vec4, b: Vec4) {
        for i in 0..4 {
            assert!((a.lane(i) - b.lane(i)).abs() < 1e-5, "{a:?} vs {b:?}");
        }
    }

    #[test]
    fn axis_angle_matches_principal_rotations() {
        let m = Mat4::axis_angle(Vec4::direction(0.0, 0.0, 5.0), FRAC_PI_2);
        let r = Mat4::rotate_z(FRAC_PI_2);
        for (a, b) in m.to_array().iter().zip(r.to_array().iter()) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn align_handles_parallel_and_opposite() {
        let v = Vec4::direction(1.0, 2.0, 3.0);
        assert_eq!(Mat4::align(v, v * 4.0), Mat4::IDENTITY);
        let flip = Mat4::rotate_towards(v, -v);
        assert_vec_close(
            flip.transform_direction(v.normalized3(Vec4::UNIT_X)),
            -v.normalized3(Vec4::UNIT_X),
        );
    }

    #[test]
    fn look_at_points_forward_axis_at_target() {
        let target = Vec4::direction(1.0, 0.0, 1.0);
        for (forward, up) in [(Axis::Z, Axis::Y), (Axis::NegZ, Axis::Y), (Axis::X, Axis::NegZ)] {
            let m = Mat4::look_at(target, Vec4::UNIT_Y, forward, up).unwrap_or(Mat4::IDENTITY);
            let dir = m.transform_direction(forward.unit());
            assert_vec_close(dir, target.normalized3(Vec4::UNIT_Z));
            assert!(m.validate(ValidationFlags::ALL, 1e-5).is_empty(), "{forward}/{up}");
        }
    }

    #[test]
    fn look_at_rejects_shared_axis() {
        assert_eq!(
            Mat4::look_at(Vec4::UNIT_Z, Vec4::UNIT_Y, Axis::Y, Axis::NegY),
            Err(MathError::DegenerateAxes {
                forward: Axis::Y,
                up: Axis::NegY
            })
        );
    }
}
