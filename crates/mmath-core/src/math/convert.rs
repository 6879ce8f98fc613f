// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Conversions between matrices, quaternions and Euler triples.

use crate::math::{Mat4, Quat, RotateOrder, Vec4};

/// Euler angles of the rotation block of `m`, which must be orthonormal.
///
/// With `i, j, k` the first, second and third axes of `order`, the matrix is
/// `R_k(c) · R_j(b) · R_i(a)`. `b` comes from entry `(k, i)` and `a` from row
/// `k`. `c` is read from column `j` of `m · R_i(a)ᵀ`, whose entries stay
/// well scaled near gimbal lock, so no special case is needed there. Odd
/// (non-cyclic) orders flip the signs of the off-diagonal terms.
fn euler_from_rotation(m: &Mat4, order: RotateOrder) -> Vec4 {
    let [i, j, k] = order.axes();
    let parity = if order.is_cyclic() { 1.0 } else { -1.0 };

    let b = (-parity * m.at(k, i)).atan2(m.at(i, i).hypot(m.at(j, i)));
    let a = (parity * m.at(k, j)).atan2(m.at(k, k));
    let (sa, ca) = a.sin_cos();
    let mij = ca * m.at(i, j) - parity * sa * m.at(i, k);
    let mjj = ca * m.at(j, j) - parity * sa * m.at(j, k);
    let c = (-parity * mij).atan2(mjj);

    let mut out = Vec4::ZERO;
    out.set_lane(i, a);
    out.set_lane(j, b);
    out.set_lane(k, c);
    out
}

impl Mat4 {
    /// Rotation quaternion of the (assumed orthonormal) 3×3 block.
    ///
    /// Picks the numerically largest of `w`, `x`, `y`, `z` to divide by, so
    /// half-turns stay stable. `q` and `-q` are the same rotation; compare the
    /// result through [`Quat::to_mat4`].
    pub fn to_quat(&self) -> Quat {
        let r = |row: usize, col: usize| self.at(row, col);
        let trace = r(0, 0) + r(1, 1) + r(2, 2);

        if trace > 0.0 {
            let s = (trace + 1.0).sqrt() * 2.0;
            Quat::new(
                (r(2, 1) - r(1, 2)) / s,
                (r(0, 2) - r(2, 0)) / s,
                (r(1, 0) - r(0, 1)) / s,
                0.25 * s,
            )
        } else if r(0, 0) > r(1, 1) && r(0, 0) > r(2, 2) {
            let s = (1.0 + r(0, 0) - r(1, 1) - r(2, 2)).sqrt() * 2.0;
            Quat::new(
                0.25 * s,
                (r(0, 1) + r(1, 0)) / s,
                (r(0, 2) + r(2, 0)) / s,
                (r(2, 1) - r(1, 2)) / s,
            )
        } else if r(1, 1) > r(2, 2) {
            let s = (1.0 + r(1, 1) - r(0, 0) - r(2, 2)).sqrt() * 2.0;
            Quat::new(
                (r(0, 1) + r(1, 0)) / s,
                0.25 * s,
                (r(1, 2) + r(2, 1)) / s,
                (r(0, 2) - r(2, 0)) / s,
            )
        } else {
            let s = (1.0 + r(2, 2) - r(0, 0) - r(1, 1)).sqrt() * 2.0;
            Quat::new(
                (r(0, 2) + r(2, 0)) / s,
                (r(1, 2) + r(2, 1)) / s,
                0.25 * s,
                (r(1, 0) - r(0, 1)) / s,
            )
        }
    }

    /// Euler angles (radians, by axis in the xyz lanes) that recompose to
    /// this matrix's rotation through [`Mat4::rotate2`] with the same order.
    ///
    /// Scale is stripped by normalizing the three basis columns first. A
    /// mirrored basis (negative scale) has no Euler representation, so the
    /// input should be rotation × positive scale.
    pub fn to_euler(&self, order: RotateOrder) -> Vec4 {
        let basis = Self::from_cols(
            self.col(0).normalized3(Vec4::UNIT_X),
            self.col(1).normalized3(Vec4::UNIT_Y),
            self.col(2).normalized3(Vec4::UNIT_Z),
            Vec4::UNIT_W,
        );
        euler_from_rotation(&basis, order)
    }
}

impl Quat {
    /// Euler rotation: the axis quaternions multiplied in the sequence named
    /// by `order`, `q_third ⊗ q_second ⊗ q_first`. Angles are read from the
    /// xyz lanes by axis.
    ///
    /// Agrees with [`Mat4::rotate2`] for every order.
    pub fn from_euler(radians: Vec4, order: RotateOrder) -> Self {
        let [first, second, third] = order.axes();
        Self::rotate_axis(third, radians.lane(third))
            * Self::rotate_axis(second, radians.lane(second))
            * Self::rotate_axis(first, radians.lane(first))
    }

    /// Euler angles of this rotation; inverse of [`Quat::from_euler`] up to
    /// the usual angle aliasing and gimbal ambiguity.
    pub fn to_euler(&self, order: RotateOrder) -> Vec4 {
        euler_from_rotation(&self.to_mat4(), order)
    }
}
