// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use crate::math::{Quat, RotateOrder, Vec4};

/// Column‑major 4×4 homogeneous transform.
///
/// - Stored as four column vectors; the flat view is `col0, col1, col2, col3`
///   so entry (`row`, `col`) lives at index `col * 4 + row`. Hosts that use
///   row vectors read the same memory as row-major, which is why their
///   `mIJ` naming (`I` = column here) addresses `m[I * 4 + J]`.
/// - Columns 0..2 carry the linear part, column 3 the translation, row 3 is
///   `[0, 0, 0, 1]` for affine transforms.
/// - Points are column vectors (`M * p`), so in `A * B` the right operand
///   is applied first.
///
/// # Examples
/// Basic transformations:
/// ```
/// use mmath_core::{Mat4, Vec4};
/// let t = Mat4::translate(5.0, -3.0, 2.0);
/// let p = Vec4::point(2.0, 4.0, -1.0);
/// assert_eq!(t.vector_transform(p).to_array(), [7.0, 1.0, 1.0, 0.0]);
/// ```
///
/// # Precision
/// - Uses `f32`; repeated multiplies and transforms will accumulate rounding.
/// - Rotation helpers agree with [`Quat`] conversions.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mat4 {
    data: [f32; 16],
}

impl Mat4 {
    /// The identity matrix.
    pub const IDENTITY: Self = Self::new([
        1.0, 0.0, 0.0, 0.0, // col 0
        0.0, 1.0, 0.0, 0.0, // col 1
        0.0, 0.0, 1.0, 0.0, // col 2
        0.0, 0.0, 0.0, 1.0, // col 3
    ]);

    /// Returns the identity matrix.
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Creates a matrix from column-major array data.
    pub const fn new(data: [f32; 16]) -> Self {
        Self { data }
    }

    /// Builds a matrix from four columns.
    pub const fn from_cols(c0: Vec4, c1: Vec4, c2: Vec4, c3: Vec4) -> Self {
        let [a0, a1, a2, a3] = c0.to_array();
        let [b0, b1, b2, b3] = c1.to_array();
        let [d0, d1, d2, d3] = c2.to_array();
        let [e0, e1, e2, e3] = c3.to_array();
        Self::new([
            a0, a1, a2, a3, b0, b1, b2, b3, d0, d1, d2, d3, e0, e1, e2, e3,
        ])
    }

    /// Direct construction from three basis columns and a translation
    /// column. Nothing is normalized or orthogonalized.
    pub const fn from_vectors(c0: Vec4, c1: Vec4, c2: Vec4, translate: Vec4) -> Self {
        Self::from_cols(c0, c1, c2, translate)
    }

    /// Returns the matrix as a column‑major array.
    pub const fn to_array(self) -> [f32; 16] {
        self.data
    }

    /// Entry at `row`, `col` (both `0..4`).
    pub const fn at(&self, row: usize, col: usize) -> f32 {
        self.data[col * 4 + row]
    }

    fn set(&mut self, row: usize, col: usize, value: f32) {
        self.data[col * 4 + row] = value;
    }

    /// Column `index` (`0..4`).
    pub const fn col(&self, index: usize) -> Vec4 {
        let base = index * 4;
        Vec4::new(
            self.data[base],
            self.data[base + 1],
            self.data[base + 2],
            self.data[base + 3],
        )
    }

    /// Row `index` (`0..4`).
    pub const fn row(&self, index: usize) -> Vec4 {
        Vec4::new(
            self.data[index],
            self.data[4 + index],
            self.data[8 + index],
            self.data[12 + index],
        )
    }

    /// Copy with column `index` replaced.
    pub fn with_col(mut self, index: usize, col: Vec4) -> Self {
        self.data[index * 4..index * 4 + 4].copy_from_slice(&col.to_array());
        self
    }

    /// Pure translation.
    pub const fn translate(tx: f32, ty: f32, tz: f32) -> Self {
        Self::new([
            1.0, 0.0, 0.0, 0.0, // col 0
            0.0, 1.0, 0.0, 0.0, // col 1
            0.0, 0.0, 1.0, 0.0, // col 2
            tx, ty, tz, 1.0, // col 3 (translation)
        ])
    }

    /// Non-uniform scale.
    pub const fn scale(sx: f32, sy: f32, sz: f32) -> Self {
        Self::new([
            sx, 0.0, 0.0, 0.0, // col 0
            0.0, sy, 0.0, 0.0, // col 1
            0.0, 0.0, sz, 0.0, // col 2
            0.0, 0.0, 0.0, 1.0, // col 3
        ])
    }

    /// Non-uniform scale from the xyz lanes of `scale`.
    pub const fn scale2(scale: Vec4) -> Self {
        Self::scale(scale.x(), scale.y(), scale.z())
    }

    /// Rotation around +X by `radians` (right-handed).
    pub fn rotate_x(radians: f32) -> Self {
        let (s, c) = radians.sin_cos();
        Self::new([
            1.0, 0.0, 0.0, 0.0, //
            0.0, c, s, 0.0, //
            0.0, -s, c, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Rotation around +Y by `radians` (right-handed).
    pub fn rotate_y(radians: f32) -> Self {
        let (s, c) = radians.sin_cos();
        Self::new([
            c, 0.0, -s, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            s, 0.0, c, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Rotation around +Z by `radians` (right-handed).
    pub fn rotate_z(radians: f32) -> Self {
        let (s, c) = radians.sin_cos();
        Self::new([
            c, s, 0.0, 0.0, //
            -s, c, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    fn rotate_axis(index: usize, radians: f32) -> Self {
        match index {
            0 => Self::rotate_x(radians),
            1 => Self::rotate_y(radians),
            _ => Self::rotate_z(radians),
        }
    }

    /// Euler rotation. The three axis rotations are applied in the sequence
    /// named by `order`, so the last-applied axis is the outermost factor:
    /// `XYZ` builds `Rz * Ry * Rx`.
    ///
    /// # Examples
    /// ```
    /// use core::f32::consts::FRAC_PI_2;
    /// use mmath_core::{Mat4, RotateOrder, Vec4};
    /// // X first: +Y -> +Z, then Z does not move +Z.
    /// let r = Mat4::rotate(FRAC_PI_2, 0.0, FRAC_PI_2, RotateOrder::XYZ);
    /// let v = r.transform_direction(Vec4::UNIT_Y);
    /// assert!((v.z() - 1.0).abs() < 1e-6);
    /// ```
    pub fn rotate(rx: f32, ry: f32, rz: f32, order: RotateOrder) -> Self {
        let angles = [rx, ry, rz];
        let [first, second, third] = order.axes();
        Self::rotate_axis(third, angles[third])
            * Self::rotate_axis(second, angles[second])
            * Self::rotate_axis(first, angles[first])
    }

    /// [`Mat4::rotate`] with the angles packed in the xyz lanes of `radians`.
    pub fn rotate2(radians: Vec4, order: RotateOrder) -> Self {
        Self::rotate(radians.x(), radians.y(), radians.z(), order)
    }

    /// Alias of [`Mat4::rotate2`].
    pub fn from_euler(radians: Vec4, order: RotateOrder) -> Self {
        Self::rotate2(radians, order)
    }

    /// Euler rotation with `(x, y, z)` written into the translation column.
    pub fn translate_rotate(
        x: f32,
        y: f32,
        z: f32,
        rx: f32,
        ry: f32,
        rz: f32,
        order: RotateOrder,
    ) -> Self {
        Self::rotate(rx, ry, rz, order).with_col(3, Vec4::point(x, y, z))
    }

    /// [`Mat4::translate_rotate`] with vector arguments.
    pub fn translate_rotate2(translate: Vec4, radians: Vec4, order: RotateOrder) -> Self {
        Self::rotate2(radians, order).with_col(3, translate.with_w(1.0))
    }

    /// Translate · rotate · scale: scale acts first on the local axes, then
    /// the rotation, then the translation.
    #[allow(clippy::too_many_arguments)]
    pub fn trs(
        x: f32,
        y: f32,
        z: f32,
        rx: f32,
        ry: f32,
        rz: f32,
        sx: f32,
        sy: f32,
        sz: f32,
        order: RotateOrder,
    ) -> Self {
        let m = Self::translate_rotate(x, y, z, rx, ry, rz, order);
        m.with_col(0, m.col(0) * sx)
            .with_col(1, m.col(1) * sy)
            .with_col(2, m.col(2) * sz)
    }

    /// [`Mat4::trs`] with vector arguments.
    pub fn trs2(translate: Vec4, radians: Vec4, scale: Vec4, order: RotateOrder) -> Self {
        let m = Self::translate_rotate2(translate, radians, order);
        m.with_col(0, m.col(0) * scale.x())
            .with_col(1, m.col(1) * scale.y())
            .with_col(2, m.col(2) * scale.z())
    }

    /// Builds a rotation matrix from a quaternion.
    ///
    /// This simply forwards to [`Quat::to_mat4`].
    pub fn from_quat(q: &Quat) -> Self {
        q.to_mat4()
    }

    /// Multiplies the matrix with another matrix (`self * rhs`).
    ///
    /// Multiplication follows column‑major semantics (`self` on the left,
    /// `rhs` on the right), so `rhs` is applied to points first.
    ///
    /// # Examples
    /// ```
    /// use mmath_core::Mat4;
    /// let a = Mat4::identity();
    /// let b = Mat4::scale(2.0, 3.0, 4.0);
    /// assert_eq!(a.multiply(&b).to_array(), b.to_array());
    /// ```
    pub fn multiply(&self, rhs: &Self) -> Self {
        let mut out = [0.0; 16];
        for row in 0..4 {
            for col in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += self.at(row, k) * rhs.at(k, col);
                }
                out[col * 4 + row] = sum;
            }
        }
        Self::new(out)
    }

    /// Parents `self` (a child transform) under `parent` and returns the
    /// child's matrix in the parent's ambient space: `parent * self`.
    ///
    /// This is the scene-graph composition; [`Mat4::delta`] undoes it.
    ///
    /// # Examples
    /// ```
    /// use mmath_core::{Mat4, Vec4};
    /// let child = Mat4::translate(1.0, 0.0, 0.0);
    /// let parent = Mat4::scale(2.0, 2.0, 2.0);
    /// let world = child.parented(&parent);
    /// assert_eq!(world.to_translate().to_array(), [2.0, 0.0, 0.0, 0.0]);
    /// ```
    pub fn parented(&self, parent: &Self) -> Self {
        parent.multiply(self)
    }

    /// Object-space matrix of `self` (currently in world space) once it is
    /// parented under `new_parent`, so that
    /// `m.delta(&p).parented(&p) == m`.
    pub fn delta(&self, new_parent: &Self) -> Self {
        self.parented(&new_parent.inversed())
    }

    /// Swaps rows and columns.
    pub fn transposed(&self) -> Self {
        let mut out = [0.0; 16];
        for row in 0..4 {
            for col in 0..4 {
                out[row * 4 + col] = self.at(row, col);
            }
        }
        Self::new(out)
    }

    /// The 2×2 sub-determinants shared by [`Mat4::determinant`] and
    /// [`Mat4::try_inversed`]: upper pairs from rows 0/1, lower from rows 2/3.
    fn minors(&self) -> ([f32; 6], [f32; 6]) {
        let a = |r: usize, c: usize| self.at(r, c);
        let s = [
            a(0, 0) * a(1, 1) - a(1, 0) * a(0, 1),
            a(0, 0) * a(1, 2) - a(1, 0) * a(0, 2),
            a(0, 0) * a(1, 3) - a(1, 0) * a(0, 3),
            a(0, 1) * a(1, 2) - a(1, 1) * a(0, 2),
            a(0, 1) * a(1, 3) - a(1, 1) * a(0, 3),
            a(0, 2) * a(1, 3) - a(1, 2) * a(0, 3),
        ];
        let c = [
            a(2, 0) * a(3, 1) - a(3, 0) * a(2, 1),
            a(2, 0) * a(3, 2) - a(3, 0) * a(2, 2),
            a(2, 0) * a(3, 3) - a(3, 0) * a(2, 3),
            a(2, 1) * a(3, 2) - a(3, 1) * a(2, 2),
            a(2, 1) * a(3, 3) - a(3, 1) * a(2, 3),
            a(2, 2) * a(3, 3) - a(3, 2) * a(2, 3),
        ];
        (s, c)
    }

    /// Full 4×4 determinant, including the projective row.
    pub fn determinant(&self) -> f32 {
        let (s, c) = self.minors();
        s[0] * c[5] - s[1] * c[4] + s[2] * c[3] + s[3] * c[2] - s[4] * c[1] + s[5] * c[0]
    }

    /// General inverse; `None` when the determinant is zero or not finite.
    #[allow(clippy::float_cmp)]
    pub fn try_inversed(&self) -> Option<Self> {
        let (s, c) = self.minors();
        let det =
            s[0] * c[5] - s[1] * c[4] + s[2] * c[3] + s[3] * c[2] - s[4] * c[1] + s[5] * c[0];
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let inv = 1.0 / det;
        let a = |r: usize, col: usize| self.at(r, col);

        let mut out = Self::new([0.0; 16]);
        out.set(0, 0, (a(1, 1) * c[5] - a(1, 2) * c[4] + a(1, 3) * c[3]) * inv);
        out.set(0, 1, (-a(0, 1) * c[5] + a(0, 2) * c[4] - a(0, 3) * c[3]) * inv);
        out.set(0, 2, (a(3, 1) * s[5] - a(3, 2) * s[4] + a(3, 3) * s[3]) * inv);
        out.set(0, 3, (-a(2, 1) * s[5] + a(2, 2) * s[4] - a(2, 3) * s[3]) * inv);

        out.set(1, 0, (-a(1, 0) * c[5] + a(1, 2) * c[2] - a(1, 3) * c[1]) * inv);
        out.set(1, 1, (a(0, 0) * c[5] - a(0, 2) * c[2] + a(0, 3) * c[1]) * inv);
        out.set(1, 2, (-a(3, 0) * s[5] + a(3, 2) * s[2] - a(3, 3) * s[1]) * inv);
        out.set(1, 3, (a(2, 0) * s[5] - a(2, 2) * s[2] + a(2, 3) * s[1]) * inv);

        out.set(2, 0, (a(1, 0) * c[4] - a(1, 1) * c[2] + a(1, 3) * c[0]) * inv);
        out.set(2, 1, (-a(0, 0) * c[4] + a(0, 1) * c[2] - a(0, 3) * c[0]) * inv);
        out.set(2, 2, (a(3, 0) * s[4] - a(3, 1) * s[2] + a(3, 3) * s[0]) * inv);
        out.set(2, 3, (-a(2, 0) * s[4] + a(2, 1) * s[2] - a(2, 3) * s[0]) * inv);

        out.set(3, 0, (-a(1, 0) * c[3] + a(1, 1) * c[1] - a(1, 2) * c[0]) * inv);
        out.set(3, 1, (a(0, 0) * c[3] - a(0, 1) * c[1] + a(0, 2) * c[0]) * inv);
        out.set(3, 2, (-a(3, 0) * s[3] + a(3, 1) * s[1] - a(3, 2) * s[0]) * inv);
        out.set(3, 3, (a(2, 0) * s[3] - a(2, 1) * s[1] + a(2, 2) * s[0]) * inv);
        Some(out)
    }

    /// General inverse, correct for any invertible matrix (shear and
    /// projective rows included). A singular input yields non-finite lanes;
    /// use [`Mat4::try_inversed`] to detect that case.
    pub fn inversed(&self) -> Self {
        self.try_inversed()
            .unwrap_or_else(|| Self::new([f32::NAN; 16]))
    }

    /// Inverse for affine rotation × (possibly non-uniform) scale matrices
    /// without shear. Cheaper than [`Mat4::inversed`] but wrong for sheared or
    /// projective input.
    ///
    /// Each basis column `c_i = s_i * r_i` inverts to the row `c_i / |c_i|²`;
    /// a near-zero column divides by one instead.
    pub fn inversed_fast(&self) -> Self {
        let t = self.col(3);
        let mut out = Self::IDENTITY;
        for i in 0..3 {
            let c = self.col(i);
            let sqr = c.sqr_magnitude3();
            let inv = if sqr < 1e-8 { 1.0 } else { 1.0 / sqr };
            for j in 0..3 {
                out.set(i, j, c.lane(j) * inv);
            }
            out.set(i, 3, -c.dot3(t) * inv);
        }
        out
    }

    /// Inverse for rigid transforms (orthonormal basis plus translation):
    /// the basis is transposed and the translation becomes `-Rᵀ t`.
    pub fn inversed_fast_no_scale(&self) -> Self {
        let t = self.col(3);
        let mut out = Self::IDENTITY;
        for i in 0..3 {
            let c = self.col(i);
            for j in 0..3 {
                out.set(i, j, c.lane(j));
            }
            out.set(i, 3, -c.dot3(t));
        }
        out
    }

    /// Transforms a point (`w = 1`, no perspective divide) and returns the
    /// resulting xyz with `w = 0`.
    pub fn vector_transform(&self, point: Vec4) -> Vec4 {
        let p = point.with_w(1.0);
        let r = self.col(0) * p.x() + self.col(1) * p.y() + self.col(2) * p.z() + self.col(3);
        r.masked(3)
    }

    /// Transforms a direction (ignores translation, `w = 0`).
    pub fn transform_direction(&self, direction: Vec4) -> Vec4 {
        let r = self.col(0) * direction.x()
            + self.col(1) * direction.y()
            + self.col(2) * direction.z();
        r.masked(3)
    }

    /// Translation column as a direction (`w = 0`).
    pub fn to_translate(&self) -> Vec4 {
        self.col(3).masked(3)
    }

    /// Per-axis scale magnitudes `(|col0|, |col1|, |col2|, 0)`.
    ///
    /// Always non-negative: a mirrored basis cannot be told apart from a
    /// rotated one by column length alone.
    pub fn to_scale(&self) -> Vec4 {
        Vec4::direction(
            self.col(0).magnitude3(),
            self.col(1).magnitude3(),
            self.col(2).magnitude3(),
        )
    }

    /// Copy with column 3 reset to `(0, 0, 0, 1)`, isolating the linear
    /// block.
    pub fn to_top33(&self) -> Self {
        self.with_col(3, Vec4::UNIT_W)
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<[f32; 16]> for Mat4 {
    fn from(value: [f32; 16]) -> Self {
        Self { data: value }
    }
}

impl From<Mat4> for [f32; 16] {
    fn from(value: Mat4) -> Self {
        value.data
    }
}

/// Column-vector product `self * rhs`: `rhs` acts on points first.
///
/// # Convention
/// `parent * child` composes a child under its parent, so `a * b` equals
/// `b.parented(&a)`. Scene-graph code that passes `(child, parent)` should
/// call [`Mat4::parented`] (exported as `mmath_mat44_mul`) instead.
impl core::ops::Mul for Mat4 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        self.multiply(&rhs)
    }
}

impl core::ops::MulAssign for Mat4 {
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.multiply(&rhs);
    }
}
