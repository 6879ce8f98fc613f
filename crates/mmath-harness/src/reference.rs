// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Independent `f64` transform math used as the comparison oracle.
//!
//! Matrices here follow the row-vector convention: a point is a row vector
//! multiplied on the left (`p' = p · M`), basis vectors are rows and the
//! translation is row 3. Flattening rows in order yields the same lane
//! layout as the kernel's column-major storage, so outputs compare lane for
//! lane without any transposition.

use crate::oracle::{check_arity, order_index, EvalError, Oracle};
use crate::Operation;

/// Axis sequence `[first, second, third]` per host rotate-order index.
const SEQUENCES: [[usize; 3]; 6] = [
    [0, 1, 2],
    [1, 2, 0],
    [2, 0, 1],
    [0, 2, 1],
    [1, 0, 2],
    [2, 1, 0],
];

/// Row-vector 4×4 matrix in `f64`, addressed `m(row, col)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefMatrix {
    m: [[f64; 4]; 4],
}

impl RefMatrix {
    /// The identity matrix.
    pub const IDENTITY: Self = Self {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Builds a matrix from its four rows.
    pub const fn from_rows(m: [[f64; 4]; 4]) -> Self {
        Self { m }
    }

    /// Reads 16 lanes, row after row. Missing lanes read as zero.
    pub fn from_lanes(lanes: &[f64]) -> Self {
        let mut m = [[0.0; 4]; 4];
        for (i, v) in lanes.iter().take(16).enumerate() {
            m[i / 4][i % 4] = *v;
        }
        Self { m }
    }

    /// Flat lanes, row after row.
    pub fn to_lanes(&self) -> Vec<f64> {
        self.m.iter().flatten().copied().collect()
    }

    /// Element at `row`, `col`.
    pub const fn m(&self, row: usize, col: usize) -> f64 {
        self.m[row][col]
    }

    /// Pure translation.
    pub const fn translation(x: f64, y: f64, z: f64) -> Self {
        let mut out = Self::IDENTITY;
        out.m[3] = [x, y, z, 1.0];
        out
    }

    /// Pure per-axis scale.
    pub const fn scaling(x: f64, y: f64, z: f64) -> Self {
        let mut out = Self::IDENTITY;
        out.m[0][0] = x;
        out.m[1][1] = y;
        out.m[2][2] = z;
        out
    }

    /// Right-handed rotation of `radians` about principal axis `axis`.
    pub fn axis_rotation(axis: usize, radians: f64) -> Self {
        let (s, c) = radians.sin_cos();
        let (i, j) = match axis {
            0 => (1, 2),
            1 => (2, 0),
            _ => (0, 1),
        };
        let mut out = Self::IDENTITY;
        out.m[i][i] = c;
        out.m[i][j] = s;
        out.m[j][i] = -s;
        out.m[j][j] = c;
        out
    }

    /// Euler rotation applying the axes in the sequence of host order
    /// `order` (`0..=5`).
    pub fn euler(radians: [f64; 3], order: usize) -> Self {
        let [first, second, third] = SEQUENCES[order % 6];
        Self::axis_rotation(first, radians[first])
            .mul(&Self::axis_rotation(second, radians[second]))
            .mul(&Self::axis_rotation(third, radians[third]))
    }

    /// Scale, then Euler rotation, then translation.
    pub fn trs(translate: [f64; 3], radians: [f64; 3], scale: [f64; 3], order: usize) -> Self {
        let mut out = Self::euler(radians, order);
        for (row, s) in out.m.iter_mut().zip(scale) {
            for v in row.iter_mut().take(3) {
                *v *= s;
            }
        }
        out.m[3] = [translate[0], translate[1], translate[2], 1.0];
        out
    }

    /// Symmetric perspective frustum from a horizontal field of view. Depth
    /// maps `near` to `+1` and `far` to `-1`.
    pub fn perspective_x(fov_x: f64, aspect: f64, near: f64, far: f64) -> Self {
        let half_w = (fov_x * 0.5).tan() * near;
        let half_h = half_w / aspect;
        let depth = far - near;
        Self::from_rows([
            [near / half_w, 0.0, 0.0, 0.0],
            [0.0, near / half_h, 0.0, 0.0],
            [0.0, 0.0, (far + near) / depth, -1.0],
            [0.0, 0.0, 2.0 * far * near / depth, 0.0],
        ])
    }

    /// `self · rhs`: `self` applies first.
    #[must_use]
    pub fn mul(&self, rhs: &Self) -> Self {
        let mut out = [[0.0; 4]; 4];
        for (r, row) in out.iter_mut().enumerate() {
            for (c, v) in row.iter_mut().enumerate() {
                *v = (0..4).map(|k| self.m[r][k] * rhs.m[k][c]).sum();
            }
        }
        Self { m: out }
    }

    /// Rows and columns swapped.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut out = [[0.0; 4]; 4];
        for (r, row) in out.iter_mut().enumerate() {
            for (c, v) in row.iter_mut().enumerate() {
                *v = self.m[c][r];
            }
        }
        Self { m: out }
    }

    /// Determinant by cofactor expansion along row 0.
    pub fn determinant(&self) -> f64 {
        fn det3(m: [[f64; 3]; 3]) -> f64 {
            m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
                - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
                + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
        }

        let mut det = 0.0;
        let mut sign = 1.0;
        for skip in 0..4 {
            let mut minor = [[0.0; 3]; 3];
            for (r, row) in minor.iter_mut().enumerate() {
                let cols = (0..4).filter(|&c| c != skip);
                for (dst, c) in row.iter_mut().zip(cols) {
                    *dst = self.m[r + 1][c];
                }
            }
            det += sign * self.m[0][skip] * det3(minor);
            sign = -sign;
        }
        det
    }

    /// Gauss-Jordan inverse with partial pivoting; `None` when singular.
    pub fn inverse(&self) -> Option<Self> {
        let mut a = self.m;
        let mut inv = Self::IDENTITY.m;
        for col in 0..4 {
            let pivot = (col..4).max_by(|&x, &y| a[x][col].abs().total_cmp(&a[y][col].abs()))?;
            if a[pivot][col].abs() < 1e-12 {
                return None;
            }
            a.swap(col, pivot);
            inv.swap(col, pivot);
            let p = a[col][col];
            for k in 0..4 {
                a[col][k] /= p;
                inv[col][k] /= p;
            }
            for r in 0..4 {
                if r == col {
                    continue;
                }
                let factor = a[r][col];
                for k in 0..4 {
                    a[r][k] -= factor * a[col][k];
                    inv[r][k] -= factor * inv[col][k];
                }
            }
        }
        Some(Self { m: inv })
    }

    /// Transforms a point (`w = 1`) and returns `[x, y, z, 0]`.
    pub fn transform_point(&self, p: [f64; 3]) -> [f64; 4] {
        let mut out = [0.0; 4];
        for (c, v) in out.iter_mut().take(3).enumerate() {
            *v = p[0] * self.m[0][c] + p[1] * self.m[1][c] + p[2] * self.m[2][c] + self.m[3][c];
        }
        out
    }

    /// Euclidean length of the xyz part of row `row`.
    pub fn row_length(&self, row: usize) -> f64 {
        let r = self.m[row];
        (r[0] * r[0] + r[1] * r[1] + r[2] * r[2]).sqrt()
    }

    /// Rotation part only: basis rows normalized, translation dropped.
    #[must_use]
    pub fn orthonormal_basis(&self) -> Self {
        let mut out = Self::IDENTITY;
        for row in 0..3 {
            let len = self.row_length(row);
            if len > 0.0 {
                for c in 0..3 {
                    out.m[row][c] = self.m[row][c] / len;
                }
            }
        }
        out
    }
}

/// The `f64` row-vector implementation as an [`Oracle`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ReferenceOracle;

fn triple(lanes: &[f64]) -> [f64; 3] {
    [lanes[0], lanes[1], lanes[2]]
}

fn nan_matrix() -> Vec<f64> {
    vec![f64::NAN; 16]
}

impl Oracle for ReferenceOracle {
    fn name(&self) -> &'static str {
        "reference"
    }

    fn evaluate(&self, op: Operation, x: &[f64]) -> Result<Vec<f64>, EvalError> {
        check_arity(op, x)?;
        let order = |lane: usize| order_index(op, x[lane]);
        let mat = |at: usize| RefMatrix::from_lanes(&x[at..at + 16]);
        let out = match op {
            Operation::Mat44Identity => RefMatrix::IDENTITY.to_lanes(),
            Operation::Mat44Translate => RefMatrix::translation(x[0], x[1], x[2]).to_lanes(),
            Operation::Mat44RotateX => RefMatrix::axis_rotation(0, x[0]).to_lanes(),
            Operation::Mat44RotateY => RefMatrix::axis_rotation(1, x[0]).to_lanes(),
            Operation::Mat44RotateZ => RefMatrix::axis_rotation(2, x[0]).to_lanes(),
            Operation::Mat44Rotate
            | Operation::Mat44Rotate2
            | Operation::QuatToMat44RoundTrip
            | Operation::QuatFromEuler => RefMatrix::euler(triple(x), order(3)?).to_lanes(),
            Operation::Mat44Scale | Operation::Mat44Scale2 => {
                RefMatrix::scaling(x[0], x[1], x[2]).to_lanes()
            }
            Operation::Mat44TranslateRotate | Operation::Mat44TranslateRotate2 => {
                RefMatrix::trs(triple(x), triple(&x[3..]), [1.0; 3], order(6)?).to_lanes()
            }
            Operation::Mat44Trs | Operation::Mat44Trs2 => {
                RefMatrix::trs(triple(x), triple(&x[3..]), triple(&x[6..]), order(9)?).to_lanes()
            }
            Operation::Mat44Mul => mat(0).mul(&mat(16)).to_lanes(),
            Operation::Mat44Inversed
            | Operation::Mat44InversedFast
            | Operation::Mat44InversedFastNoScale => {
                mat(0).inverse().map_or_else(nan_matrix, |m| m.to_lanes())
            }
            Operation::Mat44Transposed => mat(0).transpose().to_lanes(),
            Operation::Mat44Determinant => vec![mat(0).determinant()],
            Operation::Mat44VectorTransform => mat(0).transform_point(triple(&x[16..])).to_vec(),
            Operation::Mat44Delta => match mat(16).inverse() {
                Some(parent_inv) => mat(0).mul(&parent_inv).to_lanes(),
                None => nan_matrix(),
            },
            Operation::Mat44FromVectors => RefMatrix::from_lanes(x).to_lanes(),
            Operation::Mat44ToTop33 => {
                let mut m = mat(0);
                m.m[3] = [0.0, 0.0, 0.0, 1.0];
                m.to_lanes()
            }
            Operation::Mat44ToTranslate => vec![x[12], x[13], x[14], 0.0],
            Operation::Mat44ToScale => {
                let m = mat(0);
                vec![m.row_length(0), m.row_length(1), m.row_length(2), 0.0]
            }
            Operation::Mat44ToEuler => {
                order(16)?;
                mat(0).orthonormal_basis().to_lanes()
            }
            Operation::Mat44PerspectiveX => {
                RefMatrix::perspective_x(x[0], x[1], x[2], x[3]).to_lanes()
            }
        };
        Ok(out)
    }
}
