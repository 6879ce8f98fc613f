// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::fmt;
use core::str::FromStr;

/// Flat input/output lane counts of one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity {
    /// Number of input values.
    pub inputs: usize,
    /// Number of output values.
    pub outputs: usize,
}

const fn arity(inputs: usize, outputs: usize) -> Arity {
    Arity { inputs, outputs }
}

/// Every operation the harness cross-checks.
///
/// Inputs and outputs are flat number arrays. Matrices are 16 lanes, column
/// after column; a rotation order travels as its host index (0..=5) in the
/// last input lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Operation {
    /// `[] -> m`
    Mat44Identity,
    /// `[x, y, z] -> m`
    Mat44Translate,
    /// `[radians] -> m`
    Mat44RotateX,
    /// `[radians] -> m`
    Mat44RotateY,
    /// `[radians] -> m`
    Mat44RotateZ,
    /// `[rx, ry, rz, order] -> m`
    Mat44Rotate,
    /// `[rx, ry, rz, order] -> m` through the vector overload.
    Mat44Rotate2,
    /// `[sx, sy, sz] -> m`
    Mat44Scale,
    /// `[sx, sy, sz] -> m` through the vector overload.
    Mat44Scale2,
    /// `[x, y, z, rx, ry, rz, order] -> m`
    Mat44TranslateRotate,
    /// `[x, y, z, rx, ry, rz, order] -> m` through the vector overload.
    Mat44TranslateRotate2,
    /// `[x, y, z, rx, ry, rz, sx, sy, sz, order] -> m`
    Mat44Trs,
    /// `[x, y, z, rx, ry, rz, sx, sy, sz, order] -> m` through the vector overload.
    Mat44Trs2,
    /// `[child m, parent m] -> child parented under parent`
    Mat44Mul,
    /// `m -> m⁻¹`
    Mat44Inversed,
    /// `m -> m⁻¹` (no shear)
    Mat44InversedFast,
    /// `m -> m⁻¹` (rigid)
    Mat44InversedFastNoScale,
    /// `m -> mᵀ`
    Mat44Transposed,
    /// `m -> [det]`
    Mat44Determinant,
    /// `[m, x, y, z] -> [x', y', z', 0]`
    Mat44VectorTransform,
    /// `[world m, parent m] -> local m`
    Mat44Delta,
    /// `[c0, c1, c2, t] -> m`
    Mat44FromVectors,
    /// `m -> m` with the translation column reset
    Mat44ToTop33,
    /// `m -> [tx, ty, tz, 0]`
    Mat44ToTranslate,
    /// `m -> [sx, sy, sz, 0]`
    Mat44ToScale,
    /// `[m, order] -> rotation recomposed from the extracted angles`
    Mat44ToEuler,
    /// `[fov_x, aspect, near, far] -> m`
    Mat44PerspectiveX,
    /// `[rx, ry, rz, order] -> rotation after a matrix/quaternion round trip`
    QuatToMat44RoundTrip,
    /// `[rx, ry, rz, order] -> rotation of the Euler-built quaternion`
    QuatFromEuler,
}

impl Operation {
    /// All operations in fixture order.
    pub const ALL: [Self; 29] = [
        Self::Mat44Identity,
        Self::Mat44Translate,
        Self::Mat44RotateX,
        Self::Mat44RotateY,
        Self::Mat44RotateZ,
        Self::Mat44Rotate,
        Self::Mat44Rotate2,
        Self::Mat44Scale,
        Self::Mat44Scale2,
        Self::Mat44TranslateRotate,
        Self::Mat44TranslateRotate2,
        Self::Mat44Trs,
        Self::Mat44Trs2,
        Self::Mat44Mul,
        Self::Mat44Inversed,
        Self::Mat44InversedFast,
        Self::Mat44InversedFastNoScale,
        Self::Mat44Transposed,
        Self::Mat44Determinant,
        Self::Mat44VectorTransform,
        Self::Mat44Delta,
        Self::Mat44FromVectors,
        Self::Mat44ToTop33,
        Self::Mat44ToTranslate,
        Self::Mat44ToScale,
        Self::Mat44ToEuler,
        Self::Mat44PerspectiveX,
        Self::QuatToMat44RoundTrip,
        Self::QuatFromEuler,
    ];

    /// Name used as the fixture key.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mat44Identity => "Mat44Identity",
            Self::Mat44Translate => "Mat44Translate",
            Self::Mat44RotateX => "Mat44RotateX",
            Self::Mat44RotateY => "Mat44RotateY",
            Self::Mat44RotateZ => "Mat44RotateZ",
            Self::Mat44Rotate => "Mat44Rotate",
            Self::Mat44Rotate2 => "Mat44Rotate2",
            Self::Mat44Scale => "Mat44Scale",
            Self::Mat44Scale2 => "Mat44Scale2",
            Self::Mat44TranslateRotate => "Mat44TranslateRotate",
            Self::Mat44TranslateRotate2 => "Mat44TranslateRotate2",
            Self::Mat44Trs => "Mat44TRS",
            Self::Mat44Trs2 => "Mat44TRS2",
            Self::Mat44Mul => "Mat44Mul",
            Self::Mat44Inversed => "Mat44Inversed",
            Self::Mat44InversedFast => "Mat44InversedFast",
            Self::Mat44InversedFastNoScale => "Mat44InversedFastNoScale",
            Self::Mat44Transposed => "Mat44Transposed",
            Self::Mat44Determinant => "Mat44Determinant",
            Self::Mat44VectorTransform => "Mat44VectorTransform",
            Self::Mat44Delta => "Mat44Delta",
            Self::Mat44FromVectors => "Mat44FromVectors",
            Self::Mat44ToTop33 => "Mat44ToTop33",
            Self::Mat44ToTranslate => "Mat44ToTranslate",
            Self::Mat44ToScale => "Mat44ToScale",
            Self::Mat44ToEuler => "Mat44ToEuler",
            Self::Mat44PerspectiveX => "Mat44PerspectiveX",
            Self::QuatToMat44RoundTrip => "QuatToMat44RoundTrip",
            Self::QuatFromEuler => "QuatFromEuler",
        }
    }

    /// Looks an operation up by its fixture name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.name() == name)
    }

    /// Expected flat lane counts.
    pub const fn arity(self) -> Arity {
        match self {
            Self::Mat44Identity => arity(0, 16),
            Self::Mat44Translate | Self::Mat44Scale | Self::Mat44Scale2 => arity(3, 16),
            Self::Mat44RotateX | Self::Mat44RotateY | Self::Mat44RotateZ => arity(1, 16),
            Self::Mat44Rotate
            | Self::Mat44Rotate2
            | Self::Mat44PerspectiveX
            | Self::QuatToMat44RoundTrip
            | Self::QuatFromEuler => arity(4, 16),
            Self::Mat44TranslateRotate | Self::Mat44TranslateRotate2 => arity(7, 16),
            Self::Mat44Trs | Self::Mat44Trs2 => arity(10, 16),
            Self::Mat44Mul | Self::Mat44Delta => arity(32, 16),
            Self::Mat44Inversed
            | Self::Mat44InversedFast
            | Self::Mat44InversedFastNoScale
            | Self::Mat44Transposed
            | Self::Mat44FromVectors
            | Self::Mat44ToTop33 => arity(16, 16),
            Self::Mat44Determinant => arity(16, 1),
            Self::Mat44VectorTransform => arity(19, 4),
            Self::Mat44ToTranslate | Self::Mat44ToScale => arity(16, 4),
            Self::Mat44ToEuler => arity(17, 16),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown operation name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown operation: {0}")]
pub struct UnknownOperation(
    /// Name that failed to parse.
    pub String,
);

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownOperation(s.to_owned()))
    }
}
