// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::fmt;
use core::ops::{BitAnd, BitOr, BitOrAssign, Sub};

use crate::math::{Mat4, Vec4};
use crate::MathError;

/// Set of structural properties of a transform's basis.
///
/// Used both as a request (which properties to check or enforce) and as a
/// result ([`Mat4::validate`] returns the requested properties that failed).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidationFlags(u32);

impl ValidationFlags {
    /// Empty set. As a [`Mat4::validate`] result: nothing failed.
    pub const OK: Self = Self(0);
    /// Basis columns are pairwise perpendicular.
    pub const ORTHOGONAL: Self = Self(1);
    /// Basis columns have unit length.
    pub const NORMALIZED: Self = Self(1 << 1);
    /// Basis columns share one length.
    pub const UNIFORM: Self = Self(1 << 2);
    /// Basis is right-handed (positive triple product).
    pub const NOT_FLIPPED: Self = Self(1 << 3);
    /// Row 3 is `(0, 0, 0, 1)`.
    pub const FOURTH_ROW: Self = Self(1 << 4);
    /// Every defined flag.
    pub const ALL: Self = Self(0b1_1111);

    const NAMES: [(Self, &'static str); 5] = [
        (Self::ORTHOGONAL, "ORTHOGONAL"),
        (Self::NORMALIZED, "NORMALIZED"),
        (Self::UNIFORM, "UNIFORM"),
        (Self::NOT_FLIPPED, "NOT_FLIPPED"),
        (Self::FOURTH_ROW, "FOURTH_ROW"),
    ];

    /// Raw bit pattern.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Decodes a raw bit pattern, rejecting undefined bits.
    pub const fn from_bits(bits: u32) -> Result<Self, MathError> {
        if bits & !Self::ALL.0 == 0 {
            Ok(Self(bits))
        } else {
            Err(MathError::InvalidValidationFlags(bits))
        }
    }

    /// `true` when every flag of `other` is set in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// `true` for [`ValidationFlags::OK`].
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for ValidationFlags {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for ValidationFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for ValidationFlags {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

/// Set difference.
impl Sub for ValidationFlags {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 & !rhs.0)
    }
}

impl TryFrom<u32> for ValidationFlags {
    type Error = MathError;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        Self::from_bits(bits)
    }
}

impl From<ValidationFlags> for u32 {
    fn from(flags: ValidationFlags) -> Self {
        flags.bits()
    }
}

/// `OK`, or the set flag names joined with `|`.
impl fmt::Display for ValidationFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("OK");
        }
        let mut first = true;
        for (flag, name) in Self::NAMES {
            if self.contains(flag) {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl Mat4 {
    /// Checks the requested properties of the basis columns and returns the
    /// ones that do **not** hold within `epsilon`. An empty result
    /// ([`ValidationFlags::OK`]) means the matrix passed.
    ///
    /// Lengths are compared squared; orthogonality compares raw dot products,
    /// so `epsilon` scales with the basis magnitudes.
    ///
    /// # Examples
    /// ```
    /// use mmath_core::{Mat4, ValidationFlags};
    /// let m = Mat4::scale(1.0, 2.0, 1.0);
    /// let failed = m.validate(ValidationFlags::ALL, 1e-5);
    /// assert_eq!(failed, ValidationFlags::NORMALIZED | ValidationFlags::UNIFORM);
    /// ```
    pub fn validate(&self, flags: ValidationFlags, epsilon: f32) -> ValidationFlags {
        let [c0, c1, c2] = [self.col(0), self.col(1), self.col(2)];
        let near = |v: f32, target: f32| (v - target).abs() < epsilon;
        let mut failed = ValidationFlags::OK;

        if flags.contains(ValidationFlags::ORTHOGONAL)
            && !(near(c0.dot3(c1), 0.0) && near(c1.dot3(c2), 0.0) && near(c2.dot3(c0), 0.0))
        {
            failed |= ValidationFlags::ORTHOGONAL;
        }

        let sqr = [c0.sqr_magnitude3(), c1.sqr_magnitude3(), c2.sqr_magnitude3()];
        if flags.contains(ValidationFlags::NORMALIZED) && !sqr.iter().all(|&s| near(s, 1.0)) {
            failed |= ValidationFlags::NORMALIZED;
        }
        if flags.contains(ValidationFlags::UNIFORM) && !(near(sqr[1], sqr[0]) && near(sqr[2], sqr[0]))
        {
            failed |= ValidationFlags::UNIFORM;
        }

        if flags.contains(ValidationFlags::NOT_FLIPPED) && c0.cross3(c1).dot3(c2) <= 0.0 {
            failed |= ValidationFlags::NOT_FLIPPED;
        }

        if flags.contains(ValidationFlags::FOURTH_ROW) {
            let row = self.row(3);
            let expected = Vec4::UNIT_W;
            if !(0..4).all(|i| near(row.lane(i), expected.lane(i))) {
                failed |= ValidationFlags::FOURTH_ROW;
            }
        }

        failed
    }

    /// The requested properties that hold: `flags` minus
    /// [`Mat4::validate`].
    pub fn satisfied(&self, flags: ValidationFlags, epsilon: f32) -> ValidationFlags {
        flags - self.validate(flags, epsilon)
    }

    /// Enforces the requested properties, in this order:
    ///
    /// 1. `ORTHOGONAL`: Gram-Schmidt from column 0. Each column keeps its
    ///    length and column 2 keeps its side of the `c0, c1` plane.
    /// 2. `NORMALIZED`: unit columns (fallbacks `UNIT_X/Y/Z`). Otherwise
    ///    `UNIFORM`: every column rescaled to the mean length.
    /// 3. `NOT_FLIPPED`: column 2 negated when the basis is left-handed.
    /// 4. `FOURTH_ROW`: row 3 reset to `(0, 0, 0, 1)`.
    ///
    /// Row 3 is only touched by `FOURTH_ROW`.
    pub fn make_valid(&self, flags: ValidationFlags) -> Self {
        let fourth = self.row(3);
        let mut cols = [self.col(0), self.col(1), self.col(2)].map(|c| c.masked(3));
        let fallbacks = [Vec4::UNIT_X, Vec4::UNIT_Y, Vec4::UNIT_Z];

        if flags.contains(ValidationFlags::ORTHOGONAL) {
            let lengths = cols.map(Vec4::magnitude3);
            let n0 = cols[0].normalized3(Vec4::UNIT_X);
            let n1 = (cols[1] - n0 * n0.dot3(cols[1])).normalized3(n0.perpendicular3());
            let mut n2 = n0.cross3(n1);
            if n2.dot3(cols[2]) < 0.0 {
                n2 = -n2;
            }
            cols = [n0 * lengths[0], n1 * lengths[1], n2 * lengths[2]];
        }

        if flags.contains(ValidationFlags::NORMALIZED) {
            for (col, fallback) in cols.iter_mut().zip(fallbacks) {
                *col = col.normalized3(fallback);
            }
        } else if flags.contains(ValidationFlags::UNIFORM) {
            let mean = cols.iter().map(|c| c.magnitude3()).sum::<f32>() / 3.0;
            for (col, fallback) in cols.iter_mut().zip(fallbacks) {
                *col = col.normalized3(fallback) * mean;
            }
        }

        if flags.contains(ValidationFlags::NOT_FLIPPED) && cols[0].cross3(cols[1]).dot3(cols[2]) < 0.0
        {
            cols[2] = -cols[2];
        }

        let row3 = if flags.contains(ValidationFlags::FOURTH_ROW) {
            Vec4::UNIT_W
        } else {
            fourth
        };
        Self::from_cols(
            cols[0].with_w(row3.x()),
            cols[1].with_w(row3.y()),
            cols[2].with_w(row3.z()),
            self.col(3).with_w(row3.w()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::RotateOrder;

    #[test]
    fn from_bits_rejects_undefined_bits() {
        assert_eq!(ValidationFlags::from_bits(0b1_1111), Ok(ValidationFlags::ALL));
        assert_eq!(
            ValidationFlags::try_from(32),
            Err(MathError::InvalidValidationFlags(32))
        );
    }

    #[test]
    fn display_joins_names() {
        assert_eq!(ValidationFlags::OK.to_string(), "OK");
        let f = ValidationFlags::UNIFORM | ValidationFlags::FOURTH_ROW;
        assert_eq!(f.to_string(), "UNIFORM|FOURTH_ROW");
    }

    #[test]
    fn rigid_transform_passes_everything() {
        let m = Mat4::translate_rotate(1.0, 2.0, 3.0, 0.3, -0.7, 1.1, RotateOrder::YXZ);
        assert!(m.validate(ValidationFlags::ALL, 1e-5).is_empty());
        assert_eq!(m.satisfied(ValidationFlags::ALL, 1e-5), ValidationFlags::ALL);
    }

    #[test]
    fn mirrored_and_projective_inputs_fail_their_flags() {
        let flipped = Mat4::scale(1.0, 1.0, -1.0);
        assert_eq!(
            flipped.validate(ValidationFlags::ALL, 1e-5),
            ValidationFlags::NOT_FLIPPED
        );
        let proj = Mat4::perspective_y(1.0, 1.0, 0.1, 100.0);
        assert!(proj
            .validate(ValidationFlags::FOURTH_ROW, 1e-5)
            .contains(ValidationFlags::FOURTH_ROW));
    }

    #[test]
    fn make_valid_orthogonal_keeps_lengths_and_handedness() {
        let m = Mat4::from_vectors(
            Vec4::direction(2.0, 0.0, 0.0),
            Vec4::direction(1.0, 3.0, 0.0),
            Vec4::direction(0.5, 0.5, 4.0),
            Vec4::point(7.0, 8.0, 9.0),
        );
        let fixed = m.make_valid(ValidationFlags::ORTHOGONAL);
        assert!(fixed.validate(ValidationFlags::ORTHOGONAL, 1e-5).is_empty());
        assert!((fixed.col(1).magnitude3() - 10f32.sqrt()).abs() < 1e-5);
        assert!(fixed.col(2).z() > 0.0);
        assert_eq!(fixed.col(3), m.col(3));
    }

    #[test]
    fn make_valid_prefers_normalized_over_uniform() {
        let m = Mat4::scale(2.0, 3.0, 4.0);
        let flags = ValidationFlags::NORMALIZED | ValidationFlags::UNIFORM;
        assert!(m.make_valid(flags).validate(flags, 1e-5).is_empty());
        let uniform = m.make_valid(ValidationFlags::UNIFORM);
        assert!((uniform.at(0, 0) - 3.0).abs() < 1e-6);
    }
}
