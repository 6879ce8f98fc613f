// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::fmt;

use crate::math::Vec4;
use crate::MathError;

/// Signed principal axis.
///
/// Encoded as three bits: bit 2 is the sign (set = negative), bits 0..1 the
/// axis index (`X = 0`, `Y = 1`, `Z = 2`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u32)]
pub enum Axis {
    /// +X
    X = 0b000,
    /// +Y
    Y = 0b001,
    /// +Z
    Z = 0b010,
    /// -X
    NegX = 0b100,
    /// -Y
    NegY = 0b101,
    /// -Z
    NegZ = 0b110,
}

impl Axis {
    /// Packed encoding.
    pub const fn raw(self) -> u32 {
        self as u32
    }

    /// Decodes a packed encoding.
    pub const fn from_raw(raw: u32) -> Result<Self, MathError> {
        match raw {
            0b000 => Ok(Self::X),
            0b001 => Ok(Self::Y),
            0b010 => Ok(Self::Z),
            0b100 => Ok(Self::NegX),
            0b101 => Ok(Self::NegY),
            0b110 => Ok(Self::NegZ),
            _ => Err(MathError::InvalidAxis(raw)),
        }
    }

    /// Principal axis index, `0..=2`.
    pub const fn index(self) -> usize {
        (self.raw() & 0b11) as usize
    }

    /// `true` for `NegX`, `NegY`, `NegZ`.
    pub const fn is_negative(self) -> bool {
        self.raw() & 0b100 != 0
    }

    /// `1.0` or `-1.0`.
    pub const fn sign(self) -> f32 {
        if self.is_negative() {
            -1.0
        } else {
            1.0
        }
    }

    /// Signed unit direction (`w = 0`).
    pub const fn unit(self) -> Vec4 {
        match self {
            Self::X => Vec4::UNIT_X,
            Self::Y => Vec4::UNIT_Y,
            Self::Z => Vec4::UNIT_Z,
            Self::NegX => Vec4::direction(-1.0, 0.0, 0.0),
            Self::NegY => Vec4::direction(0.0, -1.0, 0.0),
            Self::NegZ => Vec4::direction(0.0, 0.0, -1.0),
        }
    }

    /// Name as written in code, e.g. `"NegZ"`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::X => "X",
            Self::Y => "Y",
            Self::Z => "Z",
            Self::NegX => "NegX",
            Self::NegY => "NegY",
            Self::NegZ => "NegZ",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u32> for Axis {
    type Error = MathError;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        Self::from_raw(raw)
    }
}

impl From<Axis> for u32 {
    fn from(axis: Axis) -> Self {
        axis.raw()
    }
}
