// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::fmt;

use crate::MathError;

/// Order in which the three principal-axis rotations of an Euler triple are
/// applied.
///
/// Each discriminant packs three 2-bit axis indices (`X = 0`, `Y = 1`,
/// `Z = 2`), first-applied axis in the high bits: `XYZ` is `0b00_01_10`.
/// No `Default` is provided; Euler composition has no canonical order.
///
/// Hosts usually number the orders `0..=5` instead (`XYZ, YZX, ZXY, XZY, YXZ,
/// ZYX`); [`RotateOrder::from_index`] and [`RotateOrder::index`] map that
/// numbering. The two mappings are distinct and both are checked.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u32)]
pub enum RotateOrder {
    /// X, then Y, then Z.
    XYZ = 0b00_01_10,
    /// Y, then Z, then X.
    YZX = 0b01_10_00,
    /// Z, then X, then Y.
    ZXY = 0b10_00_01,
    /// X, then Z, then Y.
    XZY = 0b00_10_01,
    /// Y, then X, then Z.
    YXZ = 0b01_00_10,
    /// Z, then Y, then X.
    ZYX = 0b10_01_00,
}

impl RotateOrder {
    /// All orders, indexed by their host index.
    pub const ALL: [Self; 6] = [
        Self::XYZ,
        Self::YZX,
        Self::ZXY,
        Self::XZY,
        Self::YXZ,
        Self::ZYX,
    ];

    /// Packed bit pattern.
    pub const fn raw(self) -> u32 {
        self as u32
    }

    /// Decodes a packed bit pattern.
    pub const fn from_raw(raw: u32) -> Result<Self, MathError> {
        match raw {
            0b00_01_10 => Ok(Self::XYZ),
            0b01_10_00 => Ok(Self::YZX),
            0b10_00_01 => Ok(Self::ZXY),
            0b00_10_01 => Ok(Self::XZY),
            0b01_00_10 => Ok(Self::YXZ),
            0b10_01_00 => Ok(Self::ZYX),
            _ => Err(MathError::InvalidRotateOrder(raw)),
        }
    }

    /// Host index in `0..=5`.
    pub const fn index(self) -> u32 {
        match self {
            Self::XYZ => 0,
            Self::YZX => 1,
            Self::ZXY => 2,
            Self::XZY => 3,
            Self::YXZ => 4,
            Self::ZYX => 5,
        }
    }

    /// Decodes a host index in `0..=5`.
    pub const fn from_index(index: u32) -> Result<Self, MathError> {
        if index < 6 {
            Ok(Self::ALL[index as usize])
        } else {
            Err(MathError::InvalidRotateOrder(index))
        }
    }

    /// Axis indices in application order: `[first, second, third]`.
    pub const fn axes(self) -> [usize; 3] {
        let raw = self.raw();
        [
            (raw >> 4) as usize,
            ((raw >> 2) & 0b11) as usize,
            (raw & 0b11) as usize,
        ]
    }

    /// `true` for the cyclic orders (`XYZ`, `YZX`, `ZXY`).
    pub const fn is_cyclic(self) -> bool {
        matches!(self, Self::XYZ | Self::YZX | Self::ZXY)
    }

    /// Upper-case name, e.g. `"XZY"`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::XYZ => "XYZ",
            Self::YZX => "YZX",
            Self::ZXY => "ZXY",
            Self::XZY => "XZY",
            Self::YXZ => "YXZ",
            Self::ZYX => "ZYX",
        }
    }
}

impl fmt::Display for RotateOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u32> for RotateOrder {
    type Error = MathError;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        Self::from_raw(raw)
    }
}

impl From<RotateOrder> for u32 {
    fn from(order: RotateOrder) -> Self {
        order.raw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axes_unpack_in_application_order() {
        assert_eq!(RotateOrder::XYZ.axes(), [0, 1, 2]);
        assert_eq!(RotateOrder::ZXY.axes(), [2, 0, 1]);
        assert_eq!(RotateOrder::YXZ.axes(), [1, 0, 2]);
    }

    #[test]
    fn raw_and_index_mappings_round_trip() {
        for (i, order) in RotateOrder::ALL.into_iter().enumerate() {
            assert_eq!(RotateOrder::from_raw(order.raw()), Ok(order));
            assert_eq!(order.index() as usize, i);
            assert_eq!(RotateOrder::from_index(order.index()), Ok(order));
        }
    }

    #[test]
    fn unknown_raw_values_are_rejected() {
        assert_eq!(
            RotateOrder::try_from(0),
            Err(MathError::InvalidRotateOrder(0))
        );
        assert_eq!(
            RotateOrder::from_index(6),
            Err(MathError::InvalidRotateOrder(6))
        );
        assert!(RotateOrder::from_raw(0b11_11_11).is_err());
    }
}
