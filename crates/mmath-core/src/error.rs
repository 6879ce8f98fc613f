// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use thiserror::Error;

/// Errors raised at the API boundary when raw values do not describe a valid
/// kernel input.
///
/// The math itself never fails; these only guard enum decoding and the
/// handful of constructors whose arguments can be structurally contradictory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MathError {
    /// Raw value is neither a rotate-order bit pattern nor a host index.
    #[error("invalid rotate order: {0:#08b}")]
    InvalidRotateOrder(u32),
    /// Raw value is not one of the six signed-axis encodings.
    #[error("invalid axis: {0:#05b}")]
    InvalidAxis(u32),
    /// Raw value sets bits outside the defined validation flags.
    #[error("invalid validation flags: {0:#07b}")]
    InvalidValidationFlags(u32),
    /// Look-at forward and up axes name the same principal axis.
    #[error("forward axis {forward} and up axis {up} share a principal axis")]
    DegenerateAxes {
        /// Requested forward axis.
        forward: crate::Axis,
        /// Requested up axis.
        up: crate::Axis,
    },
}
