// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! mmath-core: value-typed 3D math kernel.
//!
//! Every operation is a pure function over `Copy` aggregates ([`Vec4`],
//! [`Quat`], [`Mat4`]) plus a handful of closed enumerations. Degenerate
//! inputs resolve to documented fallbacks instead of errors; the only
//! fallible surface is conversion from raw enum values, which rejects
//! anything outside the defined encodings.
#![forbid(unsafe_code)]

pub mod math;

mod error;

pub use error::MathError;
pub use math::{Axis, Mat4, Quat, RotateOrder, ValidationFlags, Vec4};
