// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Vectors, quaternions and 4×4 transforms with the scalar helpers they share.
//!
//! All arithmetic is `f32`. Matrices store four column vectors; the flat
//! 16-lane view is column after column, translation in lanes 12..15.

mod axis;
mod convert;
mod mat4;
mod orient;
mod projection;
mod quat;
mod rotate_order;
mod scalar;
mod validate;
mod vec4;

pub use axis::Axis;
pub use mat4::Mat4;
pub use quat::Quat;
pub use rotate_order::RotateOrder;
pub use scalar::{
    angle_delta, clamp, deg_to_rad, inverse_lerp, inverse_lerp_angle, lerp, lerp_angle, modulo,
    rad_to_deg, saturate, sign_not_zero, sign_zero, sqr, DEG2RAD, HALF_PI, PI, RAD2DEG, TAU,
};
pub use validate::ValidationFlags;
pub use vec4::Vec4;

/// Global epsilon used by math routines when detecting degenerate values.
pub const EPSILON: f32 = 1e-6;
