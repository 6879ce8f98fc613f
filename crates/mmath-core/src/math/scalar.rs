// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Scalar constants and wrap-aware interpolation helpers.
//!
//! The lane-wise counterparts live on [`crate::Vec4`] and forward here one
//! lane at a time so both paths round identically.

/// π rounded to `f32`.
pub const PI: f32 = core::f32::consts::PI;
/// π / 2.
pub const HALF_PI: f32 = core::f32::consts::FRAC_PI_2;
/// 2π, one full turn.
pub const TAU: f32 = core::f32::consts::TAU;
/// Multiply degrees by this to get radians.
pub const DEG2RAD: f32 = PI / 180.0;
/// Multiply radians by this to get degrees.
pub const RAD2DEG: f32 = 180.0 / PI;

/// Clamps `value` to the inclusive `[min, max]` range.
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    debug_assert!(min <= max, "invalid clamp range: {min} > {max}");
    value.max(min).min(max)
}

/// Converts degrees to radians with float32 precision.
pub fn deg_to_rad(value: f32) -> f32 {
    value * DEG2RAD
}

/// Converts radians to degrees with float32 precision.
pub fn rad_to_deg(value: f32) -> f32 {
    value * RAD2DEG
}

/// Returns `-1`, `0` or `1` according to the sign of `x`.
#[allow(clippy::float_cmp)]
pub fn sign_zero(x: f32) -> f32 {
    if x == 0.0 {
        0.0
    } else {
        sign_not_zero(x)
    }
}

/// Returns `-1` for negative `x` and `1` otherwise (zero counts as positive).
pub fn sign_not_zero(x: f32) -> f32 {
    if x < 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// `x * x`.
pub fn sqr(x: f32) -> f32 {
    x * x
}

/// Clamps to `[0, 1]`.
pub fn saturate(x: f32) -> f32 {
    clamp(x, 0.0, 1.0)
}

/// Linear interpolation `(b - a) * t + a`; `t` is not clamped.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    (b - a) * t + a
}

/// Solves `v = lerp(a, b, t)` for `t`.
pub fn inverse_lerp(a: f32, b: f32, v: f32) -> f32 {
    (v - a) / (b - a)
}

/// Floored modulo: the result takes the sign of `y`, so `modulo(-1, 2) == 1`.
pub fn modulo(x: f32, y: f32) -> f32 {
    x - (x / y).floor() * y
}

/// Shortest signed angular difference `b - a`, wrapped to `[-π, π)`.
pub fn angle_delta(a: f32, b: f32) -> f32 {
    modulo(b - a + PI, TAU) - PI
}

/// Interpolates from `a` towards `b` along the shortest arc.
pub fn lerp_angle(a: f32, b: f32, t: f32) -> f32 {
    a + angle_delta(a, b) * t
}

/// Solves `v = lerp_angle(a, b, t)` for `t`.
pub fn inverse_lerp_angle(a: f32, b: f32, v: f32) -> f32 {
    angle_delta(a, v) / angle_delta(a, b)
}
