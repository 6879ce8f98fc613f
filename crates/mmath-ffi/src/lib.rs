// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! C-compatible bindings for the mmath kernel.
//!
//! Every export takes and returns plain values: no pointers, no allocation,
//! no global state. Enumerations cross the boundary as their packed `u32`
//! encodings (rotate orders, signed axes, validation flag bits). An encoding the
//! kernel does not define never panics; the affected export returns the
//! documented fallback and the matching `*_is_valid` probe returns `false`.
#![deny(missing_docs)]
#![allow(non_camel_case_types)]

use mmath_core::math;
use mmath_core::{Axis, Mat4, Quat, RotateOrder, ValidationFlags, Vec4};

/// Four-lane vector `(x, y, z, w)`.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct mmath_vec4 {
    /// X lane.
    pub x: f32,
    /// Y lane.
    pub y: f32,
    /// Z lane.
    pub z: f32,
    /// W lane.
    pub w: f32,
}

/// Quaternion `(x, y, z, w)`, `w` scalar.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct mmath_quat {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
    /// Z component.
    pub z: f32,
    /// W (scalar) component.
    pub w: f32,
}

/// 4×4 matrix, column after column (`m[col * 4 + row]`).
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct mmath_mat44 {
    /// Column-major lanes.
    pub m: [f32; 16],
}

impl From<Vec4> for mmath_vec4 {
    fn from(v: Vec4) -> Self {
        let [x, y, z, w] = v.to_array();
        Self { x, y, z, w }
    }
}

impl From<mmath_vec4> for Vec4 {
    fn from(v: mmath_vec4) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }
}

impl From<Quat> for mmath_quat {
    fn from(q: Quat) -> Self {
        let [x, y, z, w] = q.to_array();
        Self { x, y, z, w }
    }
}

impl From<mmath_quat> for Quat {
    fn from(q: mmath_quat) -> Self {
        Self::new(q.x, q.y, q.z, q.w)
    }
}

impl From<Mat4> for mmath_mat44 {
    fn from(m: Mat4) -> Self {
        Self { m: m.to_array() }
    }
}

impl From<mmath_mat44> for Mat4 {
    fn from(m: mmath_mat44) -> Self {
        Self::new(m.m)
    }
}

fn vec(v: Vec4) -> mmath_vec4 {
    v.into()
}

fn mat(m: Mat4) -> mmath_mat44 {
    m.into()
}

fn quat(q: Quat) -> mmath_quat {
    q.into()
}

/// Rotation built for `order`, or the identity when the encoding is unknown.
fn with_order(order: u32, build: impl FnOnce(RotateOrder) -> Mat4) -> mmath_mat44 {
    mat(RotateOrder::from_raw(order).map_or(Mat4::IDENTITY, build))
}

/// Angles for `order`, or the zero vector when the encoding is unknown.
fn angles_with_order(order: u32, extract: impl FnOnce(RotateOrder) -> Vec4) -> mmath_vec4 {
    vec(RotateOrder::from_raw(order).map_or(Vec4::ZERO, extract))
}

// ── enumeration probes ─────────────────────────────────────────────

/// `true` when `order` is one of the six packed rotate-order bit patterns.
#[no_mangle]
pub extern "C" fn mmath_rotate_order_is_valid(order: u32) -> bool {
    RotateOrder::from_raw(order).is_ok()
}

/// `true` when `axis` is one of the six signed-axis encodings.
#[no_mangle]
pub extern "C" fn mmath_axis_is_valid(axis: u32) -> bool {
    Axis::from_raw(axis).is_ok()
}

/// `true` when `flags` only sets defined validation bits.
#[no_mangle]
pub extern "C" fn mmath_validation_flags_is_valid(flags: u32) -> bool {
    ValidationFlags::from_bits(flags).is_ok()
}

// ── scalars ────────────────────────────────────────────────────────

/// `value` limited to `min..=max`.
#[no_mangle]
pub extern "C" fn mmath_scalar_clamp(value: f32, min: f32, max: f32) -> f32 {
    math::clamp(value, min, max)
}

/// `-1`, `0` or `1`.
#[no_mangle]
pub extern "C" fn mmath_scalar_sign_zero(x: f32) -> f32 {
    math::sign_zero(x)
}

/// `-1` or `1`; zero counts as positive.
#[no_mangle]
pub extern "C" fn mmath_scalar_sign_not_zero(x: f32) -> f32 {
    math::sign_not_zero(x)
}

/// `x * x`.
#[no_mangle]
pub extern "C" fn mmath_scalar_sqr(x: f32) -> f32 {
    math::sqr(x)
}

/// `x` limited to `0..=1`.
#[no_mangle]
pub extern "C" fn mmath_scalar_saturate(x: f32) -> f32 {
    math::saturate(x)
}

/// Floored modulo; the result takes the sign of `y`.
#[no_mangle]
pub extern "C" fn mmath_scalar_modulo(x: f32, y: f32) -> f32 {
    math::modulo(x, y)
}

/// Shortest signed angle from `a` to `b`, in `[-π, π)`.
#[no_mangle]
pub extern "C" fn mmath_scalar_angle_delta(a: f32, b: f32) -> f32 {
    math::angle_delta(a, b)
}

/// Angle interpolation along the shortest arc.
#[no_mangle]
pub extern "C" fn mmath_scalar_lerp_angle(a: f32, b: f32, t: f32) -> f32 {
    math::lerp_angle(a, b, t)
}

/// Inverse of [`mmath_scalar_lerp_angle`].
#[no_mangle]
pub extern "C" fn mmath_scalar_inverse_lerp_angle(a: f32, b: f32, v: f32) -> f32 {
    math::inverse_lerp_angle(a, b, v)
}

/// Unclamped linear interpolation.
#[no_mangle]
pub extern "C" fn mmath_scalar_lerp(a: f32, b: f32, t: f32) -> f32 {
    math::lerp(a, b, t)
}

/// Inverse of [`mmath_scalar_lerp`].
#[no_mangle]
pub extern "C" fn mmath_scalar_inverse_lerp(a: f32, b: f32, v: f32) -> f32 {
    math::inverse_lerp(a, b, v)
}

/// Degrees to radians.
#[no_mangle]
pub extern "C" fn mmath_scalar_deg_to_rad(degrees: f32) -> f32 {
    math::deg_to_rad(degrees)
}

/// Radians to degrees.
#[no_mangle]
pub extern "C" fn mmath_scalar_rad_to_deg(radians: f32) -> f32 {
    math::rad_to_deg(radians)
}

// ── vectors ────────────────────────────────────────────────────────

macro_rules! vec_binary {
    ($($name:ident => $op:expr, $doc:literal;)*) => {
        $(
            #[doc = $doc]
            #[no_mangle]
            pub extern "C" fn $name(a: mmath_vec4, b: mmath_vec4) -> mmath_vec4 {
                let f: fn(Vec4, Vec4) -> Vec4 = $op;
                vec(f(a.into(), b.into()))
            }
        )*
    };
}

macro_rules! vec_unary {
    ($($name:ident => $op:expr, $doc:literal;)*) => {
        $(
            #[doc = $doc]
            #[no_mangle]
            pub extern "C" fn $name(v: mmath_vec4) -> mmath_vec4 {
                let f: fn(Vec4) -> Vec4 = $op;
                vec(f(v.into()))
            }
        )*
    };
}

macro_rules! vec_scalar {
    ($($name:ident => $op:expr, $doc:literal;)*) => {
        $(
            #[doc = $doc]
            #[no_mangle]
            pub extern "C" fn $name(a: mmath_vec4, b: mmath_vec4) -> f32 {
                let f: fn(Vec4, Vec4) -> f32 = $op;
                f(a.into(), b.into())
            }
        )*
    };
}

macro_rules! vec_measure {
    ($($name:ident => $op:expr, $doc:literal;)*) => {
        $(
            #[doc = $doc]
            #[no_mangle]
            pub extern "C" fn $name(v: mmath_vec4) -> f32 {
                let f: fn(Vec4) -> f32 = $op;
                f(v.into())
            }
        )*
    };
}

vec_binary! {
    mmath_vec_add => |a, b| a + b, "Lane-wise sum.";
    mmath_vec_sub => |a, b| a - b, "Lane-wise difference.";
    mmath_vec_mul => |a, b| a * b, "Lane-wise product.";
    mmath_vec_div => |a, b| a / b, "Lane-wise quotient.";
    mmath_vec_min => Vec4::min, "Lane-wise minimum.";
    mmath_vec_max => Vec4::max, "Lane-wise maximum.";
    mmath_vec_modulo => Vec4::modulo, "Lane-wise floored modulo.";
    mmath_vec_angle_delta => Vec4::angle_delta, "Lane-wise shortest angle from `a` to `b`.";
    mmath_vec_cross3 => Vec4::cross3, "3D cross product, `w = 0`.";
}

vec_unary! {
    mmath_vec_negate => |v| -v, "Lane-wise negation.";
    mmath_vec_abs => Vec4::abs, "Lane-wise absolute value.";
    mmath_vec_sign => Vec4::sign, "Lane-wise sign: `-1`, `0` or `1`.";
    mmath_vec_sin => Vec4::sin, "Lane-wise sine.";
    mmath_vec_cos => Vec4::cos, "Lane-wise cosine.";
    mmath_vec_floor => Vec4::floor, "Lane-wise floor.";
    mmath_vec_ceil => Vec4::ceil, "Lane-wise ceiling.";
    mmath_vec_round => Vec4::round, "Lane-wise rounding.";
    mmath_vec_saturate => Vec4::saturate, "Lane-wise clamp to `0..=1`.";
    mmath_vec_sign_not_zero => Vec4::sign_not_zero, "Lane-wise sign with zero as positive.";
    mmath_vec_sqr => Vec4::sqr, "Lane-wise square.";
    mmath_vec_normalized_unsafe4 => Vec4::normalized_unsafe4, "Unit 4-lane copy; NaN lanes for a zero vector.";
    mmath_vec_normalized_unsafe3 => Vec4::normalized_unsafe3, "Unit 3-lane copy (`w = 0`); NaN lanes for a zero vector.";
    mmath_vec_normalized_unsafe2 => Vec4::normalized_unsafe2, "Unit 2-lane copy (`z = w = 0`); NaN lanes for a zero vector.";
    mmath_vec_perpendicular4 => Vec4::perpendicular4, "Unit vector perpendicular over 4 lanes.";
    mmath_vec_perpendicular3 => Vec4::perpendicular3, "Unit vector perpendicular over 3 lanes.";
    mmath_vec_perpendicular2 => Vec4::perpendicular2, "Unit perpendicular of the 2D part: `(-y, x)`, or `(y, 0)` when `x == 0`.";
}

vec_scalar! {
    mmath_vec_dot4 => Vec4::dot4, "Dot product over 4 lanes.";
    mmath_vec_dot3 => Vec4::dot3, "Dot product over 3 lanes.";
    mmath_vec_dot2 => Vec4::dot2, "Dot product over 2 lanes.";
    mmath_vec_cross2 => Vec4::cross2, "Signed area `a.x * b.y - a.y * b.x`.";
}

vec_measure! {
    mmath_vec_magnitude4 => Vec4::magnitude4, "Length over 4 lanes.";
    mmath_vec_magnitude3 => Vec4::magnitude3, "Length over 3 lanes.";
    mmath_vec_magnitude2 => Vec4::magnitude2, "Length over 2 lanes.";
    mmath_vec_sqr_magnitude4 => Vec4::sqr_magnitude4, "Squared length over 4 lanes.";
    mmath_vec_sqr_magnitude3 => Vec4::sqr_magnitude3, "Squared length over 3 lanes.";
    mmath_vec_sqr_magnitude2 => Vec4::sqr_magnitude2, "Squared length over 2 lanes.";
}

/// Lane-wise scale by `s`.
#[no_mangle]
pub extern "C" fn mmath_vec_scale(v: mmath_vec4, s: f32) -> mmath_vec4 {
    vec(Vec4::from(v) * s)
}

/// Lane-wise `a + (b - a) * t`.
#[no_mangle]
pub extern "C" fn mmath_vec_lerp(a: mmath_vec4, b: mmath_vec4, t: mmath_vec4) -> mmath_vec4 {
    vec(Vec4::from(a).lerp(b.into(), t.into()))
}

/// Lane-wise inverse of [`mmath_vec_lerp`].
#[no_mangle]
pub extern "C" fn mmath_vec_inverse_lerp(a: mmath_vec4, b: mmath_vec4, v: mmath_vec4) -> mmath_vec4 {
    vec(Vec4::from(a).inverse_lerp(b.into(), v.into()))
}

/// Lane-wise shortest-arc angle interpolation.
#[no_mangle]
pub extern "C" fn mmath_vec_lerp_angle(a: mmath_vec4, b: mmath_vec4, t: mmath_vec4) -> mmath_vec4 {
    vec(Vec4::from(a).lerp_angle(b.into(), t.into()))
}

/// Lane-wise inverse of [`mmath_vec_lerp_angle`].
#[no_mangle]
pub extern "C" fn mmath_vec_inverse_lerp_angle(
    a: mmath_vec4,
    b: mmath_vec4,
    v: mmath_vec4,
) -> mmath_vec4 {
    vec(Vec4::from(a).inverse_lerp_angle(b.into(), v.into()))
}

/// Lane-wise clamp of `v` into `lo..=hi`.
#[no_mangle]
pub extern "C" fn mmath_vec_clamp(v: mmath_vec4, lo: mmath_vec4, hi: mmath_vec4) -> mmath_vec4 {
    vec(Vec4::from(v).clamp(lo.into(), hi.into()))
}

/// Unit 4-lane copy, or `fallback` for a zero vector.
#[no_mangle]
pub extern "C" fn mmath_vec_normalized4(v: mmath_vec4, fallback: mmath_vec4) -> mmath_vec4 {
    vec(Vec4::from(v).normalized4(fallback.into()))
}

/// Unit 3-lane copy (`w = 0`), or `fallback` for a zero vector.
#[no_mangle]
pub extern "C" fn mmath_vec_normalized3(v: mmath_vec4, fallback: mmath_vec4) -> mmath_vec4 {
    vec(Vec4::from(v).normalized3(fallback.into()))
}

/// Unit 2-lane copy (`z = w = 0`), or `fallback` for a zero vector.
#[no_mangle]
pub extern "C" fn mmath_vec_normalized2(v: mmath_vec4, fallback: mmath_vec4) -> mmath_vec4 {
    vec(Vec4::from(v).normalized2(fallback.into()))
}

// ── quaternions ────────────────────────────────────────────────────

/// Identity rotation.
#[no_mangle]
pub extern "C" fn mmath_quat_identity() -> mmath_quat {
    quat(Quat::IDENTITY)
}

/// Rotation about +X.
#[no_mangle]
pub extern "C" fn mmath_quat_rotate_x(radians: f32) -> mmath_quat {
    quat(Quat::rotate_x(radians))
}

/// Rotation about +Y.
#[no_mangle]
pub extern "C" fn mmath_quat_rotate_y(radians: f32) -> mmath_quat {
    quat(Quat::rotate_y(radians))
}

/// Rotation about +Z.
#[no_mangle]
pub extern "C" fn mmath_quat_rotate_z(radians: f32) -> mmath_quat {
    quat(Quat::rotate_z(radians))
}

/// Rotation about an arbitrary axis; identity for a zero axis.
#[no_mangle]
pub extern "C" fn mmath_quat_from_axis_angle(axis: mmath_vec4, radians: f32) -> mmath_quat {
    quat(Quat::from_axis_angle(axis.into(), radians))
}

/// Hamilton product `a ⊗ b` (`b` applied first).
#[no_mangle]
pub extern "C" fn mmath_quat_mul(a: mmath_quat, b: mmath_quat) -> mmath_quat {
    quat(Quat::from(a) * Quat::from(b))
}

/// Four-component dot product.
#[no_mangle]
pub extern "C" fn mmath_quat_dot(a: mmath_quat, b: mmath_quat) -> f32 {
    Quat::from(a).dot(&b.into())
}

/// Magnitude.
#[no_mangle]
pub extern "C" fn mmath_quat_magnitude(q: mmath_quat) -> f32 {
    Quat::from(q).magnitude()
}

/// Squared magnitude.
#[no_mangle]
pub extern "C" fn mmath_quat_sqr_magnitude(q: mmath_quat) -> f32 {
    Quat::from(q).sqr_magnitude()
}

/// Unit copy, or `fallback` for a zero quaternion.
#[no_mangle]
pub extern "C" fn mmath_quat_normalized(q: mmath_quat, fallback: mmath_quat) -> mmath_quat {
    quat(Quat::from(q).normalized(fallback.into()))
}

/// Negated vector part.
#[no_mangle]
pub extern "C" fn mmath_quat_conjugated(q: mmath_quat) -> mmath_quat {
    quat(Quat::from(q).conjugated())
}

/// `conjugate / |q|²`.
#[no_mangle]
pub extern "C" fn mmath_quat_inversed(q: mmath_quat) -> mmath_quat {
    quat(Quat::from(q).inversed())
}

/// Shortest-arc spherical interpolation.
#[no_mangle]
pub extern "C" fn mmath_quat_slerp(a: mmath_quat, b: mmath_quat, t: f32) -> mmath_quat {
    quat(Quat::from(a).slerp(&b.into(), t))
}

/// Rotates the xyz lanes of `v`; `w` passes through.
#[no_mangle]
pub extern "C" fn mmath_quat_vector_transform(q: mmath_quat, v: mmath_vec4) -> mmath_vec4 {
    vec(Quat::from(q).vector_transform(v.into()))
}

/// Rotation matrix of `q`.
#[no_mangle]
pub extern "C" fn mmath_quat_to_mat44(q: mmath_quat) -> mmath_mat44 {
    mat(Quat::from(q).to_mat4())
}

/// Euler rotation; identity for an unknown `order`.
#[no_mangle]
pub extern "C" fn mmath_quat_from_euler(radians: mmath_vec4, order: u32) -> mmath_quat {
    quat(RotateOrder::from_raw(order).map_or(Quat::IDENTITY, |o| Quat::from_euler(radians.into(), o)))
}

/// Euler angles by axis; zero vector for an unknown `order`.
#[no_mangle]
pub extern "C" fn mmath_quat_to_euler(q: mmath_quat, order: u32) -> mmath_vec4 {
    angles_with_order(order, |o| Quat::from(q).to_euler(o))
}

// ── matrices: construction ─────────────────────────────────────────

/// Identity matrix.
#[no_mangle]
pub extern "C" fn mmath_mat44_identity() -> mmath_mat44 {
    mat(Mat4::IDENTITY)
}

/// Pure translation.
#[no_mangle]
pub extern "C" fn mmath_mat44_translate(x: f32, y: f32, z: f32) -> mmath_mat44 {
    mat(Mat4::translate(x, y, z))
}

/// Rotation about +X.
#[no_mangle]
pub extern "C" fn mmath_mat44_rotate_x(radians: f32) -> mmath_mat44 {
    mat(Mat4::rotate_x(radians))
}

/// Rotation about +Y.
#[no_mangle]
pub extern "C" fn mmath_mat44_rotate_y(radians: f32) -> mmath_mat44 {
    mat(Mat4::rotate_y(radians))
}

/// Rotation about +Z.
#[no_mangle]
pub extern "C" fn mmath_mat44_rotate_z(radians: f32) -> mmath_mat44 {
    mat(Mat4::rotate_z(radians))
}

/// Euler rotation; identity for an unknown `order`.
#[no_mangle]
pub extern "C" fn mmath_mat44_rotate(rx: f32, ry: f32, rz: f32, order: u32) -> mmath_mat44 {
    with_order(order, |o| Mat4::rotate(rx, ry, rz, o))
}

/// Euler rotation from packed angles; identity for an unknown `order`.
#[no_mangle]
pub extern "C" fn mmath_mat44_rotate2(radians: mmath_vec4, order: u32) -> mmath_mat44 {
    with_order(order, |o| Mat4::rotate2(radians.into(), o))
}

/// Alias of [`mmath_mat44_rotate2`].
#[no_mangle]
pub extern "C" fn mmath_euler_to_mat44(radians: mmath_vec4, order: u32) -> mmath_mat44 {
    mmath_mat44_rotate2(radians, order)
}

/// Non-uniform scale.
#[no_mangle]
pub extern "C" fn mmath_mat44_scale(x: f32, y: f32, z: f32) -> mmath_mat44 {
    mat(Mat4::scale(x, y, z))
}

/// Non-uniform scale from packed lanes.
#[no_mangle]
pub extern "C" fn mmath_mat44_scale2(scale: mmath_vec4) -> mmath_mat44 {
    mat(Mat4::scale2(scale.into()))
}

/// Euler rotation plus translation; identity for an unknown `order`.
#[no_mangle]
pub extern "C" fn mmath_mat44_translate_rotate(
    x: f32,
    y: f32,
    z: f32,
    rx: f32,
    ry: f32,
    rz: f32,
    order: u32,
) -> mmath_mat44 {
    with_order(order, |o| Mat4::translate_rotate(x, y, z, rx, ry, rz, o))
}

/// Packed form of [`mmath_mat44_translate_rotate`].
#[no_mangle]
pub extern "C" fn mmath_mat44_translate_rotate2(
    translate: mmath_vec4,
    radians: mmath_vec4,
    order: u32,
) -> mmath_mat44 {
    with_order(order, |o| {
        Mat4::translate_rotate2(translate.into(), radians.into(), o)
    })
}

/// Translate · rotate · scale; identity for an unknown `order`.
#[allow(clippy::too_many_arguments)]
#[no_mangle]
pub extern "C" fn mmath_mat44_trs(
    x: f32,
    y: f32,
    z: f32,
    rx: f32,
    ry: f32,
    rz: f32,
    sx: f32,
    sy: f32,
    sz: f32,
    order: u32,
) -> mmath_mat44 {
    with_order(order, |o| Mat4::trs(x, y, z, rx, ry, rz, sx, sy, sz, o))
}

/// Packed form of [`mmath_mat44_trs`].
#[no_mangle]
pub extern "C" fn mmath_mat44_trs2(
    translate: mmath_vec4,
    radians: mmath_vec4,
    scale: mmath_vec4,
    order: u32,
) -> mmath_mat44 {
    with_order(order, |o| {
        Mat4::trs2(translate.into(), radians.into(), scale.into(), o)
    })
}

/// Columns verbatim.
#[no_mangle]
pub extern "C" fn mmath_mat44_from_vectors(
    c0: mmath_vec4,
    c1: mmath_vec4,
    c2: mmath_vec4,
    translate: mmath_vec4,
) -> mmath_mat44 {
    mat(Mat4::from_vectors(
        c0.into(),
        c1.into(),
        c2.into(),
        translate.into(),
    ))
}

/// Rotation matrix of a quaternion.
#[no_mangle]
pub extern "C" fn mmath_mat44_from_quat(q: mmath_quat) -> mmath_mat44 {
    mat(Mat4::from_quat(&q.into()))
}

// ── matrices: composition and inversion ────────────────────────────

/// Child `a` parented under `b`; the column-vector product `b * a`.
#[no_mangle]
pub extern "C" fn mmath_mat44_mul(a: mmath_mat44, b: mmath_mat44) -> mmath_mat44 {
    mat(Mat4::from(a).parented(&b.into()))
}

/// Alias of [`mmath_mat44_mul`] with the same argument order.
#[no_mangle]
pub extern "C" fn mmath_mat44_parented(child: mmath_mat44, parent: mmath_mat44) -> mmath_mat44 {
    mmath_mat44_mul(child, parent)
}

/// `m` expressed in the space of `new_parent`.
#[no_mangle]
pub extern "C" fn mmath_mat44_delta(m: mmath_mat44, new_parent: mmath_mat44) -> mmath_mat44 {
    mat(Mat4::from(m).delta(&new_parent.into()))
}

/// General inverse; non-finite lanes for a singular matrix.
#[no_mangle]
pub extern "C" fn mmath_mat44_inversed(m: mmath_mat44) -> mmath_mat44 {
    mat(Mat4::from(m).inversed())
}

/// Inverse of a rotation × scale + translation matrix.
#[no_mangle]
pub extern "C" fn mmath_mat44_inversed_fast(m: mmath_mat44) -> mmath_mat44 {
    mat(Mat4::from(m).inversed_fast())
}

/// Inverse of a rigid transform.
#[no_mangle]
pub extern "C" fn mmath_mat44_inversed_fast_no_scale(m: mmath_mat44) -> mmath_mat44 {
    mat(Mat4::from(m).inversed_fast_no_scale())
}

/// Transpose.
#[no_mangle]
pub extern "C" fn mmath_mat44_transposed(m: mmath_mat44) -> mmath_mat44 {
    mat(Mat4::from(m).transposed())
}

/// Full 4×4 determinant.
#[no_mangle]
pub extern "C" fn mmath_mat44_determinant(m: mmath_mat44) -> f32 {
    Mat4::from(m).determinant()
}

// ── matrices: application and decomposition ────────────────────────

/// Transforms the point `v` (`w = 1`); returns xyz with `w = 0`.
#[no_mangle]
pub extern "C" fn mmath_mat44_vector_transform(m: mmath_mat44, v: mmath_vec4) -> mmath_vec4 {
    vec(Mat4::from(m).vector_transform(v.into()))
}

/// Transforms the direction `v` (translation ignored).
#[no_mangle]
pub extern "C" fn mmath_mat44_transform_direction(m: mmath_mat44, v: mmath_vec4) -> mmath_vec4 {
    vec(Mat4::from(m).transform_direction(v.into()))
}

/// Translation column, `w = 0`.
#[no_mangle]
pub extern "C" fn mmath_mat44_to_translate(m: mmath_mat44) -> mmath_vec4 {
    vec(Mat4::from(m).to_translate())
}

/// Basis column lengths, `w = 0`.
#[no_mangle]
pub extern "C" fn mmath_mat44_to_scale(m: mmath_mat44) -> mmath_vec4 {
    vec(Mat4::from(m).to_scale())
}

/// Euler angles by axis; zero vector for an unknown `order`.
#[no_mangle]
pub extern "C" fn mmath_mat44_to_euler(m: mmath_mat44, order: u32) -> mmath_vec4 {
    angles_with_order(order, |o| Mat4::from(m).to_euler(o))
}

/// Rotation quaternion of the orthonormal 3×3 block.
#[no_mangle]
pub extern "C" fn mmath_mat44_to_quat(m: mmath_mat44) -> mmath_quat {
    quat(Mat4::from(m).to_quat())
}

/// Column 3 reset to `(0, 0, 0, 1)`.
#[no_mangle]
pub extern "C" fn mmath_mat44_to_top33(m: mmath_mat44) -> mmath_mat44 {
    mat(Mat4::from(m).to_top33())
}

// ── matrices: validation ───────────────────────────────────────────

/// Requested flags that fail within `epsilon`; `0` means valid.
///
/// Undefined bits in `flags` are returned as failed, untouched.
#[no_mangle]
pub extern "C" fn mmath_mat44_validate(m: mmath_mat44, flags: u32, epsilon: f32) -> u32 {
    ValidationFlags::from_bits(flags).map_or(flags, |f| Mat4::from(m).validate(f, epsilon).bits())
}

/// Requested flags that hold within `epsilon`; `0` for undefined bits.
#[no_mangle]
pub extern "C" fn mmath_mat44_satisfied(m: mmath_mat44, flags: u32, epsilon: f32) -> u32 {
    ValidationFlags::from_bits(flags).map_or(0, |f| Mat4::from(m).satisfied(f, epsilon).bits())
}

/// Enforces the requested flags; `m` unchanged for undefined bits.
#[no_mangle]
pub extern "C" fn mmath_mat44_make_valid(m: mmath_mat44, flags: u32) -> mmath_mat44 {
    ValidationFlags::from_bits(flags).map_or(m, |f| mat(Mat4::from(m).make_valid(f)))
}

// ── matrices: projection and orientation ───────────────────────────

/// Perspective frustum.
#[no_mangle]
pub extern "C" fn mmath_mat44_frustum(
    left: f32,
    right: f32,
    bottom: f32,
    top: f32,
    near: f32,
    far: f32,
) -> mmath_mat44 {
    mat(Mat4::frustum(left, right, bottom, top, near, far))
}

/// Symmetric perspective from a horizontal field of view.
#[no_mangle]
pub extern "C" fn mmath_mat44_perspective_x(fov_x: f32, aspect: f32, near: f32, far: f32) -> mmath_mat44 {
    mat(Mat4::perspective_x(fov_x, aspect, near, far))
}

/// Symmetric perspective from a vertical field of view.
#[no_mangle]
pub extern "C" fn mmath_mat44_perspective_y(fov_y: f32, aspect: f32, near: f32, far: f32) -> mmath_mat44 {
    mat(Mat4::perspective_y(fov_y, aspect, near, far))
}

/// Orthographic box.
#[no_mangle]
pub extern "C" fn mmath_mat44_orthographic(
    left: f32,
    right: f32,
    bottom: f32,
    top: f32,
    near: f32,
    far: f32,
) -> mmath_mat44 {
    mat(Mat4::orthographic(left, right, bottom, top, near, far))
}

/// Centred orthographic box of `width × height`.
#[no_mangle]
pub extern "C" fn mmath_mat44_ortho_symmetric(width: f32, height: f32, near: f32, far: f32) -> mmath_mat44 {
    mat(Mat4::ortho_symmetric(width, height, near, far))
}

/// Rotation of `radians` about `axis`.
#[no_mangle]
pub extern "C" fn mmath_mat44_axis_angle(axis: mmath_vec4, radians: f32) -> mmath_mat44 {
    mat(Mat4::axis_angle(axis.into(), radians))
}

/// Shortest rotation from `from` to `to`.
#[no_mangle]
pub extern "C" fn mmath_mat44_align(from: mmath_vec4, to: mmath_vec4) -> mmath_mat44 {
    mat(Mat4::align(from.into(), to.into()))
}

/// Alias of [`mmath_mat44_align`].
#[no_mangle]
pub extern "C" fn mmath_mat44_rotate_towards(from: mmath_vec4, to: mmath_vec4) -> mmath_mat44 {
    mmath_mat44_align(from, to)
}

/// Look-at rotation. Identity when either axis encoding is unknown or both
/// name the same principal axis.
#[no_mangle]
pub extern "C" fn mmath_mat44_look_at(
    target: mmath_vec4,
    up: mmath_vec4,
    forward_axis: u32,
    up_axis: u32,
) -> mmath_mat44 {
    let built = Axis::from_raw(forward_axis)
        .and_then(|f| Axis::from_raw(up_axis).map(|u| (f, u)))
        .and_then(|(f, u)| Mat4::look_at(target.into(), up.into(), f, u));
    mat(built.unwrap_or(Mat4::IDENTITY))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_orders_fall_back_to_identity() {
        assert!(!mmath_rotate_order_is_valid(3));
        assert_eq!(mmath_mat44_rotate(1.0, 2.0, 3.0, 3), mmath_mat44_identity());
        assert_eq!(mmath_mat44_to_euler(mmath_mat44_rotate_x(0.5), 3), mmath_vec4::default());
        assert_eq!(mmath_quat_from_euler(mmath_vec4::default(), 99), mmath_quat_identity());
    }

    #[test]
    fn look_at_rejects_shared_axis_with_identity() {
        let target = mmath_vec4 { x: 0.0, y: 0.0, z: 1.0, w: 0.0 };
        let up = mmath_vec4 { x: 0.0, y: 1.0, z: 0.0, w: 0.0 };
        assert_eq!(mmath_mat44_look_at(target, up, 0b001, 0b101), mmath_mat44_identity());
        assert_eq!(mmath_mat44_look_at(target, up, 0b111, 0b001), mmath_mat44_identity());
        assert!(mmath_axis_is_valid(0b110));
    }

    #[test]
    fn validate_reports_undefined_bits_as_failed() {
        let m = mmath_mat44_identity();
        assert_eq!(mmath_mat44_validate(m, 0b1_1111, 1e-5), 0);
        assert_eq!(mmath_mat44_validate(m, 0b10_0000, 1e-5), 0b10_0000);
        assert!(!mmath_validation_flags_is_valid(0b10_0000));
        assert_eq!(mmath_mat44_make_valid(m, 0b10_0000), m);
    }
}
