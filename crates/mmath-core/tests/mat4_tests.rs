// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
use core::f32::consts::FRAC_PI_2;

use approx::assert_abs_diff_eq;
use mmath_core::math::DEG2RAD;
use mmath_core::{Mat4, RotateOrder, Vec4};

fn approx_eq16(a: [f32; 16], b: [f32; 16], eps: f32) {
    for i in 0..16 {
        assert!((a[i] - b[i]).abs() <= eps, "index {i}: {a:?} vs {b:?}");
    }
}

#[test]
fn translate_round_trips_through_decomposition() {
    let t = Mat4::translate(1.0, 2.0, 3.0);
    assert_eq!(t.to_translate().to_array(), [1.0, 2.0, 3.0, 0.0]);
    assert_eq!(t.to_scale().to_array(), [1.0, 1.0, 1.0, 0.0]);
}

#[test]
fn rotate_x_maps_y_to_z() {
    let v = Mat4::rotate_x(FRAC_PI_2).vector_transform(Vec4::direction(0.0, 1.0, 0.0));
    assert_abs_diff_eq!(v.x(), 0.0, epsilon = 1e-6);
    assert_abs_diff_eq!(v.y(), 0.0, epsilon = 1e-6);
    assert_abs_diff_eq!(v.z(), 1.0, epsilon = 1e-6);
    assert_eq!(v.w(), 0.0);
}

#[test]
fn perspective_x_matches_golden_camera() {
    let p = Mat4::perspective_x(54.432223 * DEG2RAD, 960.0 / 540.0, 0.1, 10000.0);
    approx_eq16(
        p.to_array(),
        [
            1.9444445371627808,
            0.0,
            0.0,
            0.0,
            0.0,
            3.4567902088165283,
            0.0,
            0.0,
            0.0,
            0.0,
            1.000019907951355,
            -1.0,
            0.0,
            0.0,
            0.20000198483467102,
            0.0,
        ],
        1e-5,
    );
}

#[test]
fn perspective_y_and_x_describe_the_same_frustum() {
    let aspect = 1.5;
    let fov_y = 0.8f32;
    let fov_x = 2.0 * ((fov_y * 0.5).tan() * aspect).atan();
    approx_eq16(
        Mat4::perspective_y(fov_y, aspect, 0.5, 50.0).to_array(),
        Mat4::perspective_x(fov_x, aspect, 0.5, 50.0).to_array(),
        1e-5,
    );
}

#[test]
fn mul_operator_matches_method_and_parenting() {
    let child = Mat4::trs(1.0, 2.0, 3.0, 0.1, 0.2, 0.3, 1.0, 2.0, 3.0, RotateOrder::XYZ);
    let parent = Mat4::translate_rotate(-4.0, 0.0, 9.0, 1.0, -0.5, 0.25, RotateOrder::ZYX);
    assert_eq!(parent * child, parent.multiply(&child));
    assert_eq!(child.parented(&parent), parent * child);
    let mut acc = parent;
    acc *= child;
    assert_eq!(acc, parent * child);
}

#[test]
fn mul_operator_takes_the_parent_on_the_left() {
    let a = Mat4::translate(1.0, 0.0, 0.0);
    let b = Mat4::scale(2.0, 2.0, 2.0);
    assert_eq!(core::ops::Mul::mul(a, b), b.parented(&a));
    assert_eq!(a.parented(&b).to_translate().to_array(), [2.0, 0.0, 0.0, 0.0]);
    assert_eq!((a * b).to_translate().to_array(), [1.0, 0.0, 0.0, 0.0]);
    assert_ne!(a * b, a.parented(&b));
}

#[test]
fn trs_applies_scale_then_rotation_then_translation() {
    let m = Mat4::trs(10.0, 0.0, 0.0, 0.0, 0.0, FRAC_PI_2, 2.0, 1.0, 1.0, RotateOrder::XYZ);
    let p = m.vector_transform(Vec4::point(1.0, 0.0, 0.0));
    assert_abs_diff_eq!(p.x(), 10.0, epsilon = 1e-5);
    assert_abs_diff_eq!(p.y(), 2.0, epsilon = 1e-5);
}

#[test]
fn determinant_tracks_scale_and_mirroring() {
    let m = Mat4::trs(5.0, 6.0, 7.0, 0.4, 0.5, 0.6, 2.0, -3.0, 0.5, RotateOrder::YZX);
    assert_abs_diff_eq!(m.determinant(), -3.0, epsilon = 1e-5);
    approx_eq16(
        (m * m.inversed()).to_array(),
        Mat4::IDENTITY.to_array(),
        1e-5,
    );
}

#[test]
fn top33_drops_translation_only() {
    let m = Mat4::translate_rotate(3.0, 2.0, 1.0, 0.3, 0.0, 0.0, RotateOrder::XYZ);
    let top = m.to_top33();
    assert_eq!(top.col(3), Vec4::UNIT_W);
    assert_eq!(top.col(1), m.col(1));
    assert_eq!(top.transposed().row(1), m.col(1));
}

#[test]
fn from_vectors_keeps_columns_verbatim() {
    let c0 = Vec4::new(1.0, 2.0, 3.0, 4.0);
    let c1 = Vec4::new(5.0, 6.0, 7.0, 8.0);
    let c2 = Vec4::new(9.0, 10.0, 11.0, 12.0);
    let t = Vec4::new(13.0, 14.0, 15.0, 16.0);
    let m = Mat4::from_vectors(c0, c1, c2, t);
    assert_eq!(m.to_array(), core::array::from_fn(|i| (i + 1) as f32));
}
