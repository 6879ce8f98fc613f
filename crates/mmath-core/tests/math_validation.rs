// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Golden-value validation of the kernel.
//!
//! Expected values were produced in double precision, so every comparison
//! goes through the fixture tolerance.
#![allow(missing_docs)]

use once_cell::sync::Lazy;
use serde::Deserialize;

use mmath_core::math::{self, Mat4, Quat, RotateOrder, Vec4};

static RAW_FIXTURES: &str = include_str!("fixtures/math-fixtures.json");

static FIXTURES: Lazy<MathFixtures> = Lazy::new(|| {
    let fixtures: MathFixtures =
        serde_json::from_str(RAW_FIXTURES).expect("failed to parse math fixtures");
    fixtures.validate();
    fixtures
});

#[derive(Debug, Deserialize)]
struct MathFixtures {
    #[serde(default)]
    tolerance: Tolerance,
    scalars: ScalarFixtures,
    vec4: Vec4Fixtures,
    mat4: Mat4Fixtures,
    quat: QuatFixtures,
}

impl MathFixtures {
    fn validate(&self) {
        fn ensure<T>(name: &str, slice: &[T]) {
            assert!(!slice.is_empty(), "math fixtures set '{name}' must not be empty");
        }

        ensure("scalars.modulo", &self.scalars.modulo);
        ensure("scalars.angle_delta", &self.scalars.angle_delta);
        ensure("scalars.lerp_angle", &self.scalars.lerp_angle);
        ensure("vec4.cross3", &self.vec4.cross3);
        ensure("vec4.normalized3", &self.vec4.normalized3);
        ensure("mat4.rotate", &self.mat4.rotate);
        ensure("mat4.trs", &self.mat4.trs);
        ensure("mat4.parented", &self.mat4.parented);
        ensure("mat4.inversed", &self.mat4.inversed);
        ensure("mat4.perspective_x", &self.mat4.perspective_x);
        ensure("mat4.frustum", &self.mat4.frustum);
        ensure("mat4.orthographic", &self.mat4.orthographic);
        ensure("quat.from_euler", &self.quat.from_euler);
        ensure("quat.to_mat4", &self.quat.to_mat4);
        ensure("quat.slerp", &self.quat.slerp);
    }
}

#[derive(Debug, Clone, Deserialize)]
struct Tolerance {
    #[serde(default = "Tolerance::default_absolute")]
    absolute: f32,
    #[serde(default = "Tolerance::default_relative")]
    relative: f32,
}

impl Tolerance {
    const fn default_absolute() -> f32 {
        1e-4
    }

    const fn default_relative() -> f32 {
        1e-5
    }

    fn allowed_error(&self, reference: f32) -> f32 {
        self.absolute.max(self.relative * reference.abs())
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            absolute: Self::default_absolute(),
            relative: Self::default_relative(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ScalarFixtures {
    modulo: Vec<ModuloFixture>,
    angle_delta: Vec<AngleFixture>,
    lerp_angle: Vec<LerpAngleFixture>,
}

#[derive(Debug, Deserialize)]
struct ModuloFixture {
    x: f32,
    y: f32,
    expected: f32,
}

#[derive(Debug, Deserialize)]
struct AngleFixture {
    a: f32,
    b: f32,
    expected: f32,
}

#[derive(Debug, Deserialize)]
struct LerpAngleFixture {
    a: f32,
    b: f32,
    t: f32,
    expected: f32,
}

#[derive(Debug, Deserialize)]
struct Vec4Fixtures {
    cross3: Vec<Vec4BinaryFixture>,
    normalized3: Vec<Vec4UnaryFixture>,
}

#[derive(Debug, Deserialize)]
struct Vec4BinaryFixture {
    a: [f32; 4],
    b: [f32; 4],
    expected: [f32; 4],
}

#[derive(Debug, Deserialize)]
struct Vec4UnaryFixture {
    value: [f32; 4],
    expected: [f32; 4],
}

#[derive(Debug, Deserialize)]
struct Mat4Fixtures {
    rotate: Vec<RotateFixture>,
    trs: Vec<TrsFixture>,
    parented: Vec<ParentedFixture>,
    inversed: Vec<Mat4UnaryFixture>,
    perspective_x: Vec<PerspectiveFixture>,
    frustum: Vec<BoundsFixture>,
    orthographic: Vec<BoundsFixture>,
}

#[derive(Debug, Deserialize)]
struct RotateFixture {
    radians: [f32; 3],
    order: u32,
    expected: [f32; 16],
}

#[derive(Debug, Deserialize)]
struct TrsFixture {
    translate: [f32; 3],
    radians: [f32; 3],
    scale: [f32; 3],
    order: u32,
    expected: [f32; 16],
}

#[derive(Debug, Deserialize)]
struct ParentedFixture {
    child: [f32; 16],
    parent: [f32; 16],
    expected: [f32; 16],
}

#[derive(Debug, Deserialize)]
struct Mat4UnaryFixture {
    value: [f32; 16],
    expected: [f32; 16],
}

#[derive(Debug, Deserialize)]
struct PerspectiveFixture {
    fov: f32,
    aspect: f32,
    near: f32,
    far: f32,
    expected: [f32; 16],
}

#[derive(Debug, Deserialize)]
struct BoundsFixture {
    bounds: [f32; 6],
    expected: [f32; 16],
}

#[derive(Debug, Deserialize)]
struct QuatFixtures {
    from_euler: Vec<QuatEulerFixture>,
    to_mat4: Vec<QuatMat4Fixture>,
    slerp: Vec<SlerpFixture>,
}

#[derive(Debug, Deserialize)]
struct QuatEulerFixture {
    radians: [f32; 3],
    order: u32,
    expected: [f32; 4],
}

#[derive(Debug, Deserialize)]
struct QuatMat4Fixture {
    value: [f32; 4],
    expected: [f32; 16],
}

#[derive(Debug, Deserialize)]
struct SlerpFixture {
    a: [f32; 4],
    b: [f32; 4],
    t: f32,
    expected: [f32; 4],
}

fn order(index: u32) -> RotateOrder {
    RotateOrder::from_index(index).expect("fixture order index in 0..=5")
}

fn assert_scalar(actual: f32, expected: f32, tol: &Tolerance, ctx: &str) {
    let diff = (actual - expected).abs();
    let allowed = tol.allowed_error(expected);
    assert!(
        diff <= allowed,
        "{ctx}: expected {expected}, got {actual} (diff {diff} > {allowed})"
    );
}

fn assert_lanes(actual: &[f32], expected: &[f32], tol: &Tolerance, ctx: &str) {
    assert_eq!(actual.len(), expected.len(), "{ctx}: lane count");
    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        let diff = (a - e).abs();
        let allowed = tol.allowed_error(*e);
        assert!(
            diff <= allowed,
            "{ctx}[{i}]: expected {e}, got {a} (diff {diff} > {allowed})"
        );
    }
}

#[test]
fn scalar_fixtures_all_match() {
    let tol = &FIXTURES.tolerance;
    for fix in &FIXTURES.scalars.modulo {
        let ctx = format!("scalars.modulo x={} y={}", fix.x, fix.y);
        assert_scalar(math::modulo(fix.x, fix.y), fix.expected, tol, &ctx);
    }
    for fix in &FIXTURES.scalars.angle_delta {
        let ctx = format!("scalars.angle_delta a={} b={}", fix.a, fix.b);
        assert_scalar(math::angle_delta(fix.a, fix.b), fix.expected, tol, &ctx);
    }
    for fix in &FIXTURES.scalars.lerp_angle {
        let ctx = format!("scalars.lerp_angle a={} b={} t={}", fix.a, fix.b, fix.t);
        assert_scalar(math::lerp_angle(fix.a, fix.b, fix.t), fix.expected, tol, &ctx);
    }
}

#[test]
fn vec4_fixtures_cover_geometry() {
    let tol = &FIXTURES.tolerance;
    for fix in &FIXTURES.vec4.cross3 {
        let actual = Vec4::from(fix.a).cross3(Vec4::from(fix.b));
        let ctx = format!("vec4.cross3 a={:?} b={:?}", fix.a, fix.b);
        assert_lanes(&actual.to_array(), &fix.expected, tol, &ctx);
    }
    for fix in &FIXTURES.vec4.normalized3 {
        let actual = Vec4::from(fix.value).normalized3(Vec4::UNIT_X);
        let ctx = format!("vec4.normalized3 value={:?}", fix.value);
        assert_lanes(&actual.to_array(), &fix.expected, tol, &ctx);
    }
}

#[test]
fn mat4_construction_fixtures_match() {
    let tol = &FIXTURES.tolerance;
    for (i, fix) in FIXTURES.mat4.rotate.iter().enumerate() {
        let [rx, ry, rz] = fix.radians;
        let actual = Mat4::rotate(rx, ry, rz, order(fix.order));
        assert_lanes(&actual.to_array(), &fix.expected, tol, &format!("mat4.rotate[{i}]"));
        let packed = Mat4::rotate2(Vec4::from(fix.radians), order(fix.order));
        assert_eq!(packed, actual, "mat4.rotate2[{i}]");
    }
    for (i, fix) in FIXTURES.mat4.trs.iter().enumerate() {
        let [x, y, z] = fix.translate;
        let [rx, ry, rz] = fix.radians;
        let [sx, sy, sz] = fix.scale;
        let actual = Mat4::trs(x, y, z, rx, ry, rz, sx, sy, sz, order(fix.order));
        assert_lanes(&actual.to_array(), &fix.expected, tol, &format!("mat4.trs[{i}]"));
        let packed = Mat4::trs2(
            Vec4::from(fix.translate),
            Vec4::from(fix.radians),
            Vec4::from(fix.scale),
            order(fix.order),
        );
        assert_lanes(&packed.to_array(), &fix.expected, tol, &format!("mat4.trs2[{i}]"));
    }
}

#[test]
fn mat4_composition_and_inverse_fixtures_match() {
    let tol = &FIXTURES.tolerance;
    for (i, fix) in FIXTURES.mat4.parented.iter().enumerate() {
        let child = Mat4::from(fix.child);
        let parent = Mat4::from(fix.parent);
        let ctx = format!("mat4.parented[{i}]");
        assert_lanes(&child.parented(&parent).to_array(), &fix.expected, tol, &ctx);
        assert_lanes(&(parent * child).to_array(), &fix.expected, tol, &ctx);
    }
    for (i, fix) in FIXTURES.mat4.inversed.iter().enumerate() {
        let m = Mat4::from(fix.value);
        let ctx = format!("mat4.inversed[{i}]");
        assert_lanes(&m.inversed().to_array(), &fix.expected, tol, &ctx);
        assert_lanes(&m.inversed_fast().to_array(), &fix.expected, tol, &ctx);
    }
}

#[test]
fn projection_fixtures_match() {
    let tol = &FIXTURES.tolerance;
    for (i, fix) in FIXTURES.mat4.perspective_x.iter().enumerate() {
        let actual = Mat4::perspective_x(fix.fov, fix.aspect, fix.near, fix.far);
        let ctx = format!("mat4.perspective_x[{i}]");
        assert_lanes(&actual.to_array(), &fix.expected, tol, &ctx);
    }
    for (i, fix) in FIXTURES.mat4.frustum.iter().enumerate() {
        let [l, r, b, t, n, f] = fix.bounds;
        let ctx = format!("mat4.frustum[{i}]");
        assert_lanes(&Mat4::frustum(l, r, b, t, n, f).to_array(), &fix.expected, tol, &ctx);
    }
    for (i, fix) in FIXTURES.mat4.orthographic.iter().enumerate() {
        let [l, r, b, t, n, f] = fix.bounds;
        let ctx = format!("mat4.orthographic[{i}]");
        let actual = Mat4::orthographic(l, r, b, t, n, f);
        assert_lanes(&actual.to_array(), &fix.expected, tol, &ctx);
    }
}

#[test]
fn quat_fixtures_match() {
    let tol = &FIXTURES.tolerance;
    for (i, fix) in FIXTURES.quat.from_euler.iter().enumerate() {
        let actual = Quat::from_euler(Vec4::from(fix.radians), order(fix.order));
        let ctx = format!("quat.from_euler[{i}]");
        assert_lanes(&actual.to_array(), &fix.expected, tol, &ctx);
    }
    for (i, fix) in FIXTURES.quat.to_mat4.iter().enumerate() {
        let actual = Quat::from(fix.value).to_mat4();
        let ctx = format!("quat.to_mat4[{i}]");
        assert_lanes(&actual.to_array(), &fix.expected, tol, &ctx);
    }
    for (i, fix) in FIXTURES.quat.slerp.iter().enumerate() {
        let actual = Quat::from(fix.a).slerp(&Quat::from(fix.b), fix.t);
        let ctx = format!("quat.slerp[{i}] t={}", fix.t);
        assert_lanes(&actual.to_array(), &fix.expected, tol, &ctx);
    }
}
