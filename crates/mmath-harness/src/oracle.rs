// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use mmath_core::{Mat4, Quat, RotateOrder, Vec4};
use thiserror::Error;

use crate::Operation;

/// Errors raised when an input array does not describe a valid call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// Input has the wrong number of lanes for the operation.
    #[error("{op}: expected {expected} input values, found {found}")]
    Arity {
        /// Operation being evaluated.
        op: Operation,
        /// Lane count the operation takes.
        expected: usize,
        /// Lane count supplied.
        found: usize,
    },
    /// Order lane is not a host index in `0..=5`.
    #[error("{op}: {value} is not a rotate order index")]
    InvalidOrder {
        /// Operation being evaluated.
        op: Operation,
        /// Offending lane value.
        value: f64,
    },
}

/// An implementation that can evaluate every [`Operation`] on flat inputs.
pub trait Oracle {
    /// Short label used in logs and reports.
    fn name(&self) -> &'static str;

    /// Evaluates `op` on `input`, returning the flat output lanes.
    fn evaluate(&self, op: Operation, input: &[f64]) -> Result<Vec<f64>, EvalError>;
}

pub(crate) fn check_arity(op: Operation, input: &[f64]) -> Result<(), EvalError> {
    let expected = op.arity().inputs;
    if input.len() == expected {
        Ok(())
    } else {
        Err(EvalError::Arity {
            op,
            expected,
            found: input.len(),
        })
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::float_cmp
)]
pub(crate) fn order_index(op: Operation, value: f64) -> Result<usize, EvalError> {
    if value.fract() == 0.0 && (0.0..6.0).contains(&value) {
        Ok(value as usize)
    } else {
        Err(EvalError::InvalidOrder { op, value })
    }
}

/// `mmath-core` under test. Inputs are narrowed to `f32` before the call.
#[derive(Debug, Default, Clone, Copy)]
pub struct KernelOracle;

fn mat(lanes: &[f32]) -> Mat4 {
    Mat4::new(core::array::from_fn(|i| lanes[i]))
}

fn vec3(lanes: &[f32]) -> Vec4 {
    Vec4::direction(lanes[0], lanes[1], lanes[2])
}

fn vec4(lanes: &[f32]) -> Vec4 {
    Vec4::new(lanes[0], lanes[1], lanes[2], lanes[3])
}

fn widen(lanes: &[f32]) -> Vec<f64> {
    lanes.iter().copied().map(f64::from).collect()
}

impl Oracle for KernelOracle {
    fn name(&self) -> &'static str {
        "kernel"
    }

    #[allow(clippy::cast_possible_truncation)]
    fn evaluate(&self, op: Operation, input: &[f64]) -> Result<Vec<f64>, EvalError> {
        check_arity(op, input)?;
        let x: Vec<f32> = input.iter().map(|&v| v as f32).collect();
        let order = |lane: usize| -> Result<RotateOrder, EvalError> {
            let index = order_index(op, input[lane])?;
            RotateOrder::ALL
                .get(index)
                .copied()
                .ok_or(EvalError::InvalidOrder { op, value: input[lane] })
        };

        let m = match op {
            Operation::Mat44Identity => Mat4::identity(),
            Operation::Mat44Translate => Mat4::translate(x[0], x[1], x[2]),
            Operation::Mat44RotateX => Mat4::rotate_x(x[0]),
            Operation::Mat44RotateY => Mat4::rotate_y(x[0]),
            Operation::Mat44RotateZ => Mat4::rotate_z(x[0]),
            Operation::Mat44Rotate => Mat4::rotate(x[0], x[1], x[2], order(3)?),
            Operation::Mat44Rotate2 => Mat4::rotate2(vec3(&x), order(3)?),
            Operation::Mat44Scale => Mat4::scale(x[0], x[1], x[2]),
            Operation::Mat44Scale2 => Mat4::scale2(vec3(&x)),
            Operation::Mat44TranslateRotate => {
                Mat4::translate_rotate(x[0], x[1], x[2], x[3], x[4], x[5], order(6)?)
            }
            Operation::Mat44TranslateRotate2 => {
                Mat4::translate_rotate2(vec3(&x), vec3(&x[3..]), order(6)?)
            }
            Operation::Mat44Trs => {
                let o = order(9)?;
                Mat4::trs(x[0], x[1], x[2], x[3], x[4], x[5], x[6], x[7], x[8], o)
            }
            Operation::Mat44Trs2 => {
                Mat4::trs2(vec3(&x), vec3(&x[3..]), vec3(&x[6..]), order(9)?)
            }
            Operation::Mat44Mul => mat(&x).parented(&mat(&x[16..])),
            Operation::Mat44Inversed => mat(&x).inversed(),
            Operation::Mat44InversedFast => mat(&x).inversed_fast(),
            Operation::Mat44InversedFastNoScale => mat(&x).inversed_fast_no_scale(),
            Operation::Mat44Transposed => mat(&x).transposed(),
            Operation::Mat44Determinant => return Ok(vec![f64::from(mat(&x).determinant())]),
            Operation::Mat44VectorTransform => {
                let p = mat(&x).vector_transform(vec3(&x[16..]).with_w(1.0));
                return Ok(widen(&p.to_array()));
            }
            Operation::Mat44Delta => mat(&x).delta(&mat(&x[16..])),
            Operation::Mat44FromVectors => Mat4::from_vectors(
                vec4(&x),
                vec4(&x[4..]),
                vec4(&x[8..]),
                vec4(&x[12..]),
            ),
            Operation::Mat44ToTop33 => mat(&x).to_top33(),
            Operation::Mat44ToTranslate => return Ok(widen(&mat(&x).to_translate().to_array())),
            Operation::Mat44ToScale => return Ok(widen(&mat(&x).to_scale().to_array())),
            Operation::Mat44ToEuler => {
                let o = order(16)?;
                Mat4::rotate2(mat(&x).to_euler(o), o)
            }
            Operation::Mat44PerspectiveX => Mat4::perspective_x(x[0], x[1], x[2], x[3]),
            Operation::QuatToMat44RoundTrip => {
                let q = Mat4::rotate2(vec3(&x), order(3)?).to_quat();
                Mat4::from_quat(&q)
            }
            Operation::QuatFromEuler => Quat::from_euler(vec3(&x), order(3)?).to_mat4(),
        };
        Ok(widen(&m.to_array()))
    }
}
