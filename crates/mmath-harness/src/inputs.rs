// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Deterministic input batches and the per-operation case lists built on them.

use std::collections::BTreeMap;

use crate::config::HarnessConfig;
use crate::oracle::{EvalError, Oracle};
use crate::prng::Prng;
use crate::reference::ReferenceOracle;
use crate::Operation;

/// Raw draws, one stream per quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct InputSet {
    /// Translations in `±value_range`.
    pub translations: Vec<[f32; 3]>,
    /// Euler triples in `±value_range` radians, drawn after the translations.
    pub euler: Vec<[f32; 3]>,
    /// Single-axis angles in `±value_range` radians.
    pub angles: Vec<f32>,
    /// Host rotate-order indices `0..=5`.
    pub orders: Vec<u32>,
    /// Per-axis scales: random sign, magnitude in `scale_min..scale_max`.
    pub scales: Vec<[f32; 3]>,
}

impl InputSet {
    /// Draws `config.samples` values of each quantity.
    pub fn generate(config: &HarnessConfig) -> Self {
        let n = config.samples;
        let range = config.value_range;
        let seeds = config.seeds;

        let mut vec3_rng = Prng::from_seed(seeds.vec3);
        let mut draw3 = || -> [f32; 3] {
            core::array::from_fn(|_| vec3_rng.next_range(-range, range))
        };
        let translations = (0..n).map(|_| draw3()).collect();
        let euler = (0..n).map(|_| draw3()).collect();

        let mut float_rng = Prng::from_seed(seeds.floats);
        let angles = (0..n).map(|_| float_rng.next_range(-range, range)).collect();

        let mut order_rng = Prng::from_seed(seeds.orders);
        let orders = (0..n).map(|_| order_rng.next_below(6)).collect();

        let mut scale_rng = Prng::from_seed(seeds.scales);
        let scales = (0..n)
            .map(|_| -> [f32; 3] {
                core::array::from_fn(|_| {
                    let sign = scale_rng.next_sign();
                    sign * scale_rng.next_range(config.scale_min, config.scale_max)
                })
            })
            .collect();

        Self {
            translations,
            euler,
            angles,
            orders,
            scales,
        }
    }

    /// Number of samples per quantity.
    pub fn len(&self) -> usize {
        self.translations.len()
    }

    /// `true` when no samples were drawn.
    pub fn is_empty(&self) -> bool {
        self.translations.is_empty()
    }
}

/// Input arrays grouped by operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaseSet {
    cases: BTreeMap<Operation, Vec<Vec<f64>>>,
}

/// Rounds to the nearest `f32` so both oracles see identical inputs.
#[allow(clippy::cast_possible_truncation)]
fn narrow(v: f64) -> f64 {
    f64::from(v as f32)
}

fn lanes(parts: &[&[f32]]) -> Vec<f64> {
    parts
        .iter()
        .flat_map(|p| p.iter().copied().map(f64::from))
        .collect()
}

impl CaseSet {
    /// Appends one case for `op`.
    pub fn push(&mut self, op: Operation, input: Vec<f64>) {
        self.cases.entry(op).or_default().push(input);
    }

    /// Cases for `op`, empty when none were added.
    pub fn get(&self, op: Operation) -> &[Vec<f64>] {
        self.cases.get(&op).map(Vec::as_slice).unwrap_or_default()
    }

    /// Operations with their cases, in fixture order.
    pub fn iter(&self) -> impl Iterator<Item = (Operation, &[Vec<f64>])> + '_ {
        self.cases.iter().map(|(op, cases)| (*op, cases.as_slice()))
    }

    /// Total case count across operations.
    pub fn len(&self) -> usize {
        self.cases.values().map(Vec::len).sum()
    }

    /// `true` when there are no cases at all.
    pub fn is_empty(&self) -> bool {
        self.cases.values().all(Vec::is_empty)
    }

    /// Copy restricted to `ops`.
    #[must_use]
    pub fn only(&self, ops: &[Operation]) -> Self {
        let cases = self
            .cases
            .iter()
            .filter(|(op, _)| ops.contains(op))
            .map(|(op, cases)| (*op, cases.clone()))
            .collect();
        Self { cases }
    }

    /// Builds every operation's cases from `inputs`.
    ///
    /// Matrix inputs (TRS products, parents for `Mat44Delta`) are produced by
    /// the reference and then rounded to `f32`, so the kernel and the
    /// reference always start from the same values.
    #[allow(clippy::cast_precision_loss)]
    pub fn from_inputs(inputs: &InputSet) -> Result<Self, EvalError> {
        let reference = ReferenceOracle;
        let derive = |op: Operation, input: &[f64]| -> Result<Vec<f64>, EvalError> {
            Ok(reference.evaluate(op, input)?.into_iter().map(narrow).collect())
        };

        let mut set = Self::default();
        set.push(Operation::Mat44Identity, Vec::new());
        set.push(
            Operation::Mat44PerspectiveX,
            lanes(&[&[54.432_223f32.to_radians(), 960.0 / 540.0, 0.1, 10_000.0]]),
        );

        let n = inputs.len();
        for i in 0..n {
            let j = (i + 1) % n;
            let t = &inputs.translations[i];
            let r = &inputs.euler[i];
            let s = &inputs.scales[i];
            let o = [inputs.orders[i] as f32];
            let a = [inputs.angles[i]];
            let abs_s = s.map(f32::abs);

            let euler = lanes(&[r, &o]);
            let tr = lanes(&[t, r, &o]);
            let trs_args = lanes(&[t, r, s, &o]);
            let trs = derive(Operation::Mat44Trs, &trs_args)?;
            let next_args = lanes(&[
                &inputs.translations[j],
                &inputs.euler[j],
                &inputs.scales[j],
                &[inputs.orders[j] as f32],
            ]);
            let parent = derive(Operation::Mat44Trs, &next_args)?;
            let pair = [trs.as_slice(), parent.as_slice()].concat();
            let world = derive(Operation::Mat44Mul, &pair)?;
            let rigid = derive(Operation::Mat44TranslateRotate, &tr)?;
            let positive = derive(Operation::Mat44Trs, &lanes(&[t, r, &abs_s, &o]))?;

            set.push(Operation::Mat44Translate, lanes(&[t]));
            for op in [
                Operation::Mat44RotateX,
                Operation::Mat44RotateY,
                Operation::Mat44RotateZ,
            ] {
                set.push(op, lanes(&[&a]));
            }
            for op in [
                Operation::Mat44Rotate,
                Operation::Mat44Rotate2,
                Operation::QuatToMat44RoundTrip,
                Operation::QuatFromEuler,
            ] {
                set.push(op, euler.clone());
            }
            set.push(Operation::Mat44Scale, lanes(&[s]));
            set.push(Operation::Mat44Scale2, lanes(&[s]));
            set.push(Operation::Mat44TranslateRotate, tr.clone());
            set.push(Operation::Mat44TranslateRotate2, tr);
            set.push(Operation::Mat44Trs, trs_args.clone());
            set.push(Operation::Mat44Trs2, trs_args);
            set.push(Operation::Mat44Mul, pair);
            for op in [
                Operation::Mat44Inversed,
                Operation::Mat44InversedFast,
                Operation::Mat44Transposed,
                Operation::Mat44Determinant,
                Operation::Mat44ToTop33,
                Operation::Mat44ToTranslate,
                Operation::Mat44ToScale,
            ] {
                set.push(op, trs.clone());
            }
            set.push(Operation::Mat44InversedFastNoScale, rigid);
            let point = inputs.translations[j].map(f64::from);
            set.push(Operation::Mat44VectorTransform, [trs.as_slice(), &point].concat());
            set.push(Operation::Mat44Delta, [world, parent].concat());
            set.push(
                Operation::Mat44FromVectors,
                lanes(&[t, &[1.0f32], r, &[0.0f32], s, &[0.0f32], &inputs.translations[j], &[1.0f32]]),
            );
            set.push(Operation::Mat44ToEuler, [positive, vec![f64::from(o[0])]].concat());
        }
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> HarnessConfig {
        HarnessConfig {
            samples: 8,
            ..HarnessConfig::default()
        }
    }

    #[test]
    fn generation_is_reproducible_and_in_range() {
        let cfg = small();
        let a = InputSet::generate(&cfg);
        assert_eq!(a, InputSet::generate(&cfg));
        assert_eq!(a.len(), 8);
        assert!(a.orders.iter().all(|&o| o < 6));
        for s in a.scales.iter().flatten() {
            assert!((0.25..=2.0).contains(&s.abs()), "{s}");
        }
        for v in a.translations.iter().chain(&a.euler).flatten() {
            assert!(v.abs() <= 1000.0);
        }
    }

    #[test]
    fn seeds_are_independent_per_quantity() {
        let base = small();
        let mut other = small();
        other.seeds.scales = 99;
        let a = InputSet::generate(&base);
        let b = InputSet::generate(&other);
        assert_eq!(a.translations, b.translations);
        assert_eq!(a.orders, b.orders);
        assert_ne!(a.scales, b.scales);
    }

    #[test]
    fn every_operation_gets_cases_of_the_right_arity() {
        let set = CaseSet::from_inputs(&InputSet::generate(&small())).expect("cases");
        for op in Operation::ALL {
            let cases = set.get(op);
            assert!(!cases.is_empty(), "{op} has no cases");
            for input in cases {
                assert_eq!(input.len(), op.arity().inputs, "{op}");
            }
        }
        let one = set.only(&[Operation::Mat44Delta]);
        assert_eq!(one.len(), 8);
    }
}
