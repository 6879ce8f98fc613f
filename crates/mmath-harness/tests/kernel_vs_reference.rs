// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
use mmath_harness::config::HarnessConfig;
use mmath_harness::{
    compare_oracles, CaseSet, EvalError, InputSet, KernelOracle, Operation, Oracle,
    ReferenceOracle, Tolerance,
};

fn default_cases() -> (HarnessConfig, CaseSet) {
    let config = HarnessConfig::default();
    let cases = CaseSet::from_inputs(&InputSet::generate(&config)).expect("cases");
    (config, cases)
}

#[test]
fn kernel_matches_reference_on_every_operation() {
    let (config, cases) = default_cases();
    assert_eq!(
        config.tolerance,
        Tolerance {
            absolute: 2e-4,
            relative: 0.0
        },
        "default threshold is absolute only"
    );
    let report =
        compare_oracles(&ReferenceOracle, &KernelOracle, &cases, config.tolerance).expect("run");
    for op in Operation::ALL {
        assert!(report.summaries.contains_key(&op), "{op} not compared");
    }
    assert_eq!(report.cases(), cases.len());
    if let Some(first) = report.discrepancies.first() {
        panic!(
            "{} discrepancies; first {} case {}: mae {:e} > {:e}\ninput {:?}\nexpected {:?}\nactual {:?}",
            report.discrepancies.len(),
            first.op,
            first.case,
            first.mae,
            first.allowed,
            first.input,
            first.expected,
            first.actual
        );
    }
}

/// Kernel with a transposed `Mat44Delta` result, standing in for an
/// algorithmic regression.
struct TransposedDelta;

impl Oracle for TransposedDelta {
    fn name(&self) -> &'static str {
        "transposed-delta"
    }

    fn evaluate(&self, op: Operation, input: &[f64]) -> Result<Vec<f64>, EvalError> {
        let out = KernelOracle.evaluate(op, input)?;
        if op != Operation::Mat44Delta {
            return Ok(out);
        }
        Ok((0..16).map(|i| out[(i % 4) * 4 + i / 4]).collect())
    }
}

#[test]
fn algorithmic_errors_are_reported_per_operation() {
    let (config, cases) = default_cases();
    let report =
        compare_oracles(&ReferenceOracle, &TransposedDelta, &cases, config.tolerance).expect("run");
    assert!(!report.passed());
    assert!(report
        .discrepancies
        .iter()
        .all(|d| d.op == Operation::Mat44Delta));
    let delta = report.summaries[&Operation::Mat44Delta];
    assert_eq!(delta.failures, delta.cases);
    assert_eq!(report.summaries[&Operation::Mat44Mul].failures, 0);
}

#[test]
fn golden_perspective_case_matches_reference_tightly() {
    let (_, cases) = default_cases();
    let input = &cases.get(Operation::Mat44PerspectiveX)[0];
    let kernel = KernelOracle.evaluate(Operation::Mat44PerspectiveX, input).expect("kernel");
    let golden = [
        1.944445, 0.0, 0.0, 0.0, 0.0, 3.456790, 0.0, 0.0, 0.0, 0.0, 1.000020, -1.0, 0.0, 0.0,
        0.200002, 0.0,
    ];
    for (got, want) in kernel.iter().zip(golden) {
        assert!((got - want).abs() < 1e-5, "{kernel:?}");
    }
}
