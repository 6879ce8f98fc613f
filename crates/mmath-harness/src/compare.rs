// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::inputs::CaseSet;
use crate::oracle::{EvalError, Oracle};
use crate::Operation;

/// Pass threshold on the mean absolute error of one output array:
/// `mae <= absolute + relative * mean(|expected|)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerance {
    /// Fixed part of the threshold.
    pub absolute: f64,
    /// Share of the mean expected magnitude added on top; zero unless opted
    /// into.
    pub relative: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            absolute: 2e-4,
            relative: 0.0,
        }
    }
}

impl Tolerance {
    /// Largest mean absolute error accepted against `expected`.
    #[allow(clippy::cast_precision_loss)]
    pub fn allowed(&self, expected: &[f64]) -> f64 {
        let scale = if expected.is_empty() {
            0.0
        } else {
            expected.iter().map(|v| v.abs()).sum::<f64>() / expected.len() as f64
        };
        self.absolute + self.relative * scale
    }
}

/// Mean absolute lane difference; infinite when the lengths differ.
#[allow(clippy::cast_precision_loss)]
pub fn mean_absolute_error(expected: &[f64], actual: &[f64]) -> f64 {
    if expected.len() != actual.len() {
        return f64::INFINITY;
    }
    if expected.is_empty() {
        return 0.0;
    }
    let total: f64 = expected.iter().zip(actual).map(|(e, a)| (a - e).abs()).sum();
    total / expected.len() as f64
}

/// One comparison that exceeded its tolerance.
#[derive(Debug, Clone, PartialEq)]
pub struct Discrepancy {
    /// Operation compared.
    pub op: Operation,
    /// Case index within the operation's batch.
    pub case: usize,
    /// Input lanes fed to both sides.
    pub input: Vec<f64>,
    /// Output of the expected side.
    pub expected: Vec<f64>,
    /// Output of the side under test.
    pub actual: Vec<f64>,
    /// Measured mean absolute error.
    pub mae: f64,
    /// Threshold it was held to.
    pub allowed: f64,
}

/// Per-operation tallies.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OperationSummary {
    /// Cases compared.
    pub cases: usize,
    /// Cases over tolerance.
    pub failures: usize,
    /// Largest error seen.
    pub worst_mae: f64,
}

/// Outcome of a comparison run.
#[derive(Debug, Clone, Default)]
pub struct Report {
    /// Tallies keyed by operation.
    pub summaries: BTreeMap<Operation, OperationSummary>,
    /// Every comparison over tolerance, in encounter order.
    pub discrepancies: Vec<Discrepancy>,
}

impl Report {
    /// Scores one case and records a [`Discrepancy`] when it fails.
    pub fn check(
        &mut self,
        op: Operation,
        case: usize,
        input: &[f64],
        expected: Vec<f64>,
        actual: Vec<f64>,
        tolerance: Tolerance,
    ) {
        let mae = mean_absolute_error(&expected, &actual);
        let allowed = tolerance.allowed(&expected);
        let summary = self.summaries.entry(op).or_default();
        summary.cases += 1;
        // NaN never passes and is reported as the worst error.
        if mae.is_nan() || mae > summary.worst_mae {
            summary.worst_mae = mae;
        }
        if mae <= allowed {
            return;
        }
        summary.failures += 1;
        warn!(
            %op,
            case,
            mae,
            allowed,
            ?input,
            ?expected,
            ?actual,
            "outputs diverge"
        );
        self.discrepancies.push(Discrepancy {
            op,
            case,
            input: input.to_vec(),
            expected,
            actual,
            mae,
            allowed,
        });
    }

    /// `true` when no case exceeded its tolerance.
    pub fn passed(&self) -> bool {
        self.discrepancies.is_empty()
    }

    /// Total cases compared.
    pub fn cases(&self) -> usize {
        self.summaries.values().map(|s| s.cases).sum()
    }

    /// Logs one line per operation and a closing total.
    pub fn log_summary(&self) {
        for (op, s) in &self.summaries {
            debug!(%op, cases = s.cases, failures = s.failures, worst_mae = s.worst_mae, "compared");
        }
        info!(
            "{} operations, {} cases, {} discrepancies",
            self.summaries.len(),
            self.cases(),
            self.discrepancies.len()
        );
    }
}

/// Feeds every case to both oracles and compares the outputs.
pub fn compare_oracles(
    expected: &dyn Oracle,
    actual: &dyn Oracle,
    cases: &CaseSet,
    tolerance: Tolerance,
) -> Result<Report, EvalError> {
    debug!(expected = expected.name(), actual = actual.name(), "comparing oracles");
    let mut report = Report::default();
    for (op, inputs) in cases.iter() {
        for (case, input) in inputs.iter().enumerate() {
            let want = expected.evaluate(op, input)?;
            let got = actual.evaluate(op, input)?;
            report.check(op, case, input, want, got, tolerance);
        }
    }
    Ok(report)
}
