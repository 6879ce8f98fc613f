// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Recorded `[input, output]` pairs per operation, stored as JSON.
//!
//! The document maps operation names to ordered case arrays:
//! `{ "Mat44Translate": [[[1, 2, 3], [1, 0, 0, 0, ...]], ...] }`. Loading
//! rejects unknown names and wrong lane counts before any comparison runs.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::compare::{Report, Tolerance};
use crate::inputs::CaseSet;
use crate::oracle::{EvalError, Oracle};
use crate::Operation;

/// One recorded case: `(input, output)`.
pub type Case = (Vec<f64>, Vec<f64>);

type Document = BTreeMap<String, Vec<Case>>;

/// Errors raised while reading, validating or recording fixtures.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// Reading or writing the file failed.
    #[error("fixture io: {0}")]
    Io(#[from] std::io::Error),
    /// The document is not valid fixture JSON.
    #[error("fixture json: {0}")]
    Json(#[from] serde_json::Error),
    /// A key names no known operation.
    #[error("unknown operation: {0}")]
    UnknownOperation(String),
    /// A case carries the wrong number of input or output values.
    #[error("{op} case {case}: expected {expected} values, found {found}")]
    ArityMismatch {
        /// Operation name.
        op: String,
        /// Case index.
        case: usize,
        /// Lane count the operation requires.
        expected: usize,
        /// Lane count found.
        found: usize,
    },
    /// The recording oracle rejected an input.
    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// Validated fixture contents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fixture {
    entries: BTreeMap<Operation, Vec<Case>>,
}

fn check_lanes(op: Operation, case: usize, expected: usize, found: usize) -> Result<(), FixtureError> {
    if expected == found {
        Ok(())
    } else {
        Err(FixtureError::ArityMismatch {
            op: op.name().to_owned(),
            case,
            expected,
            found,
        })
    }
}

impl Fixture {
    /// Evaluates every case with `oracle` and keeps the outputs.
    pub fn record(oracle: &dyn Oracle, cases: &CaseSet) -> Result<Self, FixtureError> {
        let mut entries = BTreeMap::new();
        for (op, inputs) in cases.iter() {
            let recorded = inputs
                .iter()
                .map(|input| -> Result<Case, EvalError> {
                    Ok((input.clone(), oracle.evaluate(op, input)?))
                })
                .collect::<Result<Vec<_>, _>>()?;
            entries.insert(op, recorded);
        }
        debug!(oracle = oracle.name(), operations = entries.len(), "fixture recorded");
        Ok(Self { entries })
    }

    /// Parses and validates a fixture document.
    pub fn from_json_str(json: &str) -> Result<Self, FixtureError> {
        let doc: Document = serde_json::from_str(json)?;
        let mut entries = BTreeMap::new();
        for (name, cases) in doc {
            let op = Operation::from_name(&name).ok_or_else(|| FixtureError::UnknownOperation(name))?;
            let arity = op.arity();
            for (case, (input, output)) in cases.iter().enumerate() {
                check_lanes(op, case, arity.inputs, input.len())?;
                check_lanes(op, case, arity.outputs, output.len())?;
            }
            entries.insert(op, cases);
        }
        Ok(Self { entries })
    }

    /// Pretty-printed JSON document. Non-finite outputs do not survive the
    /// trip: JSON has no NaN.
    pub fn to_json_string(&self) -> Result<String, FixtureError> {
        let doc: Document = self
            .entries
            .iter()
            .map(|(op, cases)| (op.name().to_owned(), cases.clone()))
            .collect();
        Ok(serde_json::to_string_pretty(&doc)?)
    }

    /// Reads and validates a fixture file.
    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Writes the fixture to `path`.
    pub fn save(&self, path: &Path) -> Result<(), FixtureError> {
        fs::write(path, self.to_json_string()?)?;
        Ok(())
    }

    /// Recorded cases for `op`.
    pub fn cases(&self, op: Operation) -> &[Case] {
        self.entries.get(&op).map(Vec::as_slice).unwrap_or_default()
    }

    /// Operations present in the fixture.
    pub fn operations(&self) -> impl Iterator<Item = Operation> + '_ {
        self.entries.keys().copied()
    }

    /// Total recorded cases.
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// `true` when nothing is recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.values().all(Vec::is_empty)
    }

    /// Re-evaluates every recorded input with `oracle` and compares against
    /// the recorded outputs.
    pub fn check(&self, oracle: &dyn Oracle, tolerance: Tolerance) -> Result<Report, FixtureError> {
        let mut report = Report::default();
        for (op, cases) in &self.entries {
            for (case, (input, expected)) in cases.iter().enumerate() {
                let actual = oracle.evaluate(*op, input)?;
                report.check(*op, case, input, expected.clone(), actual, tolerance);
            }
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_names_are_rejected() {
        let err = Fixture::from_json_str(r#"{ "Mat44Frobnicate": [] }"#).unwrap_err();
        assert!(matches!(err, FixtureError::UnknownOperation(name) if name == "Mat44Frobnicate"));
    }

    #[test]
    fn short_outputs_are_rejected_with_their_case() {
        let json = r#"{ "Mat44ToTranslate": [
            [[1,0,0,0, 0,1,0,0, 0,0,1,0, 4,5,6,1], [4,5,6,0]],
            [[1,0,0,0, 0,1,0,0, 0,0,1,0, 4,5,6,1], [4,5,6]]
        ] }"#;
        match Fixture::from_json_str(json) {
            Err(FixtureError::ArityMismatch {
                op,
                case,
                expected,
                found,
            }) => {
                assert_eq!(op, "Mat44ToTranslate");
                assert_eq!((case, expected, found), (1, 4, 3));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn malformed_documents_are_json_errors() {
        assert!(matches!(
            Fixture::from_json_str(r#"{ "Mat44Identity": [[[], "x"]] }"#),
            Err(FixtureError::Json(_))
        ));
    }
}
