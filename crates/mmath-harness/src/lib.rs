// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Cross-validation harness for `mmath-core`.
//!
//! Deterministic random batches are fed to two [`Oracle`]s, the kernel under
//! test and an independent `f64` reference, and every output array is
//! compared by mean absolute error against a [`Tolerance`]. The same cases
//! can be recorded as JSON [`Fixture`]s and checked later.

/// Command-line front end.
pub mod cli;
/// Tolerance-bounded comparison and reporting.
pub mod compare;
pub mod config;
pub mod fixture;
pub mod inputs;
/// Names and lane counts of the checked operations.
pub mod operation;
/// The oracle seam and the kernel-backed implementation.
pub mod oracle;
/// Seeded input stream.
pub mod prng;
pub mod reference;

pub use cli::entrypoint;
pub use compare::{compare_oracles, Discrepancy, Report, Tolerance};
pub use fixture::{Fixture, FixtureError};
pub use inputs::{CaseSet, InputSet};
pub use operation::{Arity, Operation};
pub use oracle::{EvalError, KernelOracle, Oracle};
pub use reference::ReferenceOracle;
