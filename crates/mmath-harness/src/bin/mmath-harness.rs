// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! CLI entry point for the mmath cross-validation harness.

use anyhow::Result;
use mmath_harness::entrypoint;

fn main() -> Result<()> {
    entrypoint()
}
