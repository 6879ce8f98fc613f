// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::compare::{compare_oracles, Report};
use crate::config::{ConfigService, FsConfigStore, HarnessConfig};
use crate::fixture::Fixture;
use crate::inputs::{CaseSet, InputSet};
use crate::oracle::{KernelOracle, Oracle};
use crate::reference::ReferenceOracle;
use crate::Operation;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "mmath-harness")]
#[command(about = "Cross-validates the mmath kernel against an independent f64 reference")]
pub struct Cli {
    /// Config file to use instead of the platform config directory
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Cases drawn per operation
    #[arg(long, global = true)]
    pub samples: Option<usize>,
    /// Fixed part of the comparison tolerance
    #[arg(long, global = true)]
    pub abs_tolerance: Option<f64>,
    /// Relative part of the comparison tolerance
    #[arg(long, global = true)]
    pub rel_tolerance: Option<f64>,
    /// Report discrepancies without failing the run
    #[arg(long, global = true)]
    pub no_fail: bool,
    /// Restrict generated cases to these operations (repeatable)
    #[arg(long = "op", global = true)]
    pub ops: Vec<String>,
    /// Action to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Harness actions.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compare the kernel against the reference on generated inputs
    Run,
    /// Record generated inputs and one oracle's outputs as a fixture
    Record {
        /// Path of the fixture to write
        #[arg(long)]
        out: PathBuf,
        /// Oracle whose outputs are recorded
        #[arg(long, value_enum, default_value_t = OracleKind::Reference)]
        oracle: OracleKind,
    },
    /// Check the kernel against a recorded fixture
    Check {
        /// Path to the fixture JSON
        fixture: PathBuf,
    },
    /// Persist the effective config (after overrides)
    SaveConfig,
}

/// Selects an [`Oracle`] implementation from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OracleKind {
    /// `mmath-core`
    Kernel,
    /// The `f64` reference
    Reference,
}

impl OracleKind {
    fn oracle(self) -> &'static dyn Oracle {
        match self {
            Self::Kernel => &KernelOracle,
            Self::Reference => &ReferenceOracle,
        }
    }
}

/// Loads the config named by `--config`, or the stored one, then applies the
/// command-line overrides.
pub fn resolve_config(cli: &Cli) -> Result<HarnessConfig> {
    let mut config = match &cli.config {
        Some(path) => HarnessConfig::load_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => {
            let store = FsConfigStore::new().context("failed to open config store")?;
            HarnessConfig::load_or_default(&ConfigService::new(store))
                .context("failed to load stored config")?
        }
    };
    if let Some(samples) = cli.samples {
        config.samples = samples;
    }
    if let Some(abs) = cli.abs_tolerance {
        config.tolerance.absolute = abs;
    }
    if let Some(rel) = cli.rel_tolerance {
        config.tolerance.relative = rel;
    }
    if cli.no_fail {
        config.fail_on_mismatch = false;
    }
    Ok(config)
}

/// Parses `--op` names.
pub fn parse_ops(names: &[String]) -> Result<Vec<Operation>> {
    names
        .iter()
        .map(|name| name.parse::<Operation>().map_err(anyhow::Error::from))
        .collect()
}

fn generated_cases(cli: &Cli, config: &HarnessConfig) -> Result<CaseSet> {
    let inputs = InputSet::generate(config);
    let cases = CaseSet::from_inputs(&inputs).context("failed to build cases")?;
    if cli.ops.is_empty() {
        return Ok(cases);
    }
    Ok(cases.only(&parse_ops(&cli.ops)?))
}

/// Runs the selected command. Comparison commands return their [`Report`].
pub fn execute(cli: &Cli, config: &HarnessConfig) -> Result<Option<Report>> {
    match &cli.command {
        Commands::Run => {
            let cases = generated_cases(cli, config)?;
            info!("comparing {} cases", cases.len());
            let report = compare_oracles(&ReferenceOracle, &KernelOracle, &cases, config.tolerance)?;
            report.log_summary();
            Ok(Some(report))
        }
        Commands::Record { out, oracle } => {
            let cases = generated_cases(cli, config)?;
            let fixture = Fixture::record(oracle.oracle(), &cases)?;
            fixture
                .save(out)
                .with_context(|| format!("failed to write fixture {}", out.display()))?;
            info!("recorded {} cases to {}", fixture.len(), out.display());
            Ok(None)
        }
        Commands::Check { fixture } => {
            let recorded = Fixture::load(fixture)
                .with_context(|| format!("failed to load fixture {}", fixture.display()))?;
            let report = recorded.check(&KernelOracle, config.tolerance)?;
            report.log_summary();
            Ok(Some(report))
        }
        Commands::SaveConfig => {
            match &cli.config {
                Some(path) => config.save_file(path)?,
                None => {
                    let service = ConfigService::new(FsConfigStore::new()?);
                    service.save(HarnessConfig::KEY, config)?;
                }
            }
            info!("config saved");
            Ok(None)
        }
    }
}

/// Fails when `report` has discrepancies and the config asks for that.
pub fn enforce(report: &Report, config: &HarnessConfig) -> Result<()> {
    if !config.fail_on_mismatch {
        return Ok(());
    }
    if let Some(first) = report.discrepancies.first() {
        bail!(
            "{} discrepancies over tolerance (first: {} case {}, mae {:.3e} > {:.3e})",
            report.discrepancies.len(),
            first.op,
            first.case,
            first.mae,
            first.allowed
        );
    }
    Ok(())
}

/// Binary entry point: parse arguments, set up logging, run.
pub fn entrypoint() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = resolve_config(&cli)?;
    if let Some(report) = execute(&cli, &config)? {
        enforce(&report, &config)?;
    }
    Ok(())
}
