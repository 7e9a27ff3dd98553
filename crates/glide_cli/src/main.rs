//! Glide CLI - headless sheet diagnostics
//!
//! Replays scripted gesture scenarios against a bottom sheet without a
//! window, and validates sheet configuration files.

mod assert;
mod report;
mod runner;
mod scenario;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use glide_sheet::SheetConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::runner::{run_loaded_scenario, RunConfig};
use crate::scenario::Scenario;

/// Headless diagnostics for Glide bottom sheets
#[derive(Parser, Debug)]
#[command(name = "glide")]
#[command(about = "Replay scripted gestures against a bottom sheet")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a JSON gesture scenario
    Run {
        /// Scenario file
        scenario: PathBuf,

        /// Sheet config (TOML); defaults apply when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Measured sheet height
        #[arg(long, default_value = "400")]
        height: f32,

        /// Logical milliseconds per frame
        #[arg(long, default_value = "16")]
        tick_ms: u64,

        /// Write the JSON report here (relative path); stdout otherwise
        #[arg(short, long)]
        report: Option<PathBuf>,
    },

    /// Validate a sheet config and print it with defaults filled in
    CheckConfig {
        /// Sheet config (TOML)
        config: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Run {
            scenario,
            config,
            height,
            tick_ms,
            report,
        } => run(scenario, config, height, tick_ms, report),
        Command::CheckConfig { config } => check_config(config),
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<SheetConfig> {
    match path {
        Some(path) => SheetConfig::from_path(path)
            .with_context(|| format!("loading sheet config {}", path.display())),
        None => Ok(SheetConfig::default()),
    }
}

fn run(
    scenario_path: PathBuf,
    config_path: Option<PathBuf>,
    height: f32,
    tick_ms: u64,
    report_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config(config_path.as_ref())?;
    let scenario = Scenario::from_path(&scenario_path)
        .with_context(|| format!("loading scenario {}", scenario_path.display()))?;

    tracing::info!(
        "Running {} ({} steps)",
        scenario_path.display(),
        scenario.steps.len()
    );

    let run_cfg = RunConfig {
        height,
        tick_ms,
        ..RunConfig::default()
    };
    let outcome = run_loaded_scenario(&scenario, config, run_cfg)?;
    let report = outcome.report();

    match &report_path {
        Some(path) => {
            report.write_to_path(path)?;
            tracing::info!("Report written to {}", path.display());
        }
        None => report.write_to_writer(&mut std::io::stdout().lock())?,
    }

    if outcome.is_failed() {
        bail!(
            "step {} ({}) failed: {}",
            report.failed_step_index.unwrap_or_default(),
            report.assertion.as_deref().unwrap_or("unknown"),
            report.message.as_deref().unwrap_or("")
        );
    }

    tracing::info!(
        "Passed after {} frames ({} ms)",
        report.elapsed_frames,
        report.elapsed_ms
    );
    Ok(())
}

fn check_config(path: PathBuf) -> Result<()> {
    let config = load_config(Some(&path))?;
    print!("{}", config.to_toml_string()?);
    tracing::info!("{} is valid", path.display());
    Ok(())
}
