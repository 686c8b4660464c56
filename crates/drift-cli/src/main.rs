mod progress;
mod summary;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use drift_core::pipeline::{BatchConfig, BatchOrchestrator, FailurePolicy};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use progress::BarReporter;

#[derive(Parser)]
#[command(
    name = "drift",
    about = "Correct camera drift in an hour-bucketed time-lapse against per-hour reference images"
)]
#[command(version)]
struct Cli {
    /// Directory containing the candidate images (*HH0000.jpg)
    #[arg(short, long)]
    directory: Option<PathBuf>,

    /// Directory containing the per-hour reference images
    #[arg(short, long)]
    standard: Option<PathBuf>,

    /// Batch config file (TOML); flags given here override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run log path
    #[arg(long)]
    log: Option<PathBuf>,

    /// Parent directory of the shiftedHH output folders [default: --directory]
    #[arg(long)]
    output_root: Option<PathBuf>,

    /// Register candidates one at a time instead of on the worker pool
    #[arg(long)]
    sequential: bool,

    /// Skip hours that have no reference image instead of aborting
    #[arg(long)]
    skip_missing_references: bool,

    /// Skip candidates whose size differs from their reference instead of aborting
    #[arg(long)]
    skip_mismatched: bool,

    /// JPEG quality of the shifted images (1-100)
    #[arg(long)]
    quality: Option<u8>,

    /// Write a rendering of every correlation surface to this directory
    #[arg(long)]
    dump_surfaces: Option<PathBuf>,

    /// Print the resolved config as TOML and exit
    #[arg(long)]
    print_config: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = build_config(&cli)?;

    if cli.print_config {
        print!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    config.validate()?;
    debug!(?config, "Resolved batch config");

    let reporter = Arc::new(BarReporter::new());
    let mut orchestrator = BatchOrchestrator::new(config).with_reporter(reporter.clone());
    let result = orchestrator.run();
    reporter.finish();

    let summary = result.context("Batch run failed")?;
    summary::print_batch_summary(orchestrator.config(), &summary);

    Ok(())
}

fn build_config(cli: &Cli) -> Result<BatchConfig> {
    let mut config = if let Some(ref config_path) = cli.config {
        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config {}", config_path.display()))?;
        toml::from_str(&contents).context("Invalid batch config")?
    } else {
        BatchConfig::default()
    };

    if let Some(ref directory) = cli.directory {
        config.directory = directory.clone();
    }
    if let Some(ref standard) = cli.standard {
        config.standard = standard.clone();
    }
    if let Some(ref log) = cli.log {
        config.log_path = log.clone();
    }
    if let Some(ref root) = cli.output_root {
        config.output_root = Some(root.clone());
    }
    if let Some(ref dump) = cli.dump_surfaces {
        config.dump_surfaces = Some(dump.clone());
    }
    if let Some(quality) = cli.quality {
        config.jpeg_quality = quality;
    }
    if cli.sequential {
        config.parallel = false;
    }
    if cli.skip_missing_references {
        config.on_missing_reference = FailurePolicy::Skip;
    }
    if cli.skip_mismatched {
        config.on_dimension_mismatch = FailurePolicy::Skip;
    }

    Ok(config)
}
