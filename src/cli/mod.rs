//! Command line interface for imy_bundler.
//!
//! Parses arguments, turns them into packaging [`Settings`](crate::bundler::Settings),
//! runs the [`Bundler`] and narrates what was produced.

mod args;
mod output;

pub use args::{Args, RuntimeConfig};
pub use output::OutputManager;

use crate::bundler::{Bundler, PackReport};
use crate::error::{CliError, Result};

/// Main CLI entry point
pub fn run() -> Result<i32> {
    let args = Args::parse_args();
    execute(&args)
}

/// Runs a packaging job for already parsed arguments.
pub fn execute(args: &Args) -> Result<i32> {
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let runtime_config = RuntimeConfig::from(args);
    let settings = args.to_settings()?;

    runtime_config.section(&format!(
        "Packaging {} -> {}",
        settings.input_directory().display(),
        settings.output_directory().display()
    ))?;
    if settings.abis().is_empty() {
        runtime_config.warn("no ABI tokens given; native libraries go to native/common only")?;
    }
    for abi in settings.abis() {
        if !settings.input_directory().join(abi).is_dir() {
            runtime_config.indent(&format!("No {abi}/ directory in input, skipping ABI"))?;
        }
    }

    let report = Bundler::new(settings).bundle()?;
    print_report(&runtime_config, &report)?;

    Ok(0)
}

fn print_report(runtime_config: &RuntimeConfig, report: &PackReport) -> std::io::Result<()> {
    runtime_config.progress(&format!(
        "Recorded {} assets ({})",
        report.manifest.assets.len(),
        report.manifest_path.display()
    ))?;
    for artifact in &report.artifacts {
        runtime_config.indent(&format!(
            "{}  {} ({} bytes)",
            artifact.checksum, artifact.key, artifact.size
        ))?;
    }

    let output_dir = report
        .manifest_path
        .parent()
        .unwrap_or(report.manifest_path.as_path());
    runtime_config.success(&format!("Wrote artifacts in: {}", output_dir.display()))?;
    runtime_config
        .output()
        .result(&format!("Bundle: {}", report.bundle_path.display()))
}
