//! Command line argument parsing and validation.
//!
//! The four positional arguments mirror what build drivers already pass:
//! input directory, output directory, python version tag and ABI list.
//! Missing positionals make clap print usage and exit with code 2.

use crate::bundler::{ChecksumAlgorithm, Settings, SettingsBuilder};
use clap::Parser;
use std::path::PathBuf;

/// Loader bundle packager for installed Python dependencies
#[derive(Parser, Debug)]
#[command(
    name = "imy_bundler",
    version,
    about = "Packages pip install output into .imy archives, native folders, build.json and a bundle zip",
    long_about = "Packages the output of `pip install --target` for the application loader.

Each top-level directory becomes requirements-<name>.imy, .so files are copied into
native/<abi>/ and native/common/, hashes are written to build.json, and everything is
zipped into bundle-py<version>-<timestamp>.zip.

Usage:
  imy_bundler build/pip build/imy 311 \"arm64-v8a x86_64\"
  imy_bundler build/pip build/imy 311 arm64-v8a x86_64 --checksum sha256"
)]
pub struct Args {
    /// Directory produced by the dependency installer
    #[arg(value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Directory receiving all artifacts (created if missing)
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Python version tag, e.g. 311
    #[arg(value_name = "PYTHON_VERSION")]
    pub python_version: String,

    /// Space separated ABI list, as one quoted argument or several
    #[arg(value_name = "ABIS", required = true, num_args = 1..)]
    pub abis: Vec<String>,

    /// Extension for per-package archives
    #[arg(
        long,
        value_name = "EXT",
        default_value = crate::bundler::settings::DEFAULT_ARCHIVE_EXTENSION
    )]
    pub archive_extension: String,

    /// Hash algorithm recorded in build.json
    #[arg(long, value_enum, default_value_t = ChecksumAlgorithm::Sha1)]
    pub checksum: ChecksumAlgorithm,

    /// Unix timestamp used in the bundle name instead of the current time
    #[arg(long, value_name = "UNIX_SECONDS")]
    pub timestamp: Option<i64>,

    /// Only print errors and the final bundle path
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// All ABI tokens after splitting every argument on whitespace.
    pub fn abi_tokens(&self) -> Vec<String> {
        self.abis
            .iter()
            .flat_map(|list| list.split_whitespace())
            .map(str::to_string)
            .collect()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.python_version.trim().is_empty() {
            return Err("Python version cannot be empty".to_string());
        }

        let extension = self.archive_extension.trim_start_matches('.');
        if extension.is_empty() || extension.contains(['/', '\\']) {
            return Err(format!(
                "Invalid archive extension: {}",
                self.archive_extension
            ));
        }

        Ok(())
    }

    /// Builds packaging settings from the arguments.
    pub fn to_settings(&self) -> crate::bundler::Result<Settings> {
        let mut builder = SettingsBuilder::new()
            .input_directory(&self.input_dir)
            .output_directory(&self.output_dir)
            .python_version(self.python_version.clone())
            .abis(self.abi_tokens())
            .archive_extension(self.archive_extension.clone())
            .checksum(self.checksum);
        if let Some(timestamp) = self.timestamp {
            builder = builder.timestamp(timestamp);
        }
        builder.build()
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for terminal output
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        let output = super::OutputManager::new(
            true, // Always verbose
            args.quiet,
        );

        Self { output }
    }
}

impl RuntimeConfig {
    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }

    /// Print warning message if not in quiet mode
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        self.output.warn(message)
    }

    /// Print success message if not in quiet mode
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        self.output.success(message)
    }

    /// Print progress message
    pub fn progress(&self, message: &str) -> std::io::Result<()> {
        self.output.progress(message)
    }

    /// Print section header
    pub fn section(&self, title: &str) -> std::io::Result<()> {
        self.output.section(title)
    }

    /// Print indented text
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        self.output.indent(message)
    }
}
