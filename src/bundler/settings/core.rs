//! Core Settings struct and implementations.

use super::ChecksumAlgorithm;
use std::path::{Path, PathBuf};

/// Extension given to per-package archives when none is configured.
pub const DEFAULT_ARCHIVE_EXTENSION: &str = "imy";

/// Main settings for a packaging run.
///
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder). Holds the
/// input tree produced by the dependency installer, the output directory all
/// artifacts are written to, and the caller supplied tags.
///
/// # Examples
///
/// ```no_run
/// use imy_bundler::bundler::SettingsBuilder;
///
/// # fn example() -> imy_bundler::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .input_directory("build/pip")
///     .output_directory("build/imy")
///     .python_version("311")
///     .abis(["arm64-v8a", "x86_64"])
///     .build()?;
///
/// assert_eq!(settings.bundle_file_name(1_700_000_000), "bundle-py311-1700000000.zip");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    /// Root of the installed dependency tree.
    input_directory: PathBuf,

    /// Directory receiving archives, native folders, manifest and bundle.
    output_directory: PathBuf,

    /// Python version tag, e.g. "311". Written verbatim into `build.json`.
    python_version: String,

    /// ABI tokens in caller order. Never parsed or validated.
    abis: Vec<String>,

    /// Extension of per-package archives, without the leading dot.
    archive_extension: String,

    /// Digest used for every recorded asset.
    checksum: ChecksumAlgorithm,

    /// Fixed unix timestamp for the bundle name.
    ///
    /// None means the current time at bundling.
    timestamp: Option<i64>,
}

impl Settings {
    /// Returns the input root.
    pub fn input_directory(&self) -> &Path {
        &self.input_directory
    }

    /// Returns the output directory.
    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }

    /// Returns the python version tag.
    pub fn python_version(&self) -> &str {
        &self.python_version
    }

    /// Returns the ABI tokens in the order they were supplied.
    pub fn abis(&self) -> &[String] {
        &self.abis
    }

    /// Returns the per-package archive extension.
    pub fn archive_extension(&self) -> &str {
        &self.archive_extension
    }

    /// Returns the checksum algorithm.
    pub fn checksum(&self) -> ChecksumAlgorithm {
        self.checksum
    }

    /// Returns the fixed bundle timestamp, if any.
    pub fn timestamp(&self) -> Option<i64> {
        self.timestamp
    }

    /// Archive file name for a top-level package directory.
    pub fn package_archive_name(&self, package: &str) -> String {
        format!("requirements-{}.{}", package, self.archive_extension)
    }

    /// Bundle file name for the given unix timestamp.
    pub fn bundle_file_name(&self, timestamp: i64) -> String {
        format!("bundle-py{}-{}.zip", self.python_version, timestamp)
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    pub(super) fn new(
        input_directory: PathBuf,
        output_directory: PathBuf,
        python_version: String,
        abis: Vec<String>,
        archive_extension: String,
        checksum: ChecksumAlgorithm,
        timestamp: Option<i64>,
    ) -> Self {
        Self {
            input_directory,
            output_directory,
            python_version,
            abis,
            archive_extension,
            checksum,
            timestamp,
        }
    }
}
