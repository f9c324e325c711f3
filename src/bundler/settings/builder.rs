//! Builder for constructing Settings.

use super::{ChecksumAlgorithm, DEFAULT_ARCHIVE_EXTENSION, Settings};
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// # Examples
///
/// ```no_run
/// use imy_bundler::bundler::{ChecksumAlgorithm, SettingsBuilder};
///
/// # fn example() -> imy_bundler::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .input_directory("build/pip")
///     .output_directory("build/imy")
///     .python_version("311")
///     .abis_from_list("arm64-v8a x86_64")
///     .checksum(ChecksumAlgorithm::Sha256)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    input_directory: Option<PathBuf>,
    output_directory: Option<PathBuf>,
    python_version: Option<String>,
    abis: Vec<String>,
    archive_extension: Option<String>,
    checksum: ChecksumAlgorithm,
    timestamp: Option<i64>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the input root (the dependency installer's target directory).
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn input_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.input_directory = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the output directory. Created if it does not exist.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn output_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_directory = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the python version tag.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn python_version(mut self, tag: impl Into<String>) -> Self {
        self.python_version = Some(tag.into());
        self
    }

    /// Sets the ABI tokens, replacing any previously set.
    pub fn abis<I, S>(mut self, abis: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.abis = abis.into_iter().map(Into::into).collect();
        self
    }

    /// Appends the whitespace separated tokens of `list` to the ABI tokens.
    ///
    /// An empty or blank list adds nothing.
    pub fn abis_from_list(mut self, list: &str) -> Self {
        self.abis.extend(list.split_whitespace().map(str::to_string));
        self
    }

    /// Sets the per-package archive extension (without the dot).
    ///
    /// Default: `imy`
    pub fn archive_extension(mut self, extension: impl Into<String>) -> Self {
        self.archive_extension = Some(extension.into());
        self
    }

    /// Sets the checksum algorithm.
    ///
    /// Default: [`ChecksumAlgorithm::Sha1`]
    pub fn checksum(mut self, algorithm: ChecksumAlgorithm) -> Self {
        self.checksum = algorithm;
        self
    }

    /// Pins the bundle timestamp instead of using the clock.
    pub fn timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if `input_directory`, `output_directory` or
    /// `python_version` is missing, if the input directory is not a
    /// directory, or if the archive extension is empty.
    pub fn build(self) -> crate::bundler::Result<Settings> {
        use crate::bundler::error::Context;

        let input_directory = self
            .input_directory
            .context("input_directory is required")?;
        if !input_directory.is_dir() {
            crate::bail!(
                "input directory {} does not exist or is not a directory",
                input_directory.display()
            );
        }

        let archive_extension = self
            .archive_extension
            .map(|ext| ext.trim_start_matches('.').to_string())
            .unwrap_or_else(|| DEFAULT_ARCHIVE_EXTENSION.to_string());
        if archive_extension.is_empty() {
            crate::bail!("archive extension cannot be empty");
        }

        Ok(Settings::new(
            input_directory,
            self.output_directory
                .context("output_directory is required")?,
            self.python_version
                .context("python_version is required")?,
            self.abis,
            archive_extension,
            self.checksum,
            self.timestamp,
        ))
    }
}
