//! Main packaging orchestration.
//!
//! This module provides the [`Bundler`] orchestrator that runs the packaging
//! phases in order against a single output directory.

use super::{
    assemble::assemble_bundle,
    manifest::{Artifact, Manifest, ManifestBuilder, write_manifest},
    native::collect_native,
    packages::archive_packages,
};
use crate::bundler::{Result, Settings, utils::fs};
use std::path::PathBuf;

/// Outcome of a completed packaging run.
#[derive(Debug, Clone)]
pub struct PackReport {
    /// Final manifest, as written to `build.json`, including the bundle entry.
    pub manifest: Manifest,
    /// Every recorded artifact in production order; the bundle is last.
    pub artifacts: Vec<Artifact>,
    /// Location of `build.json`.
    pub manifest_path: PathBuf,
    /// Location of the aggregate bundle.
    pub bundle_path: PathBuf,
}

/// Main packaging orchestrator.
///
/// # Phases
///
/// 1. Archive each top-level input directory (`requirements-<name>.<ext>`)
/// 2. Collect native libraries (`native/<abi>/`, `native/common/`)
/// 3. Write `build.json`
/// 4. Zip the output directory into the bundle, record it, rewrite `build.json`
///
/// Phases run sequentially and stop at the first error; nothing already
/// written is cleaned up.
///
/// # Examples
///
/// ```no_run
/// use imy_bundler::bundler::{Bundler, SettingsBuilder};
///
/// # fn example() -> imy_bundler::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .input_directory("build/pip")
///     .output_directory("build/imy")
///     .python_version("311")
///     .abis_from_list("arm64-v8a x86_64")
///     .build()?;
///
/// let report = Bundler::new(settings).bundle()?;
/// println!("Bundle: {}", report.bundle_path.display());
/// for artifact in &report.artifacts {
///     println!("{} {}", artifact.checksum, artifact.key);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Bundler {
    settings: Settings,
}

impl Bundler {
    /// Creates a new bundler with the given settings.
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Runs every phase and returns the final report.
    ///
    /// The bundle timestamp is taken from [`Settings::timestamp`] when set,
    /// otherwise from the clock right before bundling.
    pub fn bundle(&self) -> Result<PackReport> {
        let output_dir = self.settings.output_directory();
        fs::create_dir_all(output_dir)?;

        let manifest = ManifestBuilder::new(self.settings.python_version());
        let manifest = archive_packages(&self.settings, manifest)?;
        let manifest = collect_native(&self.settings, manifest)?;

        write_manifest(output_dir, manifest.manifest())?;

        let timestamp = self
            .settings
            .timestamp()
            .unwrap_or_else(|| chrono::Utc::now().timestamp());
        let (manifest, bundle_path) = assemble_bundle(&self.settings, manifest, timestamp)?;

        log::info!("Wrote artifacts in: {}", output_dir.display());
        let (manifest, artifacts) = manifest.into_parts();
        Ok(PackReport {
            manifest,
            artifacts,
            manifest_path: output_dir.join(super::MANIFEST_FILE_NAME),
            bundle_path,
        })
    }

    /// Returns a reference to the bundler settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
