//! Aggregate bundle archive.

use super::{
    archive::zip_directory,
    manifest::{Artifact, ManifestBuilder, write_manifest},
};
use crate::bundler::{Result, Settings};
use std::path::PathBuf;

/// Zips the whole output directory into `bundle-py<tag>-<timestamp>.zip`.
///
/// The bundle contains every file present in the output directory when the
/// walk starts (archives, native folders, `build.json`), with paths relative
/// to the output directory, and never itself. Once written it is hashed,
/// recorded under its file name, and `build.json` is rewritten so the
/// manifest on disk lists the bundle too. The copy of `build.json` inside the
/// bundle is the one written before bundling and does not.
///
/// # Returns
///
/// The updated manifest and the bundle path.
pub fn assemble_bundle(
    settings: &Settings,
    manifest: ManifestBuilder,
    timestamp: i64,
) -> Result<(ManifestBuilder, PathBuf)> {
    let output_dir = settings.output_directory();
    let bundle_name = settings.bundle_file_name(timestamp);
    let bundle_path = output_dir.join(&bundle_name);

    log::info!("Creating bundle zip: {}", bundle_path.display());
    zip_directory(output_dir, &bundle_path, Some(&bundle_path))?;

    let manifest = manifest.record(Artifact::from_file(
        bundle_name,
        &bundle_path,
        settings.checksum(),
    )?);
    write_manifest(output_dir, manifest.manifest())?;

    Ok((manifest, bundle_path))
}
