//! Native library collection.
//!
//! Shared objects are copied out of the installer tree so the loader can
//! extract them without opening the package archives: once per declared ABI
//! into `native/<abi>/`, and once more into the `native/common/` fallback
//! folder for anything the loader cannot resolve to an ABI.

use super::{
    checksum::calculate_checksum,
    manifest::{Artifact, ManifestBuilder},
};
use crate::bundler::{Result, Settings, utils::fs};
use std::path::Path;

/// Name of the output folder holding all native libraries.
pub const NATIVE_DIR: &str = "native";

/// Fallback folder below [`NATIVE_DIR`].
pub const COMMON_ABI_DIR: &str = "common";

/// Extension identifying a native shared library.
pub const NATIVE_EXTENSION: &str = ".so";

fn is_native_library(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().ends_with(NATIVE_EXTENSION))
}

/// Copies shared libraries into per-ABI folders and the common fallback.
///
/// Runs [`collect_abi_libraries`] followed by [`collect_common_libraries`].
pub fn collect_native(settings: &Settings, manifest: ManifestBuilder) -> Result<ManifestBuilder> {
    let manifest = collect_abi_libraries(settings, manifest)?;
    collect_common_libraries(settings, manifest)
}

/// Copies every `.so` below `<input>/<abi>` flat into `native/<abi>/`.
///
/// ABI tokens are handled in the order given; tokens without a matching
/// input directory are skipped. Nested directories collapse to the file
/// name, and a later library with the same name overwrites the earlier copy
/// and its manifest entry.
pub fn collect_abi_libraries(
    settings: &Settings,
    manifest: ManifestBuilder,
) -> Result<ManifestBuilder> {
    let mut manifest = manifest;
    let native_root = settings.output_directory().join(NATIVE_DIR);

    for abi in settings.abis() {
        let source_dir = settings.input_directory().join(abi);
        if !source_dir.is_dir() {
            log::debug!("No input directory for ABI {abi}, skipping");
            continue;
        }

        let target_dir = native_root.join(abi);
        fs::create_dir_all(&target_dir)?;

        for library in fs::walk_files(&source_dir)?
            .into_iter()
            .filter(|p| is_native_library(p))
        {
            let name = fs::file_name(&library)?;
            let destination = target_dir.join(&name);
            log::info!(
                "Copying native: {} -> {}",
                library.display(),
                destination.display()
            );
            fs::copy_file(&library, &destination)?;

            let key = format!("{NATIVE_DIR}/{abi}/{name}");
            manifest = manifest.record(Artifact::from_file(
                key,
                &destination,
                settings.checksum(),
            )?);
        }
    }

    Ok(manifest)
}

/// Copies every `.so` in the whole input tree into `native/common/`.
///
/// First writer wins: a library whose file name already exists in the
/// fallback folder is skipped and not re-hashed. The walk is sorted, so the
/// winner is stable across runs. A skipped library whose content differs
/// from the one already in place is reported as a warning.
pub fn collect_common_libraries(
    settings: &Settings,
    manifest: ManifestBuilder,
) -> Result<ManifestBuilder> {
    let mut manifest = manifest;
    let common_dir = settings
        .output_directory()
        .join(NATIVE_DIR)
        .join(COMMON_ABI_DIR);

    for library in fs::walk_files(settings.input_directory())?
        .into_iter()
        .filter(|p| is_native_library(p))
    {
        fs::create_dir_all(&common_dir)?;
        let name = fs::file_name(&library)?;
        let destination = common_dir.join(&name);

        if destination.exists() {
            warn_on_collision(settings, &library, &destination)?;
            continue;
        }

        log::info!(
            "Copying common .so: {} -> {}",
            library.display(),
            destination.display()
        );
        fs::copy_file(&library, &destination)?;

        let key = format!("{NATIVE_DIR}/{COMMON_ABI_DIR}/{name}");
        manifest = manifest.record(Artifact::from_file(
            key,
            &destination,
            settings.checksum(),
        )?);
    }

    Ok(manifest)
}

/// Warns when a skipped library differs from the one already collected.
///
/// Returns whether the contents differed.
fn warn_on_collision(settings: &Settings, library: &Path, existing: &Path) -> Result<bool> {
    let incoming = calculate_checksum(library, settings.checksum())?;
    let current = calculate_checksum(existing, settings.checksum())?;
    let differs = incoming != current;
    if differs {
        log::warn!(
            "{} differs from {} already collected; keeping the existing file",
            library.display(),
            existing.display()
        );
    }
    Ok(differs)
}
