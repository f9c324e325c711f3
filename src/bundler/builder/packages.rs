//! Per-package archives.
//!
//! Every top-level directory of the installer output becomes one
//! `requirements-<name>.<ext>` archive the loader can open on its own.

use super::{
    archive::zip_directory,
    manifest::{Artifact, ManifestBuilder},
};
use crate::bundler::{Result, Settings, utils::fs};

/// Archives each direct subdirectory of the input root.
///
/// Directories are processed in sorted name order; plain files at the top
/// level are skipped. Each archive is hashed and recorded under its file name.
///
/// # Errors
///
/// Any unreadable directory or file aborts the run. Archives written before
/// the failure are left in place.
pub fn archive_packages(settings: &Settings, manifest: ManifestBuilder) -> Result<ManifestBuilder> {
    let mut manifest = manifest;

    for package_dir in fs::sorted_subdirectories(settings.input_directory())? {
        let name = fs::file_name(&package_dir)?;
        let archive_name = settings.package_archive_name(&name);
        let archive_path = settings.output_directory().join(&archive_name);

        log::info!(
            "Zipping {} -> {}",
            package_dir.display(),
            archive_path.display()
        );
        zip_directory(&package_dir, &archive_path, None)?;

        manifest = manifest.record(Artifact::from_file(
            archive_name,
            &archive_path,
            settings.checksum(),
        )?);
    }

    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::SettingsBuilder;
    use std::fs as stdfs;

    #[test]
    fn one_archive_per_directory_and_files_skipped() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        stdfs::create_dir(input.path().join("requests")).unwrap();
        stdfs::write(input.path().join("requests/api.py"), b"api").unwrap();
        stdfs::create_dir(input.path().join("idna")).unwrap();
        stdfs::write(input.path().join("idna/core.py"), b"core").unwrap();
        stdfs::write(input.path().join("six.py"), b"six").unwrap();

        let settings = SettingsBuilder::new()
            .input_directory(input.path())
            .output_directory(output.path())
            .python_version("311")
            .build()
            .unwrap();

        let manifest = archive_packages(&settings, ManifestBuilder::new("311")).unwrap();

        let keys: Vec<&str> = manifest.artifacts().iter().map(|a| a.key.as_str()).collect();
        assert_eq!(keys, ["requirements-idna.imy", "requirements-requests.imy"]);
        assert!(!output.path().join("requirements-six.py.imy").exists());
        for artifact in manifest.artifacts() {
            assert!(artifact.path.is_file());
            assert_eq!(artifact.checksum.len(), 40);
        }
    }
}
