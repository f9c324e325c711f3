//! `build.json` manifest model and writer.
//!
//! The asset map is accumulated in a [`ManifestBuilder`] that each pipeline
//! phase takes by value and hands back, so the set of recorded artifacts is
//! always visible in the function signatures instead of living in shared
//! state.

use super::checksum::calculate_checksum;
use crate::bundler::{ChecksumAlgorithm, Result, error::ErrorExt};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

/// File name of the manifest inside the output directory.
pub const MANIFEST_FILE_NAME: &str = "build.json";

/// Manifest consumed by the runtime loader.
///
/// Serialized field order is `python_version`, `assets`, `extract_packages`;
/// asset keys are kept sorted so the file is stable across runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Python version tag supplied by the caller.
    pub python_version: String,
    /// Artifact path (relative to the output directory) to hex digest.
    pub assets: BTreeMap<String, String>,
    /// Reserved for the loader; always empty.
    pub extract_packages: Vec<String>,
}

/// A file produced by a packaging run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Manifest key, `/`-separated and relative to the output directory.
    pub key: String,
    /// Location on disk.
    pub path: PathBuf,
    /// Hex digest of the file contents.
    pub checksum: String,
    /// Size in bytes.
    pub size: u64,
}

impl Artifact {
    /// Hashes the file at `path` and describes it under `key`.
    pub fn from_file(
        key: impl Into<String>,
        path: &Path,
        algorithm: ChecksumAlgorithm,
    ) -> Result<Self> {
        let size = std::fs::metadata(path)
            .fs_context("reading artifact metadata", path)?
            .len();
        let checksum = calculate_checksum(path, algorithm)?;
        Ok(Self {
            key: key.into(),
            path: path.to_path_buf(),
            checksum,
            size,
        })
    }
}

/// Accumulates artifacts and their hashes across the pipeline phases.
#[derive(Debug, Clone)]
pub struct ManifestBuilder {
    manifest: Manifest,
    artifacts: Vec<Artifact>,
}

impl ManifestBuilder {
    /// Starts an empty manifest for the given python version tag.
    pub fn new(python_version: impl Into<String>) -> Self {
        Self {
            manifest: Manifest {
                python_version: python_version.into(),
                assets: BTreeMap::new(),
                extract_packages: Vec::new(),
            },
            artifacts: Vec::new(),
        }
    }

    /// Records an artifact, replacing any earlier record with the same key.
    pub fn record(mut self, artifact: Artifact) -> Self {
        self.manifest
            .assets
            .insert(artifact.key.clone(), artifact.checksum.clone());
        match self.artifacts.iter_mut().find(|a| a.key == artifact.key) {
            Some(existing) => *existing = artifact,
            None => self.artifacts.push(artifact),
        }
        self
    }

    /// The manifest as recorded so far.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Recorded artifacts in the order they were first produced.
    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    /// Splits into the manifest and the artifact list.
    pub fn into_parts(self) -> (Manifest, Vec<Artifact>) {
        (self.manifest, self.artifacts)
    }
}

/// Writes `manifest` to `build.json` in `output_dir`, replacing any previous file.
///
/// Uses two-space indentation.
pub fn write_manifest(output_dir: &Path, manifest: &Manifest) -> Result<PathBuf> {
    let path = output_dir.join(MANIFEST_FILE_NAME);
    let file = File::create(&path).fs_context("creating manifest", &path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, manifest)?;
    writer.flush().fs_context("writing manifest", &path)?;
    log::debug!(
        "Wrote {} with {} assets",
        path.display(),
        manifest.assets.len()
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact(key: &str, checksum: &str) -> Artifact {
        Artifact {
            key: key.to_string(),
            path: PathBuf::from(key),
            checksum: checksum.to_string(),
            size: 1,
        }
    }

    #[test]
    fn later_record_replaces_same_key() {
        let builder = ManifestBuilder::new("311")
            .record(artifact("native/common/a.so", "old"))
            .record(artifact("requirements-x.imy", "x"))
            .record(artifact("native/common/a.so", "new"));

        assert_eq!(builder.manifest().assets["native/common/a.so"], "new");
        assert_eq!(builder.artifacts().len(), 2);
        assert_eq!(builder.artifacts()[0].checksum, "new");
    }

    #[test]
    fn serialized_layout_is_stable() {
        let dir = tempfile::tempdir().unwrap();
        let builder = ManifestBuilder::new("311")
            .record(artifact("requirements-b.imy", "bb"))
            .record(artifact("native/x86_64/lib.so", "cc"))
            .record(artifact("requirements-a.imy", "aa"));

        let path = write_manifest(dir.path(), builder.manifest()).unwrap();
        let text = std::fs::read_to_string(path).unwrap();

        let expected = r#"{
  "python_version": "311",
  "assets": {
    "native/x86_64/lib.so": "cc",
    "requirements-a.imy": "aa",
    "requirements-b.imy": "bb"
  },
  "extract_packages": []
}"#;
        assert_eq!(text, expected);
    }

    #[test]
    fn rewrite_overwrites_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let first = ManifestBuilder::new("39").record(artifact("a", "1"));
        write_manifest(dir.path(), first.manifest()).unwrap();
        let second = first.record(artifact("b", "2"));
        let path = write_manifest(dir.path(), second.manifest()).unwrap();

        let parsed: Manifest =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(&parsed, second.manifest());
    }
}
