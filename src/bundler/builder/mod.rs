//! Packaging pipeline.
//!
//! This module provides the [`Bundler`] orchestrator and the phases it runs:
//!
//! - [`packages`] - one archive per top-level package directory
//! - [`native`] - per-ABI and fallback native library folders
//! - [`manifest`] - `build.json` model, builder and writer
//! - [`assemble`] - the aggregate bundle archive
//! - [`checksum`] - streaming artifact hashes
//! - [`archive`] - deterministic zip writing shared by the phases above

pub mod archive;
pub mod assemble;
pub mod checksum;
pub mod manifest;
pub mod native;
mod orchestrator;
pub mod packages;

pub use manifest::{Artifact, MANIFEST_FILE_NAME, Manifest, ManifestBuilder};
pub use orchestrator::{Bundler, PackReport};
