//! Packaging of installer output into loader bundles.
//!
//! The [`Bundler`] runs the pipeline described by [`Settings`]; each phase is
//! also exposed under [`builder`] for callers that need a subset.

pub mod builder;
pub mod error;
pub mod settings;
pub mod utils;

pub use builder::{Artifact, Bundler, Manifest, ManifestBuilder, PackReport};
pub use error::{Error, Result};
pub use settings::{ChecksumAlgorithm, Settings, SettingsBuilder};
