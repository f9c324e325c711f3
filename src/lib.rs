//! Loader bundle packager for installed Python dependencies
//!
//! This library turns a `pip install --target` tree into the artifacts a
//! multi-platform application loader consumes:
//! - one `requirements-<package>.imy` archive per top-level package directory
//! - native libraries sorted into `native/<abi>/` plus a `native/common/` fallback
//! - a `build.json` manifest mapping every artifact to its hash
//! - a single `bundle-py<tag>-<timestamp>.zip` containing all of the above
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};
