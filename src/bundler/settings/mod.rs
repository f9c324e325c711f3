//! Configuration structures for packaging runs.
//!
//! [`Settings`] is the immutable configuration consumed by every phase of the
//! pipeline; [`SettingsBuilder`] constructs and validates it.

mod algorithm;
mod builder;
mod core;

pub use algorithm::ChecksumAlgorithm;
pub use builder::SettingsBuilder;
pub use self::core::{DEFAULT_ARCHIVE_EXTENSION, Settings};
