//! Error types for packaging operations.
//!
//! Every filesystem failure carries the operation that was attempted and the
//! path it was attempted on. Display output names the failing step; the
//! underlying cause is reachable through [`std::error::Error::source`].

use std::{
    fmt::Display,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Result type alias for packaging operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while archiving, collecting, hashing or writing the manifest.
#[derive(Error, Debug)]
pub enum Error {
    /// Bare I/O error without path information.
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    /// Filesystem error with the operation and path that failed.
    #[error("{context} {}", path.display())]
    Fs {
        /// Operation being performed, e.g. "copying native library".
        context: &'static str,
        /// Path the operation was performed on.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        error: std::io::Error,
    },

    /// Directory traversal failed.
    #[error("walking directory")]
    WalkDir(#[from] walkdir::Error),

    /// Archive creation failed.
    #[error("writing zip archive")]
    Zip(#[from] zip::result::ZipError),

    /// Manifest serialization failed.
    #[error("serializing manifest")]
    Json(#[from] serde_json::Error),

    /// A walked path was not below its root.
    #[error(transparent)]
    StripPrefix(#[from] std::path::StripPrefixError),

    /// Anything else, with a human readable message.
    #[error("{0}")]
    GenericError(String),
}

/// Attaches filesystem context to I/O results.
pub trait ErrorExt<T> {
    /// Wraps the error with the attempted operation and the path involved.
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

/// Converts options and foreign errors into [`Error::GenericError`] with a message.
pub trait Context<T> {
    /// Adds a message describing what was expected.
    fn context<C: Display>(self, context: C) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context<C: Display>(self, context: C) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }
}

impl<T> Context<T> for Result<T> {
    fn context<C: Display>(self, context: C) -> Result<T> {
        self.map_err(|e| Error::GenericError(format!("{context}: {e}")))
    }
}

/// Returns early with a [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($($arg)*)))
    };
}
