//! File system utilities for packaging.
//!
//! Provides deterministic directory traversal, file copies with automatic
//! directory creation, and conversion of relative paths into archive keys.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Creates all of the directories of the specified path.
///
/// Succeeds if the directory already exists.
pub fn create_dir_all(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).fs_context("creating directory", path)
}

/// Copies a regular file from one path to another, creating any parent
/// directories of the destination path as necessary.
///
/// Overwrites the destination if it exists. Fails if the source path is a
/// directory or doesn't exist.
pub fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if !from.exists() {
        return Err(Error::GenericError(format!("{from:?} does not exist")));
    }
    if !from.is_file() {
        return Err(Error::GenericError(format!("{from:?} is not a file")));
    }
    if let Some(dest_dir) = to.parent() {
        create_dir_all(dest_dir)?;
    }
    std::fs::copy(from, to).fs_context("copying file", from)?;
    Ok(())
}

/// Direct subdirectories of `root`, sorted by name.
///
/// Non-directory entries are skipped. Symlinks pointing at directories are
/// followed, matching how the installer's tree is usually consumed.
pub fn sorted_subdirectories(root: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in std::fs::read_dir(root).fs_context("reading directory", root)? {
        let entry = entry.fs_context("reading directory entry", root)?;
        let path = entry.path();
        if path.is_dir() {
            dirs.push(path);
        } else {
            log::debug!("Skipping non-directory entry {}", path.display());
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// Every file below `root`, in a stable depth-first order.
///
/// Entries within a directory are visited sorted by file name, so two walks
/// over an unchanged tree always yield the same sequence. Symlinks are not
/// followed during traversal, but a symlink that resolves to a regular file
/// is reported like one.
pub fn walk_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = entry?;
        let file_type = entry.file_type();
        if file_type.is_file() || (file_type.is_symlink() && entry.path().is_file()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Relative `/`-separated key for `path` below `root`.
///
/// Used both for archive entry names and manifest keys, so the output is
/// identical on every host platform.
pub fn relative_key(path: &Path, root: &Path) -> Result<String> {
    let rel = path.strip_prefix(root)?;
    let parts: Vec<String> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    Ok(parts.join("/"))
}

/// File name of `path` as an owned string.
pub fn file_name(path: &Path) -> Result<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| Error::GenericError(format!("{} has no file name", path.display())))
}
