//! Deterministic zip archive creation.
//!
//! Entries are written in sorted path order with a fixed modification time
//! and fixed permissions, so archiving an unchanged directory twice produces
//! byte-identical files and therefore identical manifest hashes.

use crate::bundler::{
    Result,
    error::ErrorExt,
    utils::fs::{relative_key, walk_files},
};
use std::{
    fs::File,
    io::{self, BufWriter},
    path::Path,
};
use zip::{CompressionMethod, DateTime, ZipWriter, write::SimpleFileOptions};

/// Entries at or above this size need zip64 headers.
const ZIP64_THRESHOLD: u64 = u32::MAX as u64;

fn entry_options(len: u64) -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
        .unix_permissions(0o644)
        .large_file(needs_zip64(len))
}

fn needs_zip64(len: u64) -> bool {
    len >= ZIP64_THRESHOLD
}

/// Zips every file below `src_dir` into `out_zip`.
///
/// Entry names are paths relative to `src_dir`. Directories themselves are
/// not stored. `exclude`, when given, is skipped if encountered during the
/// walk, which guards against an archive swallowing itself when it is
/// written inside the directory being archived.
///
/// # Returns
///
/// The number of entries written.
pub fn zip_directory(src_dir: &Path, out_zip: &Path, exclude: Option<&Path>) -> Result<usize> {
    let files = walk_files(src_dir)?;

    let file = File::create(out_zip).fs_context("creating archive", out_zip)?;
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let mut written = 0;

    for path in files {
        if exclude.is_some_and(|excluded| path == excluded) {
            log::debug!("Not archiving {} into itself", path.display());
            continue;
        }
        let name = relative_key(&path, src_dir)?;
        let mut source = File::open(&path).fs_context("opening file for archiving", &path)?;
        let len = source
            .metadata()
            .fs_context("reading file metadata", &path)?
            .len();
        zip.start_file(name, entry_options(len))?;
        io::copy(&mut source, &mut zip).fs_context("archiving file", &path)?;
        written += 1;
    }

    zip.finish()?
        .into_inner()
        .map_err(|e| e.into_error())
        .fs_context("flushing archive", out_zip)?;
    log::debug!("Archived {} files into {}", written, out_zip.display());
    Ok(written)
}
