//! Artifact checksum calculation.
//!
//! Every artifact recorded in the manifest is hashed by streaming the file in
//! fixed 1 MiB chunks, so memory use stays bounded no matter how large a
//! bundle grows.

use crate::bundler::{ChecksumAlgorithm, Result, error::ErrorExt};
use sha1::Sha1;
use sha2::{Digest, Sha256};
use std::{fs::File, io::Read, path::Path};

/// Read buffer size used while hashing.
pub const CHUNK_SIZE: usize = 1024 * 1024;

/// Calculates the hex-encoded checksum of a single file.
///
/// # Arguments
///
/// * `path` - Path to the file to hash
/// * `algorithm` - Digest to compute
///
/// # Returns
///
/// * `Ok(String)` - Lowercase hex digest
/// * `Err` - If the file cannot be opened or read
pub fn calculate_checksum(path: &Path, algorithm: ChecksumAlgorithm) -> Result<String> {
    match algorithm {
        ChecksumAlgorithm::Sha1 => digest_file::<Sha1>(path),
        ChecksumAlgorithm::Sha256 => digest_file::<Sha256>(path),
    }
}

fn digest_file<D: Digest>(path: &Path) -> Result<String> {
    let mut file = File::open(path).fs_context("opening file for hashing", path)?;
    let mut hasher = D::new();
    let mut buffer = vec![0u8; CHUNK_SIZE];

    loop {
        let n = file
            .read(&mut buffer)
            .fs_context("reading file for hash calculation", path)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}
