//! Digest algorithms for artifact hashes.

/// Hash algorithm used for every artifact recorded in `build.json`.
///
/// The loader verifies assets with SHA-1 digests, so that is the default.
/// SHA-256 is available for consumers that want a stronger digest.
///
/// # Examples
///
/// ```
/// use imy_bundler::bundler::ChecksumAlgorithm;
///
/// assert_eq!(ChecksumAlgorithm::default(), ChecksumAlgorithm::Sha1);
/// assert_eq!(ChecksumAlgorithm::Sha256.hex_len(), 64);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, clap::ValueEnum)]
pub enum ChecksumAlgorithm {
    /// SHA-1 (160-bit), 40 hex characters
    #[default]
    Sha1,
    /// SHA-256 (256-bit), 64 hex characters
    Sha256,
}

impl ChecksumAlgorithm {
    /// Length of a hex-encoded digest produced by this algorithm.
    pub fn hex_len(self) -> usize {
        match self {
            ChecksumAlgorithm::Sha1 => 40,
            ChecksumAlgorithm::Sha256 => 64,
        }
    }
}

impl std::fmt::Display for ChecksumAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChecksumAlgorithm::Sha1 => f.write_str("sha1"),
            ChecksumAlgorithm::Sha256 => f.write_str("sha256"),
        }
    }
}
