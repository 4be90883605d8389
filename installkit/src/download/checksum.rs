//! SHA-256 verification of downloaded installers.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::{InstallerError, InstallerResult};

/// Read buffer used while hashing (64 KiB).
const HASH_BUFFER_SIZE: usize = 64 * 1024;

/// Lowercase hex SHA-256 digest of the file at `path`.
///
/// The file is streamed through the hasher, so installers of any size are
/// hashed in constant memory.
pub fn sha256_file(path: &Path) -> InstallerResult<String> {
    let read_failed = |source: io::Error| InstallerError::ReadFailed {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(read_failed)?;
    let mut reader = BufReader::with_capacity(HASH_BUFFER_SIZE, file);
    let mut hasher = Sha256::new();
    io::copy(&mut reader, &mut hasher).map_err(read_failed)?;

    Ok(format!("{:x}", hasher.finalize()))
}

/// Compare two hex digests, ignoring ASCII case and surrounding whitespace.
pub fn digests_match(expected: &str, actual: &str) -> bool {
    expected.trim().eq_ignore_ascii_case(actual.trim())
}

/// Verify that a file hashes to `expected`.
///
/// # Errors
///
/// [`InstallerError::IntegrityVerification`] when the digests differ, or
/// [`InstallerError::ReadFailed`] when the file cannot be read.
pub fn verify_checksum(path: &Path, expected: &str) -> InstallerResult<()> {
    let actual = sha256_file(path)?;
    if !digests_match(expected, &actual) {
        return Err(InstallerError::IntegrityVerification {
            expected: expected.trim().to_string(),
            actual,
        });
    }
    Ok(())
}
