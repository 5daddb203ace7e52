use sha2::{Digest, Sha256};

use crate::error::{GeositeError, Result};

/// Length of a hex-encoded SHA-256 digest
const SHA256_HEX_LEN: usize = 64;

/// Hex-encoded SHA-256 of `data`
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Verify `data` against a `sha256sum`-style checksum file.
///
/// Only the leading 64 characters (the digest) are compared; the file name
/// that usually follows is ignored.
pub fn verify_sha256sum(data: &[u8], checksum_file: &[u8]) -> Result<()> {
    let actual = sha256_hex(data);
    let expected = checksum_file
        .get(..SHA256_HEX_LEN)
        .map(|digest| String::from_utf8_lossy(digest).to_ascii_lowercase())
        .unwrap_or_else(|| String::from_utf8_lossy(checksum_file).trim().to_string());

    if expected != actual {
        return Err(GeositeError::ChecksumMismatch { expected, actual });
    }
    Ok(())
}
