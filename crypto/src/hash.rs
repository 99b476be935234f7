//! SHA-256 hashing.

use sha2::{Digest, Sha256};

/// Compute the SHA-256 digest of arbitrary data.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Hash multiple byte slices in sequence (avoids concatenation allocation).
pub fn sha256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Lowercase hex SHA-256 digest, 64 characters.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(sha256(data))
}
