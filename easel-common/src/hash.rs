//! SHA-256 helpers
//!
//! Produces the lowercase hex digests used by legacy account records. New
//! records use a salted hash instead; see the studio's password module.

use sha2::{Digest, Sha256};

/// Compute the SHA-256 digest of a string and return it as lowercase hex
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Compare two strings without short-circuiting on the first differing byte
///
/// Length is not hidden. Used to compare fixed-length digests.
pub fn constant_time_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
