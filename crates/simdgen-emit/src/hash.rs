//! Content digests of generated artifacts.
//!
//! Digests cover the exact bytes written, so two runs over the same inputs
//! report identical digests.

use sha2::{Digest, Sha256};

/// A 32-byte SHA-256 content hash.
pub type ContentHash = [u8; 32];

/// Compute the SHA-256 hash of raw bytes.
pub fn content_hash(bytes: &[u8]) -> ContentHash {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hasher.finalize().into()
}

/// Format a content hash as a hex string.
pub fn hash_hex(hash: &ContentHash) -> String {
    hash.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_hash() {
        assert_eq!(content_hash(b"#include \"foo.hpp\"\n"), content_hash(b"#include \"foo.hpp\"\n"));
    }

    #[test]
    fn known_digest() {
        assert_eq!(
            hash_hex(&content_hash(b"")),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
