//! # Hasher Module
//!
//! Computes content fingerprints for duplicate detection.
//!
//! Two files get the same fingerprint exactly when their bytes are
//! identical (up to a 128-bit collision). Re-encoded copies of the same
//! picture are *not* detected.
//!
//! ## Example
//! ```rust,ignore
//! use picture_triage::core::hasher::{ContentHasher, Xxh3Hasher};
//!
//! let fingerprint = Xxh3Hasher.fingerprint(&path)?;
//! assert_eq!(fingerprint.len(), 32);
//! ```

mod file_bytes;

pub use file_bytes::{read_file_bytes, FileBytes};

use crate::error::HashError;
use std::path::Path;
use xxhash_rust::xxh3::xxh3_128;

/// Computes a fingerprint of a file's full content
pub trait ContentHasher {
    /// Hex-encoded fingerprint of the file at `path`
    fn fingerprint(&self, path: &Path) -> Result<String, HashError>;
}

/// xxh3-128 over the whole file, rendered as 32 lowercase hex digits.
#[derive(Debug, Clone, Copy, Default)]
pub struct Xxh3Hasher;

impl ContentHasher for Xxh3Hasher {
    fn fingerprint(&self, path: &Path) -> Result<String, HashError> {
        let bytes = read_file_bytes(path)?;
        Ok(to_hex(xxh3_128(bytes.as_ref())))
    }
}

fn to_hex(digest: u128) -> String {
    format!("{:032x}", digest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn identical_bytes_give_identical_fingerprints() {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("a.jpg");
        let b = temp.path().join("nested_copy.png");
        std::fs::write(&a, b"same picture bytes").unwrap();
        std::fs::write(&b, b"same picture bytes").unwrap();

        let hasher = Xxh3Hasher;
        assert_eq!(hasher.fingerprint(&a).unwrap(), hasher.fingerprint(&b).unwrap());
    }

    #[test]
    fn different_bytes_give_different_fingerprints() {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("a.jpg");
        let b = temp.path().join("b.jpg");
        std::fs::write(&a, b"picture one").unwrap();
        std::fs::write(&b, b"picture two").unwrap();

        let hasher = Xxh3Hasher;
        assert_ne!(hasher.fingerprint(&a).unwrap(), hasher.fingerprint(&b).unwrap());
    }

    #[test]
    fn fingerprint_is_fixed_length_lowercase_hex() {
        let temp = TempDir::new().unwrap();
        let empty = temp.path().join("empty.gif");
        std::fs::write(&empty, b"").unwrap();

        let fingerprint = Xxh3Hasher.fingerprint(&empty).unwrap();
        assert_eq!(fingerprint.len(), 32);
        assert!(fingerprint
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn deleted_file_fails_with_io_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("gone.jpg");
        std::fs::write(&path, b"soon gone").unwrap();
        std::fs::remove_file(&path).unwrap();

        let result = Xxh3Hasher.fingerprint(&path);
        assert!(matches!(result, Err(HashError::Io { .. })));
    }
}
