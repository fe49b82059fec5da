//! Whole-file reads for content hashing.
//!
//! Large pictures are memory-mapped to avoid copying them through a heap
//! buffer. Small files go through `fs::read`, which has less overhead.

use crate::error::HashError;
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;

/// Minimum file size to use memory-mapped I/O (1MB)
const MMAP_THRESHOLD: u64 = 1024 * 1024;

/// File bytes that may be either owned or memory-mapped.
pub enum FileBytes {
    /// Standard heap-allocated bytes
    Vec(Vec<u8>),
    /// Memory-mapped bytes; the map is released on drop
    Mmap(Mmap),
}

impl AsRef<[u8]> for FileBytes {
    fn as_ref(&self) -> &[u8] {
        match self {
            FileBytes::Vec(bytes) => bytes.as_slice(),
            FileBytes::Mmap(map) => &map[..],
        }
    }
}

/// Read the full content of `path`.
pub fn read_file_bytes(path: &Path) -> Result<FileBytes, HashError> {
    let io_error = |source| HashError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_error)?;
    let len = file.metadata().map_err(io_error)?.len();

    if len >= MMAP_THRESHOLD {
        // SAFETY: the map is read-only and only lives as long as the
        // returned value. Another process truncating the file while we hash
        // it is the single-user hazard we accept.
        let map = unsafe { Mmap::map(&file) }.map_err(io_error)?;
        Ok(FileBytes::Mmap(map))
    } else {
        drop(file);
        std::fs::read(path).map(FileBytes::Vec).map_err(io_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn small_files_are_read_into_memory() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("small.jpg");
        std::fs::write(&path, b"tiny").unwrap();

        let bytes = read_file_bytes(&path).unwrap();
        assert!(matches!(bytes, FileBytes::Vec(_)));
        assert_eq!(bytes.as_ref(), b"tiny");
    }

    #[test]
    fn large_files_are_mapped() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("large.tiff");
        let content = vec![7u8; MMAP_THRESHOLD as usize + 10];
        std::fs::write(&path, &content).unwrap();

        let bytes = read_file_bytes(&path).unwrap();
        assert!(matches!(bytes, FileBytes::Mmap(_)));
        assert_eq!(bytes.as_ref().len(), content.len());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = read_file_bytes(Path::new("/nonexistent/gone.jpg"));
        assert!(matches!(result, Err(HashError::Io { .. })));
    }
}
