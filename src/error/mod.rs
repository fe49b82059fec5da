//! # Error Module
//!
//! Error types for the picture triage tool.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - paths, file names, what went wrong
//! - **Local vs fatal** - per-picture hash and move failures are reported and
//!   skipped; a catalog that cannot be read stops the session

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum TriageError {
    #[error("Scanning error: {0}")]
    Scan(#[from] ScanError),

    #[error("Hashing error: {0}")]
    Hash(#[from] HashError),

    #[error("Move error: {0}")]
    Move(#[from] MoveError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to render output: {0}")]
    Render(#[from] serde_json::Error),
}

/// Errors that occur while discovering pictures
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Permission denied accessing: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Failed to read directory {path}: {source}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that occur while fingerprinting a picture
#[derive(Error, Debug)]
pub enum HashError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that occur while moving a picture into a destination folder
#[derive(Error, Debug)]
pub enum MoveError {
    #[error("Source file no longer exists: {path}")]
    SourceMissing { path: PathBuf },

    #[error("Destination folder is not writable: {path}: {source}")]
    DestinationNotWritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No free file name for {name} in {folder} after {attempts} attempts")]
    NamesExhausted {
        name: String,
        folder: PathBuf,
        attempts: u32,
    },

    #[error("Failed to move {from} to {to}: {source}")]
    CrossDevice {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that occur loading or saving the durable documents
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is corrupted and cannot be parsed ({source}). Fix or remove this file to start over.")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, TriageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_error_includes_path() {
        let error = ScanError::DirectoryNotFound {
            path: PathBuf::from("/photos/vacation"),
        };
        assert!(error.to_string().contains("/photos/vacation"));
    }

    #[test]
    fn hash_error_includes_path_and_cause() {
        let error = HashError::Io {
            path: PathBuf::from("/photos/gone.jpg"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        let message = error.to_string();
        assert!(message.contains("/photos/gone.jpg"));
        assert!(message.contains("no such file"));
    }

    #[test]
    fn corrupt_catalog_suggests_recovery() {
        let source = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();
        let error = CatalogError::Corrupt {
            path: PathBuf::from("/work/files.json"),
            source,
        };
        let message = error.to_string();
        assert!(message.contains("/work/files.json"));
        assert!(message.contains("Fix or remove"));
    }

    #[test]
    fn json_failure_converts_to_render_error() {
        let source = serde_json::from_str::<serde_json::Value>("[").unwrap_err();
        let error: TriageError = source.into();
        assert!(matches!(error, TriageError::Render(_)));
        assert!(error.to_string().starts_with("Failed to render output"));
    }

    #[test]
    fn move_error_converts_to_top_level() {
        let error: TriageError = MoveError::SourceMissing {
            path: PathBuf::from("/photos/a.jpg"),
        }
        .into();
        assert!(matches!(error, TriageError::Move(_)));
        assert!(error.to_string().starts_with("Move error"));
    }
}
