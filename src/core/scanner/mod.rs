//! # Scanner Module
//!
//! Discovers picture files under a search folder.
//!
//! Files are classified by extension only (see [`PICTURE_EXTENSIONS`]).
//! Directory entries are visited in file-name order so that two scans of
//! an unchanged tree produce the same sequence.
//!
//! ## Example
//! ```rust,ignore
//! use picture_triage::core::scanner::{PictureScanner, ScanConfig, WalkDirScanner};
//!
//! let scanner = WalkDirScanner::new(ScanConfig::default());
//! let result = scanner.scan(Path::new("/Users/me/Pictures"))?;
//! ```

mod filter;
mod walker;

pub use filter::{is_picture_file, ImageFilter, PICTURE_EXTENSIONS};
pub use walker::{ScanConfig, WalkDirScanner};

use crate::error::ScanError;
use crate::events::EventSender;
use std::path::{Path, PathBuf};

/// Result of a scan operation
#[derive(Debug)]
pub struct ScanResult {
    /// Discovered pictures, in walk order
    pub pictures: Vec<PathBuf>,
    /// Errors that occurred during scanning (non-fatal)
    pub errors: Vec<ScanError>,
}

/// Trait for picture scanners
///
/// Implement this trait to create custom scanners (e.g., for testing).
pub trait PictureScanner {
    /// Scan a folder recursively and return discovered pictures
    fn scan(&self, root: &Path) -> Result<ScanResult, ScanError>;

    /// Scan with progress reporting via events
    fn scan_with_events(&self, root: &Path, events: &EventSender)
        -> Result<ScanResult, ScanError>;
}
