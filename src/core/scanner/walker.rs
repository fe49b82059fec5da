//! Directory walking implementation using walkdir.

use super::{filter::ImageFilter, PictureScanner, ScanResult};
use crate::error::ScanError;
use crate::events::{Event, EventSender, ScanEvent, ScanProgress};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Configuration for the directory scanner
#[derive(Debug, Clone, Default)]
pub struct ScanConfig {
    /// Whether to follow symbolic links
    pub follow_symlinks: bool,
    /// Whether to skip hidden files and directories
    pub skip_hidden: bool,
    /// Folders whose contents are never cataloged (destination folders)
    pub exclude: Vec<PathBuf>,
}

/// Scanner implementation using the walkdir crate
pub struct WalkDirScanner {
    config: ScanConfig,
    filter: ImageFilter,
}

impl WalkDirScanner {
    /// Create a new scanner with the given configuration
    pub fn new(config: ScanConfig) -> Self {
        let filter = ImageFilter::new().with_hidden(!config.skip_hidden);
        Self { config, filter }
    }

    fn is_excluded(&self, path: &Path) -> bool {
        self.config.exclude.iter().any(|folder| path.starts_with(folder))
    }

    fn is_hidden_dir(&self, path: &Path, root: &Path) -> bool {
        self.config.skip_hidden
            && path != root
            && path
                .file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with('.'))
                .unwrap_or(false)
    }
}

impl PictureScanner for WalkDirScanner {
    fn scan(&self, root: &Path) -> Result<ScanResult, ScanError> {
        self.scan_with_events(root, &crate::events::null_sender())
    }

    fn scan_with_events(&self, root: &Path, events: &EventSender) -> Result<ScanResult, ScanError> {
        if !root.is_dir() {
            return Err(ScanError::DirectoryNotFound {
                path: root.to_path_buf(),
            });
        }

        events.send(Event::Scan(ScanEvent::Started {
            root: root.to_path_buf(),
        }));

        let mut pictures = Vec::new();
        let mut errors = Vec::new();
        let mut directories_scanned = 0;

        let walker = WalkDir::new(root)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                let path = entry.path();
                if !entry.file_type().is_dir() {
                    return true;
                }
                !self.is_excluded(path) && !self.is_hidden_dir(path, root)
            });

        for entry_result in walker {
            match entry_result {
                Ok(entry) => {
                    let path = entry.path();

                    if entry.file_type().is_dir() {
                        directories_scanned += 1;
                        events.send(Event::Scan(ScanEvent::Progress(ScanProgress {
                            directories_scanned,
                            pictures_found: pictures.len(),
                            current_path: path.to_path_buf(),
                        })));
                        continue;
                    }

                    if self.filter.should_include(path) && !self.is_excluded(path) {
                        pictures.push(path.to_path_buf());
                    }
                }
                Err(e) => {
                    let path = e.path().map(|p| p.to_path_buf()).unwrap_or_default();

                    let error = if e.io_error().map(|e| e.kind())
                        == Some(std::io::ErrorKind::PermissionDenied)
                    {
                        ScanError::PermissionDenied { path: path.clone() }
                    } else {
                        ScanError::ReadDirectory {
                            path: path.clone(),
                            source: std::io::Error::other(e.to_string()),
                        }
                    };

                    warn!(path = %path.display(), "{}", error);
                    events.send(Event::Scan(ScanEvent::Error {
                        path,
                        message: error.to_string(),
                    }));
                    errors.push(error);
                }
            }
        }

        debug!(
            root = %root.display(),
            directories_scanned,
            pictures = pictures.len(),
            "scan finished"
        );
        events.send(Event::Scan(ScanEvent::Completed {
            total_pictures: pictures.len(),
        }));

        Ok(ScanResult { pictures, errors })
    }
}
