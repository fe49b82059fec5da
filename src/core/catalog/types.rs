//! Types for the catalog and settings documents.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the settings document inside the working folder
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Triage status of one picture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    /// Discovered, not decided yet
    Found,
    Kept,
    Skipped,
    Archived,
    /// Byte-identical to an entry seen earlier
    Duplicate,
}

impl EntryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Found => "found",
            Self::Kept => "kept",
            Self::Skipped => "skipped",
            Self::Archived => "archived",
            Self::Duplicate => "duplicate",
        }
    }

    /// Every status other than `Found` is final
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Found)
    }
}

impl std::fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One picture's record in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PictureEntry {
    /// Absolute path; unique within a catalog
    #[serde(rename = "filename")]
    pub path: PathBuf,
    pub status: EntryStatus,
    /// Content fingerprint, filled the first time the entry is visited
    #[serde(default)]
    pub hash: Option<String>,
}

impl PictureEntry {
    /// A freshly discovered picture
    pub fn found(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            status: EntryStatus::Found,
            hash: None,
        }
    }
}

/// Destination folders and the catalog location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub archive_path: PathBuf,
    pub duplicate_path: PathBuf,
    pub keep_path: PathBuf,
    pub status_file: PathBuf,
}

impl Settings {
    /// First-run defaults, all inside `working_folder`
    pub fn defaults_for(working_folder: &Path) -> Self {
        Self {
            archive_path: working_folder.join("archive"),
            duplicate_path: working_folder.join("duplicates"),
            keep_path: working_folder.join("keep"),
            status_file: working_folder.join("files.json"),
        }
    }

    /// Folders that receive moved pictures
    pub fn destination_folders(&self) -> Vec<PathBuf> {
        vec![
            self.keep_path.clone(),
            self.archive_path.clone(),
            self.duplicate_path.clone(),
        ]
    }
}

/// Count of entries per status
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSummary {
    pub total: usize,
    pub found: usize,
    pub kept: usize,
    pub skipped: usize,
    pub archived: usize,
    pub duplicate: usize,
}

impl CatalogSummary {
    pub(crate) fn count(&mut self, status: EntryStatus) {
        self.total += 1;
        match status {
            EntryStatus::Found => self.found += 1,
            EntryStatus::Kept => self.kept += 1,
            EntryStatus::Skipped => self.skipped += 1,
            EntryStatus::Archived => self.archived += 1,
            EntryStatus::Duplicate => self.duplicate += 1,
        }
    }

    /// Entries that have reached a final status
    pub fn resolved(&self) -> usize {
        self.total - self.found
    }
}
