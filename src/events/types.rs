//! Event type definitions for progress reporting.

use crate::core::catalog::EntryStatus;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All events emitted while scanning and triaging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Scanning phase events
    Scan(ScanEvent),
    /// Triage session events
    Triage(TriageEvent),
}

/// Events during the scanning phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScanEvent {
    /// Scanning has started
    Started { root: PathBuf },
    /// Progress update during scanning
    Progress(ScanProgress),
    /// An error occurred but scanning continues
    Error { path: PathBuf, message: String },
    /// Scanning completed
    Completed { total_pictures: usize },
}

/// Progress information during scanning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanProgress {
    /// Number of directories scanned so far
    pub directories_scanned: usize,
    /// Number of pictures found so far
    pub pictures_found: usize,
    /// Current directory being scanned
    pub current_path: PathBuf,
}

/// Events raised by the triage engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TriageEvent {
    /// A catalog was loaded from disk
    CatalogLoaded { entries: usize, unresolved: usize },
    /// A picture is ready for a decision
    Presented { path: PathBuf, index: usize },
    /// A decision was applied
    Decided {
        path: PathBuf,
        status: EntryStatus,
        moved_to: Option<PathBuf>,
    },
    /// A byte-identical copy was set aside without being shown
    DuplicateDetected {
        path: PathBuf,
        original: PathBuf,
        moved_to: PathBuf,
    },
    /// An entry could not be hashed or moved; it was passed over
    EntryFailed { path: PathBuf, message: String },
    /// No unresolved pictures remain
    Exhausted,
    /// Catalog and settings were written
    Saved { catalog: PathBuf },
    /// An automatic save failed (the decision itself stands)
    SaveFailed { message: String },
}
