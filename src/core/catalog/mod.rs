//! # Catalog Module
//!
//! The durable record of every discovered picture and its triage status.
//!
//! The catalog keeps entries in discovery order and never reorders them.
//! Two indexes are rebuilt whenever a catalog is built or loaded. The path
//! index enforces one entry per path. The hash index maps each fingerprint
//! to the first entry that carries it and is not itself a duplicate.

mod store;
mod types;

pub use store::{read_json, write_json};
pub use types::*;

use crate::core::scanner::{PictureScanner, ScanResult};
use crate::error::ScanError;
use crate::events::EventSender;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Ordered picture entries plus lookup indexes
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<PictureEntry>,
    by_path: HashMap<PathBuf, usize>,
    by_hash: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog from entries, dropping repeated paths
    pub fn from_entries(entries: impl IntoIterator<Item = PictureEntry>) -> Self {
        let mut catalog = Self::default();
        for entry in entries {
            if catalog.by_path.contains_key(&entry.path) {
                warn!(path = %entry.path.display(), "dropping repeated catalog entry");
                continue;
            }
            catalog.push(entry);
        }
        catalog
    }

    /// Full scan of `root`: every picture at `Found`, no hash
    pub fn scan(
        scanner: &dyn PictureScanner,
        root: &Path,
        events: &EventSender,
    ) -> Result<Self, ScanError> {
        let ScanResult { pictures, errors } = scanner.scan_with_events(root, events)?;
        let catalog = Self::from_entries(pictures.into_iter().map(PictureEntry::found));
        info!(
            root = %root.display(),
            pictures = catalog.len(),
            errors = errors.len(),
            "scanned search folder"
        );
        Ok(catalog)
    }

    fn push(&mut self, entry: PictureEntry) {
        let index = self.entries.len();
        self.by_path.insert(entry.path.clone(), index);
        if let Some(hash) = &entry.hash {
            if self.takes_over(hash, entry.status) {
                self.by_hash.insert(hash.clone(), index);
            }
        }
        self.entries.push(entry);
    }

    /// An entry with `status` becomes the holder of `hash` when nobody holds
    /// it yet or the current holder was itself set aside as a duplicate
    fn takes_over(&self, hash: &str, status: EntryStatus) -> bool {
        match self.by_hash.get(hash).and_then(|&holder| self.entries.get(holder)) {
            Some(holder) => {
                holder.status == EntryStatus::Duplicate && status != EntryStatus::Duplicate
            }
            None => true,
        }
    }

    /// Append pictures whose paths are not cataloged yet; returns how many
    pub fn merge(&mut self, paths: impl IntoIterator<Item = PathBuf>) -> usize {
        let before = self.entries.len();
        for path in paths {
            if !self.by_path.contains_key(&path) {
                self.push(PictureEntry::found(path));
            }
        }
        self.entries.len() - before
    }

    pub fn entries(&self) -> &[PictureEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&PictureEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_path(&self, path: &Path) -> bool {
        self.by_path.contains_key(path)
    }

    /// Index of the first entry still at `Found`
    pub fn first_unresolved(&self) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.status == EntryStatus::Found)
    }

    /// Store `hash` on entry `index`.
    ///
    /// Returns the index of another entry that already carries the same
    /// hash and still stands for that content (any status but `Duplicate`).
    /// A match means `index` is a duplicate.
    pub fn record_hash(&mut self, index: usize, hash: String) -> Option<usize> {
        let status = self.entries.get(index)?.status;
        if self.takes_over(&hash, status) {
            self.by_hash.insert(hash.clone(), index);
        }
        if let Some(entry) = self.entries.get_mut(index) {
            entry.hash = Some(hash);
        }
        self.duplicate_of(index)
    }

    /// Another entry holding the same hash as the (already hashed) entry `index`
    pub fn duplicate_of(&self, index: usize) -> Option<usize> {
        let hash = self.entries.get(index)?.hash.as_ref()?;
        self.by_hash
            .get(hash)
            .copied()
            .filter(|&holder| holder != index)
    }

    pub fn set_status(&mut self, index: usize, status: EntryStatus) {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.status = status;
        }
    }

    pub fn summary(&self) -> CatalogSummary {
        let mut summary = CatalogSummary::default();
        for entry in &self.entries {
            summary.count(entry.status);
        }
        summary
    }

    /// Read a catalog document
    pub fn load(path: &Path) -> Result<Self, crate::error::CatalogError> {
        let entries: Vec<PictureEntry> = read_json(path)?;
        let catalog = Self::from_entries(entries);
        info!(path = %path.display(), entries = catalog.len(), "loaded catalog");
        Ok(catalog)
    }

    /// Write the catalog document
    pub fn save(&self, path: &Path) -> Result<(), crate::error::CatalogError> {
        write_json(path, &self.entries)
    }
}

impl Settings {
    /// Read a settings document
    pub fn load(path: &Path) -> Result<Self, crate::error::CatalogError> {
        read_json(path)
    }

    /// Write the settings document
    pub fn save(&self, path: &Path) -> Result<(), crate::error::CatalogError> {
        write_json(path, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scanner::{ScanConfig, WalkDirScanner};
    use crate::events::null_sender;
    use tempfile::TempDir;

    fn entry(path: &str, status: EntryStatus, hash: Option<&str>) -> PictureEntry {
        PictureEntry {
            path: PathBuf::from(path),
            status,
            hash: hash.map(str::to_string),
        }
    }

    #[test]
    fn repeated_paths_are_dropped() {
        let catalog = Catalog::from_entries(vec![
            PictureEntry::found("/p/a.jpg"),
            PictureEntry::found("/p/b.jpg"),
            entry("/p/a.jpg", EntryStatus::Kept, None),
        ]);

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(0).unwrap().status, EntryStatus::Found);
    }

    #[test]
    fn record_hash_detects_match_against_decided_entries() {
        let mut catalog = Catalog::from_entries(vec![
            entry("/p/a.jpg", EntryStatus::Archived, Some("aa")),
            PictureEntry::found("/p/b.jpg"),
            PictureEntry::found("/p/c.jpg"),
        ]);

        assert_eq!(catalog.record_hash(1, "aa".to_string()), Some(0));
        assert_eq!(catalog.record_hash(2, "cc".to_string()), None);
        assert_eq!(catalog.get(1).unwrap().hash.as_deref(), Some("aa"));
    }

    #[test]
    fn first_holder_of_a_hash_is_not_its_own_duplicate() {
        let mut catalog = Catalog::from_entries(vec![
            entry("/p/a.jpg", EntryStatus::Found, Some("aa")),
            entry("/p/b.jpg", EntryStatus::Duplicate, Some("aa")),
        ]);

        assert_eq!(catalog.duplicate_of(0), None);
        assert_eq!(catalog.duplicate_of(1), Some(0));
        // Re-recording the same hash on the holder is not a match either
        assert_eq!(catalog.record_hash(0, "aa".to_string()), None);
    }

    #[test]
    fn duplicate_listed_first_never_holds_the_hash() {
        let mut catalog = Catalog::from_entries(vec![
            entry("/p/a.jpg", EntryStatus::Duplicate, Some("aa")),
            entry("/p/b.jpg", EntryStatus::Found, Some("aa")),
            PictureEntry::found("/p/c.jpg"),
        ]);

        assert_eq!(catalog.duplicate_of(1), None);
        assert_eq!(catalog.duplicate_of(0), Some(1));
        assert_eq!(catalog.record_hash(2, "aa".to_string()), Some(1));
    }

    #[test]
    fn content_held_only_by_duplicates_is_eligible_again() {
        let mut catalog = Catalog::from_entries(vec![
            entry("/p/a.jpg", EntryStatus::Duplicate, Some("aa")),
            PictureEntry::found("/p/b.jpg"),
        ]);

        assert_eq!(catalog.record_hash(1, "aa".to_string()), None);
        assert_eq!(catalog.duplicate_of(0), Some(1));
    }

    #[test]
    fn merge_appends_only_new_paths() {
        let mut catalog = Catalog::from_entries(vec![entry("/p/a.jpg", EntryStatus::Kept, None)]);

        let added = catalog.merge(vec![PathBuf::from("/p/a.jpg"), PathBuf::from("/p/z.jpg")]);

        assert_eq!(added, 1);
        assert_eq!(catalog.get(0).unwrap().status, EntryStatus::Kept);
        assert_eq!(catalog.get(1).unwrap().path, PathBuf::from("/p/z.jpg"));
    }

    #[test]
    fn summary_counts_each_status() {
        let catalog = Catalog::from_entries(vec![
            entry("/p/a.jpg", EntryStatus::Kept, None),
            entry("/p/b.jpg", EntryStatus::Duplicate, None),
            entry("/p/c.jpg", EntryStatus::Found, None),
            entry("/p/d.jpg", EntryStatus::Found, None),
        ]);

        let summary = catalog.summary();
        assert_eq!(summary.total, 4);
        assert_eq!(summary.found, 2);
        assert_eq!(summary.kept, 1);
        assert_eq!(summary.duplicate, 1);
        assert_eq!(summary.resolved(), 2);
        assert_eq!(catalog.first_unresolved(), Some(2));
    }

    #[test]
    fn scan_builds_found_entries_with_unique_paths() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("a.jpg"), b"a").unwrap();
        std::fs::write(temp.path().join("b.png"), b"b").unwrap();
        std::fs::write(temp.path().join("notes.txt"), b"n").unwrap();

        let scanner = WalkDirScanner::new(ScanConfig::default());
        let catalog = Catalog::scan(&scanner, temp.path(), &null_sender()).unwrap();

        assert_eq!(catalog.len(), 2);
        assert!(catalog
            .entries()
            .iter()
            .all(|e| e.status == EntryStatus::Found && e.hash.is_none()));
        assert!(catalog.contains_path(&temp.path().join("a.jpg")));
    }
}
