//! Triage engine implementation.

use super::cursor::Cursor;
use crate::core::catalog::{
    Catalog, CatalogSummary, EntryStatus, PictureEntry, Settings, SETTINGS_FILE_NAME,
};
use crate::core::hasher::{ContentHasher, Xxh3Hasher};
use crate::core::mover::Mover;
use crate::core::scanner::{PictureScanner, ScanConfig, WalkDirScanner};
use crate::error::{CatalogError, Result, TriageError};
use crate::events::{null_sender, Event, EventSender, TriageEvent};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A decision the user can make about the presented picture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Keep,
    Archive,
    Skip,
}

impl Decision {
    fn status(self) -> EntryStatus {
        match self {
            Decision::Keep => EntryStatus::Kept,
            Decision::Archive => EntryStatus::Archived,
            Decision::Skip => EntryStatus::Skipped,
        }
    }

    fn destination(self, settings: &Settings) -> Option<&Path> {
        match self {
            Decision::Keep => Some(settings.keep_path.as_path()),
            Decision::Archive => Some(settings.archive_path.as_path()),
            Decision::Skip => None,
        }
    }
}

/// Outcome of examining one `Found` entry during a forward scan
enum Screening {
    /// Unique content, show it
    Show,
    /// Set aside as a duplicate
    Duplicate,
    /// Could not be hashed or moved; passed over for this session
    Broken,
}

/// Builder for a triage session
pub struct TriageEngineBuilder {
    working_folder: Option<PathBuf>,
    search_folder: Option<PathBuf>,
    hasher: Option<Box<dyn ContentHasher>>,
    events: Option<EventSender>,
    autosave: bool,
    scan_config: ScanConfig,
}

impl TriageEngineBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            working_folder: None,
            search_folder: None,
            hasher: None,
            events: None,
            autosave: false,
            scan_config: ScanConfig::default(),
        }
    }

    /// Folder holding the settings document (and, by default, the catalog
    /// and destination folders)
    pub fn working_folder(mut self, path: impl Into<PathBuf>) -> Self {
        self.working_folder = Some(path.into());
        self
    }

    /// Folder scanned for pictures
    pub fn search_folder(mut self, path: impl Into<PathBuf>) -> Self {
        self.search_folder = Some(path.into());
        self
    }

    /// Use a custom content hasher
    pub fn hasher(mut self, hasher: Box<dyn ContentHasher>) -> Self {
        self.hasher = Some(hasher);
        self
    }

    /// Report progress and diagnostics on this channel
    pub fn events(mut self, events: EventSender) -> Self {
        self.events = Some(events);
        self
    }

    /// Save both documents after every change
    pub fn autosave(mut self, enabled: bool) -> Self {
        self.autosave = enabled;
        self
    }

    /// Skip hidden files and folders when scanning
    pub fn skip_hidden(mut self, skip: bool) -> Self {
        self.scan_config.skip_hidden = skip;
        self
    }

    /// Follow symbolic links when scanning
    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.scan_config.follow_symlinks = follow;
        self
    }

    /// Load or create settings and catalog.
    ///
    /// An existing catalog document is loaded; a missing or empty one is
    /// replaced by a full scan of the search folder. A document that cannot
    /// be parsed stops initialization.
    pub fn initialize(self) -> Result<TriageEngine> {
        let working_folder = absolute(
            self.working_folder
                .ok_or_else(|| TriageError::Config("working folder is not set".to_string()))?,
        )?;
        let search_folder = absolute(
            self.search_folder
                .ok_or_else(|| TriageError::Config("search folder is not set".to_string()))?,
        )?;
        let events = self.events.unwrap_or_else(null_sender);

        std::fs::create_dir_all(&working_folder).map_err(|e| CatalogError::Write {
            path: working_folder.clone(),
            source: e,
        })?;

        let settings_path = working_folder.join(SETTINGS_FILE_NAME);
        let settings = if settings_path.exists() {
            Settings::load(&settings_path)?
        } else {
            info!(working_folder = %working_folder.display(), "first run, using default settings");
            Settings::defaults_for(&working_folder)
        };

        let mut scan_config = self.scan_config;
        scan_config.exclude = settings.destination_folders();

        let loaded = if settings.status_file.exists() {
            Some(Catalog::load(&settings.status_file)?).filter(|c| !c.is_empty())
        } else {
            None
        };
        let catalog = match loaded {
            Some(catalog) => catalog,
            None => {
                let scanner = WalkDirScanner::new(scan_config.clone());
                Catalog::scan(&scanner, &search_folder, &events)?
            }
        };

        let cursor = Cursor::rewound(catalog.first_unresolved(), catalog.len());
        let summary = catalog.summary();
        events.send(Event::Triage(TriageEvent::CatalogLoaded {
            entries: summary.total,
            unresolved: summary.found,
        }));

        Ok(TriageEngine {
            working_folder,
            search_folder,
            settings,
            catalog,
            cursor,
            hasher: self.hasher.unwrap_or_else(|| Box::new(Xxh3Hasher)),
            mover: Mover,
            events,
            autosave: self.autosave,
            scan_config,
        })
    }
}

impl Default for TriageEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn absolute(path: PathBuf) -> Result<PathBuf> {
    std::path::absolute(&path)
        .map_err(|e| TriageError::Config(format!("cannot resolve {}: {}", path.display(), e)))
}

/// One triage session over a catalog.
///
/// Owns the catalog and settings for its lifetime; the front end drives it
/// with [`next_picture`](Self::next_picture) and one decision per picture.
pub struct TriageEngine {
    working_folder: PathBuf,
    search_folder: PathBuf,
    settings: Settings,
    catalog: Catalog,
    cursor: Cursor,
    hasher: Box<dyn ContentHasher>,
    mover: Mover,
    events: EventSender,
    autosave: bool,
    scan_config: ScanConfig,
}

impl TriageEngine {
    /// Create a new engine builder
    pub fn builder() -> TriageEngineBuilder {
        TriageEngineBuilder::new()
    }

    /// Initialize with default options
    pub fn initialize(
        working_folder: impl Into<PathBuf>,
        search_folder: impl Into<PathBuf>,
    ) -> Result<Self> {
        Self::builder()
            .working_folder(working_folder)
            .search_folder(search_folder)
            .initialize()
    }

    /// The picture to show next, or `None` when every picture is resolved.
    ///
    /// Calling this again before a decision returns the same picture.
    /// Duplicates met on the way are moved aside and never returned;
    /// pictures that cannot be read are reported and passed over.
    pub fn next_picture(&mut self) -> Option<PathBuf> {
        if let Some(index) = self.cursor.presented() {
            return self.catalog.get(index).map(|e| e.path.clone());
        }

        while let Some(index) = self.cursor.advance(self.catalog.len()) {
            let status = match self.catalog.get(index) {
                Some(entry) => entry.status,
                None => break,
            };
            if status.is_terminal() {
                continue;
            }

            match self.screen(index) {
                Screening::Show => {
                    self.cursor.present(index);
                    let path = self.catalog.get(index).map(|e| e.path.clone())?;
                    debug!(index, path = %path.display(), "presenting");
                    self.events.send(Event::Triage(TriageEvent::Presented {
                        path: path.clone(),
                        index,
                    }));
                    return Some(path);
                }
                Screening::Duplicate | Screening::Broken => continue,
            }
        }

        self.events.send(Event::Triage(TriageEvent::Exhausted));
        None
    }

    /// Hash the entry if needed and set it aside when it is a duplicate
    fn screen(&mut self, index: usize) -> Screening {
        let Some(entry) = self.catalog.get(index) else {
            return Screening::Broken;
        };
        let path = entry.path.clone();
        let already_hashed = entry.hash.is_some();

        let duplicate_of = if already_hashed {
            if !path.is_file() {
                self.pass_over(&path, "file no longer exists".to_string());
                return Screening::Broken;
            }
            self.catalog.duplicate_of(index)
        } else {
            match self.hasher.fingerprint(&path) {
                Ok(hash) => self.catalog.record_hash(index, hash),
                Err(e) => {
                    self.pass_over(&path, e.to_string());
                    return Screening::Broken;
                }
            }
        };

        let Some(original) = duplicate_of else {
            return Screening::Show;
        };

        match self.mover.move_into(&path, &self.settings.duplicate_path) {
            Ok(moved_to) => {
                self.catalog.set_status(index, EntryStatus::Duplicate);
                let original = self
                    .catalog
                    .get(original)
                    .map(|e| e.path.clone())
                    .unwrap_or_default();
                info!(
                    path = %path.display(),
                    original = %original.display(),
                    "duplicate set aside"
                );
                self.events.send(Event::Triage(TriageEvent::DuplicateDetected {
                    path,
                    original,
                    moved_to,
                }));
                self.autosave();
                Screening::Duplicate
            }
            Err(e) => {
                self.pass_over(&path, e.to_string());
                Screening::Broken
            }
        }
    }

    fn pass_over(&self, path: &Path, message: String) {
        warn!(path = %path.display(), "{}; skipping", message);
        self.events.send(Event::Triage(TriageEvent::EntryFailed {
            path: path.to_path_buf(),
            message,
        }));
    }

    /// Move the presented picture to the keep folder and mark it kept
    pub fn keep(&mut self) -> Result<Option<EntryStatus>> {
        self.decide(Decision::Keep)
    }

    /// Move the presented picture to the archive folder and mark it archived
    pub fn archive(&mut self) -> Result<Option<EntryStatus>> {
        self.decide(Decision::Archive)
    }

    /// Mark the presented picture skipped; the file stays where it is
    pub fn skip(&mut self) -> Result<Option<EntryStatus>> {
        self.decide(Decision::Skip)
    }

    /// Apply `decision` to the presented picture.
    ///
    /// Returns `Ok(None)` when no picture is presented. When the move fails
    /// the entry keeps its status, stays presented, and the error is returned.
    pub fn decide(&mut self, decision: Decision) -> Result<Option<EntryStatus>> {
        let Some(index) = self.cursor.presented() else {
            return Ok(None);
        };
        let Some(path) = self.catalog.get(index).map(|e| e.path.clone()) else {
            return Ok(None);
        };

        let moved_to = match decision.destination(&self.settings) {
            Some(folder) => Some(self.mover.move_into(&path, folder)?),
            None => None,
        };

        let status = decision.status();
        self.catalog.set_status(index, status);
        self.cursor.release();

        debug!(index, path = %path.display(), %status, "decided");
        self.events.send(Event::Triage(TriageEvent::Decided {
            path,
            status,
            moved_to,
        }));
        self.autosave();
        Ok(Some(status))
    }

    fn autosave(&self) {
        if !self.autosave {
            return;
        }
        if let Err(e) = self.save() {
            warn!(error = %e, "autosave failed");
            self.events.send(Event::Triage(TriageEvent::SaveFailed {
                message: e.to_string(),
            }));
        }
    }

    /// Write the settings and catalog documents
    pub fn save(&self) -> Result<()> {
        let settings_path = self.working_folder.join(SETTINGS_FILE_NAME);
        self.settings.save(&settings_path)?;
        self.catalog.save(&self.settings.status_file)?;

        debug!(catalog = %self.settings.status_file.display(), "saved");
        self.events.send(Event::Triage(TriageEvent::Saved {
            catalog: self.settings.status_file.clone(),
        }));
        Ok(())
    }

    /// Add pictures that appeared in the search folder since the catalog was
    /// built. Existing entries are untouched. Returns how many were added.
    pub fn rescan(&mut self) -> Result<usize> {
        let scanner = WalkDirScanner::new(self.scan_config.clone());
        let result = scanner.scan_with_events(&self.search_folder, &self.events)?;
        let added = self.catalog.merge(result.pictures);

        if added > 0 && self.cursor.presented().is_none() {
            self.cursor = Cursor::rewound(self.catalog.first_unresolved(), self.catalog.len());
        }

        info!(
            search_folder = %self.search_folder.display(),
            added,
            total = self.catalog.len(),
            "rescanned"
        );
        if added > 0 {
            self.autosave();
        }
        Ok(added)
    }

    /// The picture waiting for a decision
    pub fn current(&self) -> Option<&PictureEntry> {
        self.cursor
            .presented()
            .and_then(|index| self.catalog.get(index))
    }

    /// True when no presented picture and nothing left ahead of the cursor
    pub fn is_exhausted(&self) -> bool {
        self.cursor.is_exhausted(self.catalog.len())
    }

    pub fn summary(&self) -> CatalogSummary {
        self.catalog.summary()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn working_folder(&self) -> &Path {
        &self.working_folder
    }

    pub fn search_folder(&self) -> &Path {
        &self.search_folder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HashError;
    use std::cell::Cell;
    use std::fs;
    use std::rc::Rc;
    use tempfile::TempDir;

    struct Fixture {
        _temp: TempDir,
        work: PathBuf,
        search: PathBuf,
    }

    impl Fixture {
        fn new(files: &[(&str, &[u8])]) -> Self {
            let temp = TempDir::new().unwrap();
            let work = temp.path().join("work");
            let search = temp.path().join("pictures");
            fs::create_dir_all(&search).unwrap();
            for (name, content) in files {
                let path = search.join(name);
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent).unwrap();
                }
                fs::write(path, content).unwrap();
            }
            Self {
                _temp: temp,
                work,
                search,
            }
        }

        fn engine(&self) -> TriageEngine {
            TriageEngine::initialize(&self.work, &self.search).unwrap()
        }
    }

    /// Counts fingerprint calls, delegating to the real hasher
    struct CountingHasher(Rc<Cell<usize>>);

    impl ContentHasher for CountingHasher {
        fn fingerprint(&self, path: &Path) -> std::result::Result<String, HashError> {
            self.0.set(self.0.get() + 1);
            Xxh3Hasher.fingerprint(path)
        }
    }

    #[test]
    fn first_run_uses_defaults_inside_working_folder() {
        let fixture = Fixture::new(&[("a.jpg", b"a")]);
        let engine = fixture.engine();

        assert_eq!(engine.settings(), &Settings::defaults_for(&fixture.work));
        assert!(fixture.work.is_dir());
        assert_eq!(engine.catalog().len(), 1);
    }

    #[test]
    fn next_picture_is_idempotent_and_hashes_once() {
        let fixture = Fixture::new(&[("a.jpg", b"a"), ("b.jpg", b"b")]);
        let calls = Rc::new(Cell::new(0));
        let mut engine = TriageEngine::builder()
            .working_folder(&fixture.work)
            .search_folder(&fixture.search)
            .hasher(Box::new(CountingHasher(calls.clone())))
            .initialize()
            .unwrap();

        let first = engine.next_picture();
        let again = engine.next_picture();

        assert_eq!(first, Some(fixture.search.join("a.jpg")));
        assert_eq!(first, again);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn decisions_without_presented_picture_are_noops() {
        let fixture = Fixture::new(&[("a.jpg", b"a")]);
        let mut engine = fixture.engine();

        assert_eq!(engine.keep().unwrap(), None);
        assert_eq!(engine.skip().unwrap(), None);
        assert!(fixture.search.join("a.jpg").exists());
        assert_eq!(engine.summary().found, 1);
    }

    #[test]
    fn second_decision_on_same_picture_is_a_noop() {
        let fixture = Fixture::new(&[("a.jpg", b"a")]);
        let mut engine = fixture.engine();

        engine.next_picture();
        assert_eq!(engine.archive().unwrap(), Some(EntryStatus::Archived));
        assert_eq!(engine.keep().unwrap(), None);

        let summary = engine.summary();
        assert_eq!(summary.archived, 1);
        assert_eq!(summary.kept, 0);
        assert!(fixture.work.join("archive").join("a.jpg").exists());
    }

    #[test]
    fn unreadable_picture_is_passed_over() {
        let fixture = Fixture::new(&[("a.jpg", b"a"), ("b.jpg", b"b")]);
        let mut engine = fixture.engine();
        fs::remove_file(fixture.search.join("a.jpg")).unwrap();

        assert_eq!(engine.next_picture(), Some(fixture.search.join("b.jpg")));
        // Still unresolved, offered again next session
        assert_eq!(engine.catalog().get(0).unwrap().status, EntryStatus::Found);
    }

    #[test]
    fn failed_keep_leaves_entry_presented_and_found() {
        let fixture = Fixture::new(&[("a.jpg", b"a")]);
        let mut engine = fixture.engine();
        // Block the keep folder with a regular file
        fs::write(fixture.work.join("keep"), b"blocker").unwrap();

        let shown = engine.next_picture().unwrap();
        let result = engine.keep();

        assert!(matches!(result, Err(TriageError::Move(_))));
        assert!(shown.exists());
        assert_eq!(engine.current().unwrap().status, EntryStatus::Found);
        assert_eq!(engine.next_picture(), Some(shown));
    }

    #[test]
    fn autosave_writes_after_each_decision() {
        let fixture = Fixture::new(&[("a.jpg", b"a"), ("b.jpg", b"b")]);
        let mut engine = TriageEngine::builder()
            .working_folder(&fixture.work)
            .search_folder(&fixture.search)
            .autosave(true)
            .initialize()
            .unwrap();

        engine.next_picture();
        engine.skip().unwrap();

        let saved = Catalog::load(&fixture.work.join("files.json")).unwrap();
        assert_eq!(saved.get(0).unwrap().status, EntryStatus::Skipped);
        assert!(fixture.work.join(SETTINGS_FILE_NAME).exists());
    }

    #[test]
    fn missing_search_folder_fails_first_run() {
        let temp = TempDir::new().unwrap();
        let result =
            TriageEngine::initialize(temp.path().join("work"), temp.path().join("nowhere"));

        assert!(matches!(result, Err(TriageError::Scan(_))));
    }

    #[test]
    fn builder_requires_folders() {
        let result = TriageEngine::builder().initialize();
        assert!(matches!(result, Err(TriageError::Config(_))));
    }
}
