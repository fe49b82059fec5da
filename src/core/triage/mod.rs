//! # Triage Module
//!
//! The state machine that walks the catalog one picture at a time.
//!
//! ## Entry Lifecycle
//! ```text
//! Found ──unique hash──► Found (shown)
//! Found ──hash seen before──► Duplicate   (moved to the duplicates folder)
//! Found ──keep──► Kept                    (moved to the keep folder)
//! Found ──archive──► Archived             (moved to the archive folder)
//! Found ──skip──► Skipped                 (left in place)
//! ```
//! Every status other than `Found` is final.
//!
//! ## Resuming
//! A loaded catalog starts just before its first `Found` entry, so pictures
//! passed over in an earlier session (unreadable, or shown but never
//! decided) are offered again.

mod cursor;
mod engine;

pub use cursor::Cursor;
pub use engine::{Decision, TriageEngine, TriageEngineBuilder};
