//! # Core Module
//!
//! The front-end-agnostic triage engine.
//!
//! ## Modules
//! - `scanner` - Discovers pictures and classifies files by extension
//! - `hasher` - Computes content fingerprints
//! - `mover` - Moves pictures into category folders without overwriting
//! - `catalog` - Picture entries, settings and their JSON documents
//! - `triage` - The cursor and decision state machine

pub mod catalog;
pub mod hasher;
pub mod mover;
pub mod scanner;
pub mod triage;

// Re-export commonly used types
pub use catalog::{Catalog, CatalogSummary, EntryStatus, PictureEntry, Settings};
pub use triage::{Decision, TriageEngine};
