//! # Picture Triage
//!
//! Walk a picture folder one photo at a time and decide what to do with it.
//!
//! ## How It Works
//! - **Scan once** - every image under the search folder becomes a catalog entry
//! - **Decide** - keep, archive or skip the picture on screen
//! - **Duplicates step aside** - byte-identical copies are moved to a
//!   duplicates folder without being shown
//! - **Resume** - progress is saved to JSON and picked up next session
//!
//! ## Architecture
//! - `core` - Scanner, hasher, mover, catalog store and the triage engine
//! - `events` - Progress and diagnostic events for any front end
//! - `error` - Error types
//! - `cli` - Terminal front end (binary only)

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use crate::core::triage::TriageEngine;
pub use error::{Result, TriageError};

/// Initialize tracing for the library
///
/// This should be called by the application entry point. `default_directive`
/// applies when `RUST_LOG` is not set.
pub fn init_tracing(default_directive: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    // A subscriber may already be installed (tests, embedding apps)
    let _ = tracing::subscriber::set_global_default(subscriber);
}
