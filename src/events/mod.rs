//! # Events Module
//!
//! Progress and diagnostic reporting for front ends.
//!
//! ## Design
//! The core library emits events through a channel so a front end can show
//! scan progress, say why a picture was passed over, and note duplicates that
//! were set aside without being shown.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//! let mut engine = TriageEngine::builder().events(sender).initialize()?;
//!
//! while let Some(path) = engine.next_picture() {
//!     for event in receiver.drain() {
//!         // show diagnostics
//!     }
//!     // ...
//! }
//! ```

mod channel;
mod types;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};
pub use types::*;
