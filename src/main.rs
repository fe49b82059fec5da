//! # picture-triage CLI
//!
//! Command-line interface for the picture triage tool.
//!
//! ## Usage
//! ```bash
//! picture-triage triage --search ~/Pictures
//! picture-triage status --output json
//! ```

mod cli;

use picture_triage::Result;

fn main() -> Result<()> {
    cli::run()
}
