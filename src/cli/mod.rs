//! # CLI Module
//!
//! Terminal front end for the picture triage tool.
//!
//! ## Usage
//! ```bash
//! # Triage pictures, opening each one in a viewer
//! picture-triage triage --search ~/Pictures --viewer xdg-open
//!
//! # How far along is the triage?
//! picture-triage status
//!
//! # Pick up pictures added since the first scan
//! picture-triage rescan
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use console::{style, Key, Term};
use indicatif::{ProgressBar, ProgressStyle};
use picture_triage::core::{CatalogSummary, Decision, EntryStatus, TriageEngine};
use picture_triage::error::Result;
use picture_triage::events::{Event, EventChannel, EventReceiver, ScanEvent, TriageEvent};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

/// Picture Triage - keep, archive or skip, one picture at a time
#[derive(Parser, Debug)]
#[command(name = "picture-triage")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
struct Folders {
    /// Working folder for settings, catalog and destination folders
    #[arg(short, long)]
    work: Option<PathBuf>,

    /// Folder to search for pictures (first run and rescan)
    #[arg(short, long)]
    search: Option<PathBuf>,

    /// Skip hidden files and folders while scanning
    #[arg(long)]
    skip_hidden: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decide on pictures one at a time
    Triage {
        #[command(flatten)]
        folders: Folders,

        /// Command used to open each picture (called as `<viewer> <path>`)
        #[arg(long)]
        viewer: Option<String>,

        /// Only save when the session ends
        #[arg(long)]
        no_autosave: bool,
    },
    /// Show how many pictures are in each state
    Status {
        #[command(flatten)]
        folders: Folders,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,
    },
    /// Add pictures that appeared in the search folder since the first scan
    Rescan {
        #[command(flatten)]
        folders: Folders,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Triage {
            folders,
            viewer,
            no_autosave,
        } => run_triage(&folders, viewer.as_deref(), !no_autosave),
        Commands::Status { folders, output } => run_status(&folders, output),
        Commands::Rescan { folders } => run_rescan(&folders),
    }
}

fn default_working_folder() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("picture-triage")
}

fn default_search_folder() -> PathBuf {
    dirs::picture_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Initialize the engine behind a spinner (a first run scans the tree)
fn open_engine(folders: &Folders, autosave: bool) -> Result<(TriageEngine, EventReceiver)> {
    let directive = if folders.verbose {
        "picture_triage=debug"
    } else {
        "picture_triage=warn"
    };
    picture_triage::init_tracing(directive);

    let (sender, receiver) = EventChannel::new();

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Loading catalog...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let engine = TriageEngine::builder()
        .working_folder(folders.work.clone().unwrap_or_else(default_working_folder))
        .search_folder(folders.search.clone().unwrap_or_else(default_search_folder))
        .skip_hidden(folders.skip_hidden)
        .autosave(autosave)
        .events(sender)
        .initialize();

    spinner.finish_and_clear();
    Ok((engine?, receiver))
}

fn run_triage(folders: &Folders, viewer: Option<&str>, autosave: bool) -> Result<()> {
    let (mut engine, events) = open_engine(folders, autosave)?;
    let term = Term::stdout();

    term.write_line(&format!(
        "{} {}",
        style("Picture Triage").bold().cyan(),
        style(format!("v{}", env!("CARGO_PKG_VERSION"))).dim()
    ))
    .ok();
    report_events(&term, &events);
    print_summary(&term, &engine.summary());
    term.write_line("").ok();

    loop {
        let next = engine.next_picture();
        report_events(&term, &events);

        let Some(path) = next else {
            let done = format!("{} Done.", style("✓").green().bold());
            term.write_line(&done).ok();
            break;
        };

        let shown = format!("{} {}", style("▶").cyan(), path.display());
        term.write_line(&shown).ok();
        if let Some(viewer) = viewer {
            open_in_viewer(viewer, &path);
        }

        match prompt_decision(&term) {
            Some(decision) => {
                if let Err(e) = engine.decide(decision) {
                    let failure = format!("  {} {}", style("✗").red().bold(), e);
                    term.write_line(&failure).ok();
                }
                report_events(&term, &events);
            }
            None => break,
        }
    }

    engine.save()?;
    report_events(&term, &events);
    term.write_line("").ok();
    print_summary(&term, &engine.summary());
    Ok(())
}

/// Read keys until a decision or quit (`None`)
fn prompt_decision(term: &Term) -> Option<Decision> {
    term.write_line(&format!(
        "  {} keep  {} archive  {} skip  {} quit",
        style("[k]").bold(),
        style("[a]").bold(),
        style("[s]").bold(),
        style("[q]").bold()
    ))
    .ok();

    loop {
        let key = match term.read_key() {
            Ok(key) => key,
            Err(_) => return None,
        };
        match key {
            Key::Char('k') | Key::Char('K') => return Some(Decision::Keep),
            Key::Char('a') | Key::Char('A') => return Some(Decision::Archive),
            Key::Char('s') | Key::Char('S') => return Some(Decision::Skip),
            Key::Char('q') | Key::Char('Q') | Key::Escape => return None,
            _ => continue,
        }
    }
}

fn open_in_viewer(viewer: &str, path: &Path) {
    if let Err(e) = Command::new(viewer).arg(path).spawn() {
        tracing::warn!(viewer, error = %e, "could not start viewer");
    }
}

/// Print events the engine queued since the last call
fn report_events(term: &Term, events: &EventReceiver) {
    for event in events.drain() {
        let line = match event {
            Event::Scan(ScanEvent::Completed { total_pictures }) => format!(
                "  {} pictures found",
                style(total_pictures).cyan()
            ),
            Event::Scan(ScanEvent::Error { path, message }) => format!(
                "  {} {}: {}",
                style("!").yellow().bold(),
                path.display(),
                message
            ),
            Event::Triage(TriageEvent::DuplicateDetected {
                path, original, ..
            }) => format!(
                "  {} {} duplicates {}",
                style("=").dim(),
                path.display(),
                original.display()
            ),
            Event::Triage(TriageEvent::EntryFailed { path, message }) => format!(
                "  {} Unable to load {} ({}), skipped",
                style("!").yellow().bold(),
                path.display(),
                message
            ),
            Event::Triage(TriageEvent::Decided {
                status, moved_to, ..
            }) => match moved_to {
                Some(target) => format!("  {} → {}", status_label(status), target.display()),
                None => format!("  {}", status_label(status)),
            },
            Event::Triage(TriageEvent::SaveFailed { message }) => format!(
                "  {} autosave failed: {}",
                style("!").red().bold(),
                message
            ),
            _ => continue,
        };
        term.write_line(&line).ok();
    }
}

fn status_label(status: EntryStatus) -> String {
    match status {
        EntryStatus::Kept => style("kept").green().to_string(),
        EntryStatus::Archived => style("archived").blue().to_string(),
        EntryStatus::Skipped => style("skipped").dim().to_string(),
        EntryStatus::Duplicate => style("duplicate").yellow().to_string(),
        EntryStatus::Found => style("found").to_string(),
    }
}

fn print_summary(term: &Term, summary: &CatalogSummary) {
    term.write_line(&format!(
        "  {} pictures, {} left to decide",
        style(summary.total).cyan(),
        style(summary.found).cyan().bold()
    ))
    .ok();
    term.write_line(&format!(
        "  {} kept, {} archived, {} skipped, {} duplicates",
        style(summary.kept).green(),
        style(summary.archived).blue(),
        style(summary.skipped).dim(),
        style(summary.duplicate).yellow()
    ))
    .ok();
}

fn run_status(folders: &Folders, output: OutputFormat) -> Result<()> {
    let (engine, _events) = open_engine(folders, false)?;
    let summary = engine.summary();

    match output {
        OutputFormat::Pretty => {
            let term = Term::stdout();
            term.write_line(&format!(
                "{} {}",
                style("Catalog").bold(),
                style(engine.settings().status_file.display()).dim()
            ))
            .ok();
            print_summary(&term, &summary);
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{}", json);
        }
    }

    // A first run scanned the tree; keep the result
    engine.save()
}

fn run_rescan(folders: &Folders) -> Result<()> {
    let (mut engine, events) = open_engine(folders, false)?;
    let term = Term::stdout();

    let added = engine.rescan()?;
    report_events(&term, &events);
    engine.save()?;

    term.write_line(&format!(
        "{} {} new pictures added",
        style("✓").green().bold(),
        style(added).cyan()
    ))
    .ok();
    print_summary(&term, &engine.summary());
    Ok(())
}
