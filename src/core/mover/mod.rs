//! # Mover Module
//!
//! Moves a picture into a destination folder without ever overwriting a
//! file that is already there.
//!
//! A name that is taken gets a ` (N)` suffix after the full file name
//! (`photo.jpg`, `photo.jpg (1)`, `photo.jpg (2)`, ...). A plain rename is
//! tried first. When that fails (typically across filesystems) the content is
//! copied into a temp file inside the destination folder and then atomically
//! renamed into place. The source is removed only after that. Either the move
//! happened or the original is still where it was.

use crate::error::MoveError;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Give up looking for a free name after this many suffixes
pub const MAX_COLLISION_SUFFIX: u32 = 10_000;

/// Relocates pictures into category folders
#[derive(Debug, Clone, Copy, Default)]
pub struct Mover;

impl Mover {
    /// Move `source` into `destination_folder`, returning the final path.
    pub fn move_into(
        &self,
        source: &Path,
        destination_folder: &Path,
    ) -> Result<PathBuf, MoveError> {
        if !source.is_file() {
            return Err(MoveError::SourceMissing {
                path: source.to_path_buf(),
            });
        }

        fs::create_dir_all(destination_folder).map_err(|e| MoveError::DestinationNotWritable {
            path: destination_folder.to_path_buf(),
            source: e,
        })?;

        let target = free_target_name(source, destination_folder)?;

        match fs::rename(source, &target) {
            Ok(()) => {
                debug!(from = %source.display(), to = %target.display(), "renamed");
                Ok(target)
            }
            Err(rename_error) => {
                debug!(
                    from = %source.display(),
                    error = %rename_error,
                    "rename failed, falling back to copy"
                );
                copy_then_remove(source, destination_folder, &target)?;
                Ok(target)
            }
        }
    }
}

/// First name under `folder` that does not exist yet.
fn free_target_name(source: &Path, folder: &Path) -> Result<PathBuf, MoveError> {
    let base: OsString = source
        .file_name()
        .map(|n| n.to_os_string())
        .ok_or_else(|| MoveError::SourceMissing {
            path: source.to_path_buf(),
        })?;

    let candidate = folder.join(&base);
    if !candidate.exists() {
        return Ok(candidate);
    }

    for n in 1..=MAX_COLLISION_SUFFIX {
        let mut name = base.clone();
        name.push(format!(" ({})", n));
        let candidate = folder.join(name);
        if !candidate.exists() {
            return Ok(candidate);
        }
    }

    Err(MoveError::NamesExhausted {
        name: base.to_string_lossy().into_owned(),
        folder: folder.to_path_buf(),
        attempts: MAX_COLLISION_SUFFIX,
    })
}

/// Cross-device fallback. The temp file is removed on drop when anything
/// before `persist_noclobber` fails, so no partial file is left behind.
fn copy_then_remove(source: &Path, folder: &Path, target: &Path) -> Result<(), MoveError> {
    let cross_device = |e: io::Error| MoveError::CrossDevice {
        from: source.to_path_buf(),
        to: target.to_path_buf(),
        source: e,
    };

    let mut staged = NamedTempFile::new_in(folder).map_err(|e| MoveError::DestinationNotWritable {
        path: folder.to_path_buf(),
        source: e,
    })?;

    let source_size = {
        let mut input = File::open(source).map_err(cross_device)?;
        let copied = io::copy(&mut input, staged.as_file_mut()).map_err(cross_device)?;
        staged.as_file().sync_all().map_err(cross_device)?;
        let expected = input.metadata().map_err(cross_device)?.len();
        if copied != expected {
            return Err(cross_device(io::Error::other(format!(
                "copy verification failed: source {} bytes, copied {} bytes",
                expected, copied
            ))));
        }
        expected
    };

    staged
        .persist_noclobber(target)
        .map_err(|e| cross_device(e.error))?;

    if let Err(e) = fs::remove_file(source) {
        // Keep the invariant: exactly one copy, at the original location
        warn!(
            source = %source.display(),
            error = %e,
            "could not remove source after copy, rolling back"
        );
        let _ = fs::remove_file(target);
        return Err(cross_device(e));
    }

    debug!(
        from = %source.display(),
        to = %target.display(),
        bytes = source_size,
        "copied across devices"
    );
    Ok(())
}
