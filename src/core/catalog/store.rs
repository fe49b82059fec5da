//! JSON persistence for the catalog and settings documents.
//!
//! Writes go to a temp file next to the target which is then renamed over
//! it, so an interrupted save leaves the previous document intact.

use crate::error::CatalogError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Parse the JSON document at `path`
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CatalogError> {
    let file = File::open(path).map_err(|e| CatalogError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        if e.is_io() {
            CatalogError::Read {
                path: path.to_path_buf(),
                source: e.into(),
            }
        } else {
            CatalogError::Corrupt {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

/// Pretty-print `value` to `path`, replacing any previous document
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), CatalogError> {
    let write_error = |e| CatalogError::Write {
        path: path.to_path_buf(),
        source: e,
    };

    let folder = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(folder).map_err(write_error)?;

    let mut staged = NamedTempFile::new_in(folder).map_err(write_error)?;
    {
        let mut writer = BufWriter::new(staged.as_file_mut());
        serde_json::to_writer_pretty(&mut writer, value).map_err(|e| {
            CatalogError::Serialize {
                path: path.to_path_buf(),
                source: e,
            }
        })?;
        writer.flush().map_err(write_error)?;
    }
    staged.as_file().sync_all().map_err(write_error)?;
    staged.persist(path).map_err(|e| write_error(e.error))?;
    Ok(())
}
