//! Content-gated atomic file writer.
//!
//! Every local write in the sync passes goes through [`write_if_changed`]:
//!
//! 1. Normalise line endings to LF.
//! 2. Read the current file → skip if the content already matches.
//! 3. Write to `<path>.gadgetry.tmp`.
//! 4. Rename to the final path (atomic on POSIX).
//!
//! Skipping identical content keeps mtimes stable, which keeps the version
//! control status quiet after a no-op pull.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{io_err, SyncError};

/// Outcome of an individual file write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written (content changed or did not previously exist).
    Written { path: PathBuf },
    /// File was left alone — the content on disk already matches.
    Unchanged { path: PathBuf },
}

/// Write `content` to `path` unless the file already holds it.
pub fn write_if_changed(path: &Path, content: &str) -> Result<WriteResult, SyncError> {
    let normalized = content.replace("\r\n", "\n");
    let content = normalized.as_str();

    if let Some(existing) = read_existing(path)? {
        if existing == content {
            tracing::debug!("unchanged: {}", path.display());
            return Ok(WriteResult::Unchanged {
                path: path.to_path_buf(),
            });
        }
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }

    let tmp = PathBuf::from(format!("{}.gadgetry.tmp", path.display()));
    std::fs::write(&tmp, content).map_err(|e| io_err(&tmp, e))?;

    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(io_err(path, e));
    }

    tracing::info!("wrote: {}", path.display());
    Ok(WriteResult::Written {
        path: path.to_path_buf(),
    })
}

fn read_existing(path: &Path) -> Result<Option<String>, SyncError> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(io_err(path, e)),
    }
}
