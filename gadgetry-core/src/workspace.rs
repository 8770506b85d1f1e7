//! Source-tree inventory.
//!
//! A scan walks `<root>/src` and produces one [`FileRecord`] per eligible
//! file. Records are rebuilt fresh at the start of every pass — never cached
//! across invocations, never mutated after construction.

use std::path::{Path, PathBuf};

use crate::config::{Config, SHARED_DEPS_DIR, SOURCE_EXTENSIONS, SOURCE_ROOT, TESTS_DIR};
use crate::error::{io_err, WorkspaceError};
use crate::vcs::Vcs;

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// One synchronizable local file and its remote counterpart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Location on disk.
    pub local_path: PathBuf,
    /// Path relative to the source root, `/`-separated on every platform.
    pub src_path: String,
    /// Wiki page backing this file.
    pub remote_title: String,
    /// Whether the VCS tracks this file.
    pub is_tracked: bool,
    /// Whether the file differs from the last committed state.
    pub is_modified: bool,
}

/// Which part of the source tree a scan covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanScope {
    /// The gadget's own sources; `wiki_deps/` is skipped. Used by pull and
    /// push, since shared dependencies are published by their own bundles.
    GadgetOnly,
    /// Everything, including `wiki_deps/`. Used by the dependency refresh to
    /// spot stale local copies.
    WithSharedDeps,
}

// ---------------------------------------------------------------------------
// Scan
// ---------------------------------------------------------------------------

/// Enumerate eligible files under `<root>/src`.
///
/// A file is included iff its extension is one of [`SOURCE_EXTENSIONS`], it
/// is not listed in `ignoredFiles`, and it does not lie under `tests/` or
/// (for [`ScanScope::GadgetOnly`]) under `wiki_deps/`. Tracked/modified
/// status comes from `vcs`; probe failures read as `false`.
///
/// The result is sorted case-insensitively by relative path.
pub fn scan_at(
    root: &Path,
    config: &Config,
    vcs: &dyn Vcs,
    scope: ScanScope,
) -> Result<Vec<FileRecord>, WorkspaceError> {
    let source_root = root.join(SOURCE_ROOT);
    let mut records = Vec::new();
    walk(&source_root, String::new(), config, vcs, scope, &mut records)?;
    records.sort_by_key(|r| r.src_path.to_lowercase());
    Ok(records)
}

fn walk(
    dir: &Path,
    rel: String,
    config: &Config,
    vcs: &dyn Vcs,
    scope: ScanScope,
    records: &mut Vec<FileRecord>,
) -> Result<(), WorkspaceError> {
    let mut entries: Vec<_> = std::fs::read_dir(dir)
        .map_err(|e| io_err(dir, e))?
        .filter_map(|e| e.ok())
        .collect();
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let name = entry.file_name().to_string_lossy().into_owned();
        let child_rel = if rel.is_empty() {
            name.clone()
        } else {
            format!("{rel}/{name}")
        };
        let file_type = entry.file_type().map_err(|e| io_err(entry.path(), e))?;

        if file_type.is_dir() {
            if name == TESTS_DIR {
                continue;
            }
            if scope == ScanScope::GadgetOnly && child_rel == SHARED_DEPS_DIR {
                continue;
            }
            walk(&entry.path(), child_rel, config, vcs, scope, records)?;
        } else if eligible_extension(&entry.path()) && !config.is_ignored(&child_rel) {
            let local_path = entry.path();
            records.push(FileRecord {
                remote_title: config.remote_title(&child_rel),
                src_path: child_rel,
                is_tracked: vcs.is_tracked(&local_path),
                is_modified: vcs.is_modified(&local_path),
                local_path,
            });
        }
    }
    Ok(())
}

fn eligible_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SOURCE_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
