//! Pull pass: mirror wiki pages into the working tree.
//!
//! Each inventory file's backing page is fetched, rewritten to ESM, and
//! written locally. Conflicts never abort the pass: a missing page, an
//! untracked local file, or uncommitted local changes each skip that one
//! file (`--overwrite` forces through the latter two).

use gadgetry_core::{Config, FileRecord};
use gadgetry_transform::Rewriter;
use gadgetry_wiki::PageStore;

use crate::error::SyncError;
use crate::writer::{write_if_changed, WriteResult};

/// What happened to one file during a pull.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullAction {
    /// The page's content landed on disk.
    Written,
    /// The local file already matched the page.
    Unchanged,
    /// The backing page does not exist.
    SkippedAbsent,
    /// The local file is untracked; pulling would shadow it.
    SkippedUntracked,
    /// The local file has uncommitted changes.
    SkippedModified,
}

/// Per-file pull record.
#[derive(Debug)]
pub struct PulledFile {
    pub src_path: String,
    pub remote_title: String,
    pub action: PullAction,
}

/// Everything a pull did, in inventory order.
#[derive(Debug)]
pub struct PullReport {
    pub files: Vec<PulledFile>,
}

/// Mirror every inventory file's backing page into the working tree.
///
/// Local write errors are fatal; conflict skips are not.
pub fn pull(
    config: &Config,
    inventory: &[FileRecord],
    store: &mut dyn PageStore,
    overwrite: bool,
) -> Result<PullReport, SyncError> {
    let rewriter = Rewriter::new(&config.shared_dependencies);
    let mut files = Vec::with_capacity(inventory.len());
    for file in inventory {
        let action = pull_file(&rewriter, file, store, overwrite)?;
        files.push(PulledFile {
            src_path: file.src_path.clone(),
            remote_title: file.remote_title.clone(),
            action,
        });
    }
    Ok(PullReport { files })
}

fn pull_file(
    rewriter: &Rewriter,
    file: &FileRecord,
    store: &mut dyn PageStore,
    overwrite: bool,
) -> Result<PullAction, SyncError> {
    let Some(remote) = store.read_page(&file.remote_title)? else {
        tracing::warn!("[[{}]] does not exist, skipping", file.remote_title);
        return Ok(PullAction::SkippedAbsent);
    };

    if !file.is_tracked && !overwrite {
        tracing::warn!(
            "'{}' is not tracked but [[{}]] exists on the wiki, skipping",
            file.src_path,
            file.remote_title
        );
        return Ok(PullAction::SkippedUntracked);
    }

    if file.is_modified && !overwrite {
        tracing::warn!("'{}' has uncommitted changes, skipping", file.src_path);
        return Ok(PullAction::SkippedModified);
    }

    let esm = rewriter.to_esm(&remote, &file.src_path);
    match write_if_changed(&file.local_path, &esm)? {
        WriteResult::Written { .. } => Ok(PullAction::Written),
        WriteResult::Unchanged { .. } => Ok(PullAction::Unchanged),
    }
}
