//! VCS status oracle.
//!
//! Sync decisions hinge on two per-file questions: is the file tracked, and
//! does it differ from the last committed state. The oracle is advisory —
//! implementations answer `false` when a probe fails rather than surface an
//! error, so a missing `git` binary degrades to "nothing tracked" instead of
//! aborting a pass.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Tracked / modified status queries for local files.
pub trait Vcs {
    /// Whether `path` is tracked by version control.
    fn is_tracked(&self, path: &Path) -> bool;

    /// Whether `path` differs from the last committed state.
    fn is_modified(&self, path: &Path) -> bool;
}

/// Git-backed [`Vcs`] shelling out to the `git` binary.
#[derive(Debug, Clone)]
pub struct Git {
    root: PathBuf,
}

impl Git {
    /// Probe files of the repository rooted at (or above) `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn probe(&self, args: &[&str]) -> Option<std::process::ExitStatus> {
        Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .ok()
    }
}

impl Vcs for Git {
    fn is_tracked(&self, path: &Path) -> bool {
        let path = path.to_string_lossy();
        match self.probe(&["ls-files", "--error-unmatch", "--", &path]) {
            Some(status) => status.success(),
            None => {
                tracing::debug!("git ls-files probe failed for {path}");
                false
            }
        }
    }

    fn is_modified(&self, path: &Path) -> bool {
        let path = path.to_string_lossy();
        // `git diff --quiet` exits 1 exactly when the worktree differs.
        let status = self.probe(&["diff", "--quiet", "--", &path]);
        match status.and_then(|s| s.code()) {
            Some(1) => true,
            Some(_) => false,
            None => {
                tracing::debug!("git diff probe failed for {path}");
                false
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
