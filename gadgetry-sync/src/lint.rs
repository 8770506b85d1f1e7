//! Post-pull lint hook.
//!
//! Pulled pages carry wiki-side formatting; `npm run lint:fix` brings them
//! back in line with the repository style. Best effort only — a missing
//! npm or a dirty exit is reported, never fatal.

use std::path::Path;
use std::process::Command;

/// Result of the `npm run lint:fix` hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LintOutcome {
    /// Exited 0.
    Clean,
    /// Exited non-zero.
    Dirty(i32),
    /// The process could not be started.
    Unavailable(String),
}

/// Run `npm run lint:fix` in `root`, inheriting stdio.
pub fn run_fix(root: &Path) -> LintOutcome {
    run_with("npm", root)
}

fn run_with(program: &str, root: &Path) -> LintOutcome {
    let status = Command::new(program)
        .args(["run", "lint:fix"])
        .current_dir(root)
        .status();
    match status {
        Ok(status) if status.success() => LintOutcome::Clean,
        Ok(status) => {
            let code = status.code().unwrap_or(-1);
            tracing::warn!("lint:fix exited with status {code}");
            LintOutcome::Dirty(code)
        }
        Err(e) => {
            tracing::warn!("could not run 'npm run lint:fix': {e}");
            LintOutcome::Unavailable(e.to_string())
        }
    }
}
