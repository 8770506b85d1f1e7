//! `gadgetry pull` — mirror wiki pages into the working tree.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use gadgetry_core::ScanScope;
use gadgetry_sync::lint::{self, LintOutcome};
use gadgetry_sync::pull::{pull, PullAction};
use gadgetry_sync::PassOutcome;

use crate::session::Session;

/// Arguments for `gadgetry pull`.
#[derive(Args, Debug)]
pub struct PullArgs {
    /// Overwrite uncommitted local changes and untracked files.
    #[arg(short, long)]
    pub overwrite: bool,

    /// Print every file, not just skips.
    #[arg(short, long)]
    pub verbose: bool,
}

impl PullArgs {
    pub fn run(self) -> Result<PassOutcome> {
        let mut session = Session::open()?;
        let inventory = session.inventory(ScanScope::GadgetOnly)?;

        println!("Pulling changes from the wiki…");
        let report = pull(
            &session.config,
            &inventory,
            &mut session.client,
            self.overwrite,
        )?;

        let mut written = 0;
        let mut unchanged = 0;
        let mut skipped = 0;
        for file in &report.files {
            match file.action {
                PullAction::Written => {
                    written += 1;
                    println!("  {}  {} ← [[{}]]", "✎".green(), file.src_path, file.remote_title);
                }
                PullAction::Unchanged => {
                    unchanged += 1;
                    if self.verbose {
                        println!("  ·  {}", file.src_path);
                    }
                }
                PullAction::SkippedAbsent => {
                    skipped += 1;
                    println!(
                        "  {}  [[{}]] does not exist, skipping",
                        "!".yellow(),
                        file.remote_title
                    );
                }
                PullAction::SkippedUntracked => {
                    skipped += 1;
                    println!(
                        "  {}  '{}' is not tracked but [[{}]] exists, skipping (use --overwrite)",
                        "!".yellow(),
                        file.src_path,
                        file.remote_title
                    );
                }
                PullAction::SkippedModified => {
                    skipped += 1;
                    println!(
                        "  {}  '{}' has uncommitted changes, skipping (use --overwrite)",
                        "!".yellow(),
                        file.src_path
                    );
                }
            }
        }
        println!(
            "{} pull finished ({written} written, {unchanged} unchanged, {skipped} skipped)",
            "✓".green()
        );

        println!("Running 'npm run lint:fix'…");
        let outcome = match lint::run_fix(&session.root) {
            LintOutcome::Clean => PassOutcome::Clean,
            LintOutcome::Dirty(code) => {
                println!("  {}  lint:fix exited with status {code}", "!".yellow());
                PassOutcome::FileFailures
            }
            LintOutcome::Unavailable(reason) => {
                println!("  {}  could not run lint:fix: {reason}", "!".yellow());
                PassOutcome::FileFailures
            }
        };
        Ok(outcome)
    }
}
