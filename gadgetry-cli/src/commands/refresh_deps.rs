//! `gadgetry refresh-deps` — re-download shared dependencies.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use gadgetry_core::config::SHARED_DEPS_DIR;
use gadgetry_core::ScanScope;
use gadgetry_sync::shared::{refresh_shared_deps, DepAction};
use gadgetry_sync::PassOutcome;

use crate::session::Session;

/// Arguments for `gadgetry refresh-deps`.
#[derive(Args, Debug)]
pub struct RefreshDepsArgs {
    /// Print every dependency, not just problems.
    #[arg(short, long)]
    pub verbose: bool,
}

impl RefreshDepsArgs {
    pub fn run(self) -> Result<PassOutcome> {
        let mut session = Session::open()?;
        if session.config.shared_dependencies.is_empty() {
            println!("No shared dependencies declared in config.json.");
            return Ok(PassOutcome::Clean);
        }
        let inventory = session.inventory(ScanScope::WithSharedDeps)?;

        println!("Refreshing shared dependencies…");
        let report = refresh_shared_deps(
            &session.root,
            &session.config,
            &inventory,
            &mut session.client,
        )?;

        let mut written = 0;
        let mut unchanged = 0;
        for dep in &report.deps {
            match dep.action {
                DepAction::Written => {
                    written += 1;
                    println!("  {}  {SHARED_DEPS_DIR}/{}", "✎".green(), dep.name);
                }
                DepAction::Unchanged => {
                    unchanged += 1;
                    if self.verbose {
                        println!("  ·  {SHARED_DEPS_DIR}/{}", dep.name);
                    }
                }
                DepAction::Missing => {
                    println!(
                        "  {}  [[MediaWiki:Gadget-{}]] does not exist, skipping",
                        "!".yellow(),
                        dep.name
                    );
                }
            }
        }
        for name in &report.stale {
            println!(
                "  {}  '{SHARED_DEPS_DIR}/{name}' is not declared in config.json — delete it or declare it",
                "!".yellow()
            );
        }
        println!(
            "{} refresh finished ({written} written, {unchanged} unchanged)",
            "✓".green()
        );
        Ok(PassOutcome::Clean)
    }
}
