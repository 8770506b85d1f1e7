//! `gadgetry push` — publish local sources and refresh the definition.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use gadgetry_core::ScanScope;
use gadgetry_sync::push::{push, DefinitionUpdate, PushAction, PushOptions, DEFAULT_SUMMARY};
use gadgetry_sync::PassOutcome;

use crate::session::Session;

/// Arguments for `gadgetry push`.
#[derive(Args, Debug)]
pub struct PushArgs {
    /// Publish untracked files instead of skipping them.
    #[arg(short, long)]
    pub force: bool,

    /// Edit summary for the page saves.
    #[arg(short, long, default_value = DEFAULT_SUMMARY)]
    pub message: String,

    /// Print every file and a diff of each pending change.
    #[arg(short, long)]
    pub verbose: bool,
}

impl PushArgs {
    pub fn run(self) -> Result<PassOutcome> {
        let mut session = Session::open()?;
        if session.client.username().is_none() {
            println!(
                "{}",
                "No credentials in GADGETRY_USERNAME/GADGETRY_PASSWORD — pushing anonymously."
                    .yellow()
            );
        }
        let inventory = session.inventory(ScanScope::GadgetOnly)?;

        println!("Pushing changes with message: {}", self.message);
        let options = PushOptions {
            force: self.force,
            summary: self.message.clone(),
            capture_diffs: self.verbose,
        };
        let report = push(&session.config, &inventory, &mut session.client, &options)?;

        let mut saved = 0;
        let mut unchanged = 0;
        let mut skipped = 0;
        let mut failed = 0;
        for file in &report.files {
            match &file.action {
                PushAction::Saved => {
                    saved += 1;
                    println!("  {}  {} → [[{}]]", "✎".green(), file.src_path, file.remote_title);
                    if let Some(diff) = &file.diff {
                        print!("{diff}");
                    }
                }
                PushAction::Unchanged => {
                    unchanged += 1;
                    if self.verbose {
                        println!("  ·  {} — no changes", file.src_path);
                    }
                }
                PushAction::SkippedUntracked => {
                    skipped += 1;
                    println!(
                        "  {}  '{}' is not tracked, skipping (use --force)",
                        "!".yellow(),
                        file.src_path
                    );
                }
                PushAction::SaveFailed { reason } => {
                    failed += 1;
                    println!(
                        "  {}  [[{}]] could not be saved: {reason}",
                        "✗".red(),
                        file.remote_title
                    );
                }
            }
        }
        println!(
            "{} push finished ({saved} saved, {unchanged} unchanged, {skipped} skipped, {failed} failed)",
            if failed == 0 { "✓".green() } else { "✗".red() }
        );

        println!("Updating the gadget definition…");
        match &report.definition {
            DefinitionUpdate::Saved { definition } => {
                println!("  {}  definition updated", "✎".green());
                if self.verbose {
                    println!("  {definition}");
                }
            }
            DefinitionUpdate::Unchanged => {
                println!("  ·  definition already up to date");
            }
            DefinitionUpdate::NoEntry => {
                println!(
                    "  {}  no entry for '{}' on the definitions page — add one manually first",
                    "!".yellow(),
                    session.config.gadget_name
                );
            }
            DefinitionUpdate::SaveFailed { reason } => {
                println!(
                    "  {}  the gadget definition could not be saved: {reason}",
                    "✗".red()
                );
            }
        }

        Ok(report.outcome())
    }
}
