//! Gadgetry — wiki gadget repository synchronization CLI.
//!
//! # Usage
//!
//! ```text
//! gadgetry pull [-o|--overwrite] [-v|--verbose]
//! gadgetry push [-f|--force] [-m|--message <summary>] [-v|--verbose]
//! gadgetry refresh-deps [-v|--verbose]
//! gadgetry refresh-wikis
//! ```
//!
//! Commands run from the gadget project root (the directory holding
//! `config.json`). Credentials come from `GADGETRY_USERNAME` and
//! `GADGETRY_PASSWORD`; without them the session is anonymous.

mod commands;
mod session;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;

use commands::{
    pull::PullArgs, push::PushArgs, refresh_deps::RefreshDepsArgs, refresh_wikis::RefreshWikisArgs,
};
use gadgetry_sync::PassOutcome;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "gadgetry",
    version,
    about = "Synchronize a gadget repository with its wiki",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Pull the gadget's pages from the wiki into the working tree.
    Pull(PullArgs),

    /// Push local sources to the wiki and refresh the gadget definition.
    Push(PushArgs),

    /// Re-download the shared dependencies under src/wiki_deps/.
    RefreshDeps(RefreshDepsArgs),

    /// Rebuild the interwiki data file from the wikistats feed.
    RefreshWikis(RefreshWikisArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Pull(args) => args.run(),
        Commands::Push(args) => args.run(),
        Commands::RefreshDeps(args) => args.run(),
        Commands::RefreshWikis(args) => args.run(),
    };

    match result {
        Ok(outcome) => {
            if outcome != PassOutcome::Clean {
                eprintln!(
                    "{}",
                    "Some steps failed — re-run with --verbose for details.".yellow()
                );
            }
            ExitCode::from(outcome.exit_code())
        }
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
