//! `gadgetry refresh-wikis` — rebuild the interwiki data file.

use std::env;

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;

use gadgetry_core::Config;
use gadgetry_sync::wikis::refresh_wiki_list;
use gadgetry_sync::{PassOutcome, WriteResult};
use gadgetry_wiki::feed;

/// Arguments for `gadgetry refresh-wikis`.
#[derive(Args, Debug)]
pub struct RefreshWikisArgs {}

impl RefreshWikisArgs {
    pub fn run(self) -> Result<PassOutcome> {
        let root = env::current_dir().context("could not determine the current directory")?;
        let config = Config::load_at(&root)
            .context("failed to load config.json — run from the gadget project root")?;
        let Some(wiki_list) = config.wiki_list else {
            bail!("config.json has no \"wikiList\" section");
        };

        println!("Fetching {}…", wiki_list.url);
        let feed_text = feed::fetch_text(&wiki_list.url)
            .with_context(|| format!("could not fetch the wiki list from {}", wiki_list.url))?;

        let report = refresh_wiki_list(&root, &wiki_list.file, &feed_text)?;
        match &report.result {
            WriteResult::Written { path } => {
                println!("{} {} wikis → {}", "✓".green(), report.count, path.display());
            }
            WriteResult::Unchanged { path } => {
                println!(
                    "  ·  {} already up to date ({} wikis)",
                    path.display(),
                    report.count
                );
            }
        }
        Ok(PassOutcome::Clean)
    }
}
