//! Shared command bootstrap: config, wiki session, inventory.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use gadgetry_core::{scan_at, Config, FileRecord, Git, ScanScope};
use gadgetry_wiki::WikiClient;

/// A command's working state: the project root, its config, and a connected
/// wiki session.
pub struct Session {
    pub root: PathBuf,
    pub config: Config,
    pub client: WikiClient,
}

impl Session {
    /// Load `config.json` from the current directory, open a wiki session,
    /// and log in when credentials are present in the environment.
    pub fn open() -> Result<Self> {
        let root = env::current_dir().context("could not determine the current directory")?;
        let config = Config::load_at(&root)
            .context("failed to load config.json — run from the gadget project root")?;
        let mut client = WikiClient::connect(&config.api_url, config.save_delay())
            .with_context(|| format!("cannot reach the wiki API at {}", config.api_url))?;
        client.login_from_env().context("login failed")?;
        Ok(Self {
            root,
            config,
            client,
        })
    }

    /// Scan the source tree with git-backed status probes.
    pub fn inventory(&self, scope: ScanScope) -> Result<Vec<FileRecord>> {
        let vcs = Git::new(&self.root);
        scan_at(&self.root, &self.config, &vcs, scope).context("failed to scan the source tree")
    }
}
