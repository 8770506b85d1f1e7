//! Gadget project configuration.
//!
//! # File layout
//!
//! ```text
//! <project root>/
//!   config.json        (read once per run)
//!   src/               (synchronized sources)
//!     wiki_deps/       (shared dependencies, refreshed separately)
//!     tests/           (never synchronized)
//! ```
//!
//! # API pattern
//!
//! Loading has two forms:
//! - `Config::load_at(root)` — explicit project root; used in tests with `TempDir`
//! - `Config::load()` — derives the root from the working directory
//!
//! Tests must NEVER call the no-arg wrapper; always use `load_at`.

use std::collections::BTreeSet;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{io_err, WorkspaceError};

// ---------------------------------------------------------------------------
// Reserved names
// ---------------------------------------------------------------------------

/// Configuration file name, resolved against the project root.
pub const CONFIG_FILE: &str = "config.json";

/// Directory holding the synchronized sources.
pub const SOURCE_ROOT: &str = "src";

/// Directory under [`SOURCE_ROOT`] holding shared dependencies.
pub const SHARED_DEPS_DIR: &str = "wiki_deps";

/// Directory under [`SOURCE_ROOT`] that is never synchronized.
pub const TESTS_DIR: &str = "tests";

/// Extensions of files eligible for synchronization.
pub const SOURCE_EXTENSIONS: [&str; 3] = ["js", "vue", "json"];

/// Title prefix of every gadget page on the wiki.
pub const PAGE_PREFIX_BASE: &str = "MediaWiki:Gadget-";

/// The shared page declaring every gadget on the wiki.
pub const DEFINITIONS_TITLE: &str = "MediaWiki:Gadgets-definition";

/// Title of the page a shared dependency is published under.
pub fn dependency_page_title(name: &str) -> String {
    format!("{PAGE_PREFIX_BASE}{name}")
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Wiki-list feed settings for `refresh-wikis`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WikiListConfig {
    /// URL of the tab-separated wikistats dump.
    pub url: String,
    /// Data file under [`SOURCE_ROOT`] receiving the rendered JSON.
    #[serde(default = "default_wiki_list_file")]
    pub file: String,
}

fn default_wiki_list_file() -> String {
    "wikis.json".to_owned()
}

/// Immutable per-run settings, loaded once from `config.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Bundle identifier, e.g. `wikt.create-new-entry`.
    pub gadget_name: String,
    /// `MediaWiki:Gadget-{gadget_name}/` — derived at load, never recomputed.
    pub page_prefix: String,
    /// Action API endpoint, e.g. `https://fr.wiktionary.org/w/api.php`.
    pub api_url: String,
    /// ResourceLoader dependencies, in declared order.
    pub dependencies: Vec<String>,
    /// Shared-dependency identifiers, in declared order.
    pub shared_dependencies: Vec<String>,
    /// Paths relative to [`SOURCE_ROOT`] excluded from synchronization.
    pub ignored_files: BTreeSet<String>,
    /// Minimum milliseconds between consecutive remote saves.
    pub save_delay_ms: u64,
    /// Wiki-list feed settings, when the project uses `refresh-wikis`.
    pub wiki_list: Option<WikiListConfig>,
}

/// On-disk shape of `config.json`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    gadget_name: String,
    api_url: String,
    #[serde(default)]
    dependencies: Vec<String>,
    #[serde(default)]
    shared_dependencies: Vec<String>,
    #[serde(default)]
    ignored_files: BTreeSet<String>,
    #[serde(default)]
    save_delay_ms: u64,
    #[serde(default)]
    wiki_list: Option<WikiListConfig>,
}

impl Config {
    /// A minimal configuration for `gadget_name` against `api_url`.
    pub fn new(gadget_name: impl Into<String>, api_url: impl Into<String>) -> Self {
        let gadget_name = gadget_name.into();
        let page_prefix = format!("{PAGE_PREFIX_BASE}{gadget_name}/");
        Self {
            gadget_name,
            page_prefix,
            api_url: api_url.into(),
            dependencies: Vec::new(),
            shared_dependencies: Vec::new(),
            ignored_files: BTreeSet::new(),
            save_delay_ms: 0,
            wiki_list: None,
        }
    }

    /// Load `<root>/config.json`.
    ///
    /// Returns [`WorkspaceError::ConfigNotFound`] if absent,
    /// [`WorkspaceError::Parse`] (with path + line context) if malformed JSON.
    pub fn load_at(root: &Path) -> Result<Self, WorkspaceError> {
        let path = root.join(CONFIG_FILE);
        if !path.exists() {
            return Err(WorkspaceError::ConfigNotFound { path });
        }
        let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
        let file: ConfigFile =
            serde_json::from_str(&contents).map_err(|e| WorkspaceError::Parse { path, source: e })?;

        let mut config = Config::new(file.gadget_name, file.api_url);
        config.dependencies = file.dependencies;
        config.shared_dependencies = file.shared_dependencies;
        config.ignored_files = file.ignored_files;
        config.save_delay_ms = file.save_delay_ms;
        config.wiki_list = file.wiki_list;
        Ok(config)
    }

    /// `load_at` convenience wrapper against the working directory.
    pub fn load() -> Result<Self, WorkspaceError> {
        let cwd = std::env::current_dir().map_err(|e| io_err(".", e))?;
        Self::load_at(&cwd)
    }

    /// Title of the wiki page backing a source file.
    pub fn remote_title(&self, src_path: &str) -> String {
        format!("{}{src_path}", self.page_prefix)
    }

    /// Whether `src_path` is excluded from synchronization.
    pub fn is_ignored(&self, src_path: &str) -> bool {
        self.ignored_files.contains(src_path)
    }

    /// Minimum pause between remote saves, from `saveDelayMs`.
    pub fn save_delay(&self) -> Duration {
        Duration::from_millis(self.save_delay_ms)
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
