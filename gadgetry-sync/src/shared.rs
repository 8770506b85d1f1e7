//! Shared-dependency refresh: re-download `wiki_deps/` from the wiki.
//!
//! Each declared dependency is published by its own bundle under
//! `MediaWiki:Gadget-{name}`; the local copies exist only so module
//! resolution works offline. This pass never pushes them back.

use std::collections::BTreeSet;
use std::path::Path;

use gadgetry_core::config::{dependency_page_title, SHARED_DEPS_DIR, SOURCE_ROOT};
use gadgetry_core::{Config, FileRecord};
use gadgetry_transform::Rewriter;
use gadgetry_wiki::PageStore;

use crate::error::SyncError;
use crate::writer::{write_if_changed, WriteResult};

/// What happened to one declared dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepAction {
    Written,
    Unchanged,
    /// The dependency's page does not exist.
    Missing,
}

/// Per-dependency refresh record.
#[derive(Debug)]
pub struct RefreshedDep {
    pub name: String,
    pub action: DepAction,
}

/// Everything a dependency refresh did.
#[derive(Debug)]
pub struct DepReport {
    pub deps: Vec<RefreshedDep>,
    /// Files under `wiki_deps/` that no declared dependency accounts for.
    pub stale: Vec<String>,
}

/// Re-download every declared shared dependency into `src/wiki_deps/`.
///
/// `inventory` must come from a [`gadgetry_core::ScanScope::WithSharedDeps`]
/// scan; it is only used to flag stale local copies.
pub fn refresh_shared_deps(
    root: &Path,
    config: &Config,
    inventory: &[FileRecord],
    store: &mut dyn PageStore,
) -> Result<DepReport, SyncError> {
    let rewriter = Rewriter::new(&config.shared_dependencies);
    let mut deps = Vec::with_capacity(config.shared_dependencies.len());

    for name in &config.shared_dependencies {
        let title = dependency_page_title(name);
        let action = match store.read_page(&title)? {
            None => {
                tracing::warn!("[[{title}]] does not exist, skipping");
                DepAction::Missing
            }
            Some(text) => {
                let dep_path = format!("{SHARED_DEPS_DIR}/{name}");
                let esm = rewriter.to_esm(&text, &dep_path);
                let local = root.join(SOURCE_ROOT).join(SHARED_DEPS_DIR).join(name);
                match write_if_changed(&local, &esm)? {
                    WriteResult::Written { .. } => DepAction::Written,
                    WriteResult::Unchanged { .. } => DepAction::Unchanged,
                }
            }
        };
        deps.push(RefreshedDep {
            name: name.clone(),
            action,
        });
    }

    let declared: BTreeSet<&str> = config.shared_dependencies.iter().map(String::as_str).collect();
    let prefix = format!("{SHARED_DEPS_DIR}/");
    let stale: Vec<String> = inventory
        .iter()
        .filter_map(|file| file.src_path.strip_prefix(&prefix))
        .filter(|name| !declared.contains(name))
        .map(str::to_owned)
        .collect();
    for name in &stale {
        tracing::warn!("'{prefix}{name}' is not a declared shared dependency");
    }

    Ok(DepReport { deps, stale })
}
