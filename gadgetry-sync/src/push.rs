//! Push pass: mirror local sources to the wiki, then refresh the gadget's
//! entry on the definitions page.
//!
//! Save failures never abort the pass. A rejected file save marks that one
//! file and continues; a rejected definition save is recorded at higher
//! severity since it leaves the published gadget inconsistent with its
//! pages.

use std::collections::BTreeSet;

use similar::TextDiff;

use gadgetry_core::config::DEFINITIONS_TITLE;
use gadgetry_core::{Config, FileRecord};
use gadgetry_transform::{extract_codex_icons, Rewriter};
use gadgetry_wiki::PageStore;

use crate::error::{io_err, SyncError};
use crate::manifest::{generate_definition, replace_definition_line};
use crate::outcome::PassOutcome;

/// Edit summary used when `--message` is not given.
pub const DEFAULT_SUMMARY: &str = "Synchronized from the gadget repository";

/// Knobs for a push pass.
#[derive(Debug, Clone)]
pub struct PushOptions {
    /// Push untracked files instead of skipping them.
    pub force: bool,
    /// Edit summary for file saves.
    pub summary: String,
    /// Record a unified diff for every page about to change.
    pub capture_diffs: bool,
}

impl Default for PushOptions {
    fn default() -> Self {
        Self {
            force: false,
            summary: DEFAULT_SUMMARY.to_owned(),
            capture_diffs: false,
        }
    }
}

/// What happened to one file during a push.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushAction {
    /// The page was saved with new content.
    Saved,
    /// Computed text matches the page; no save was attempted.
    Unchanged,
    /// The local file is untracked; publishing it would leak unreviewed code.
    SkippedUntracked,
    /// The wiki rejected the save.
    SaveFailed { reason: String },
}

/// Per-file push record.
#[derive(Debug)]
pub struct PushedFile {
    pub src_path: String,
    pub remote_title: String,
    pub action: PushAction,
    /// Unified diff of the pending change, when requested.
    pub diff: Option<String>,
}

/// How the definitions page fared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefinitionUpdate {
    /// The gadget's line was rewritten and saved.
    Saved { definition: String },
    /// The line already matches the generated definition.
    Unchanged,
    /// No line for this gadget exists on the definitions page.
    NoEntry,
    /// The page could not be fetched or saved.
    SaveFailed { reason: String },
}

/// Everything a push did, in inventory order.
#[derive(Debug)]
pub struct PushReport {
    pub files: Vec<PushedFile>,
    pub definition: DefinitionUpdate,
}

impl PushReport {
    /// Worst outcome observed across the pass.
    pub fn outcome(&self) -> PassOutcome {
        let mut outcome = PassOutcome::Clean;
        if self
            .files
            .iter()
            .any(|file| matches!(file.action, PushAction::SaveFailed { .. }))
        {
            outcome.worsen(PassOutcome::FileFailures);
        }
        if matches!(self.definition, DefinitionUpdate::SaveFailed { .. }) {
            outcome.worsen(PassOutcome::ManifestFailure);
        }
        outcome
    }
}

/// Publish every inventory file, then update the gadget definition.
///
/// Local read errors are fatal; remote save failures are recorded per file
/// and the pass continues.
pub fn push(
    config: &Config,
    inventory: &[FileRecord],
    store: &mut dyn PageStore,
    options: &PushOptions,
) -> Result<PushReport, SyncError> {
    let rewriter = Rewriter::new(&config.shared_dependencies);
    let mut icons = BTreeSet::new();
    let mut files = Vec::with_capacity(inventory.len());

    for file in inventory {
        let local = std::fs::read_to_string(&file.local_path)
            .map_err(|e| io_err(&file.local_path, e))?;
        // Icons count even when the file itself is skipped below: the
        // definition must describe the whole bundle.
        icons.extend(extract_codex_icons(&local));

        if !file.is_tracked && !options.force {
            tracing::warn!("'{}' is not tracked, skipping", file.src_path);
            files.push(PushedFile {
                src_path: file.src_path.clone(),
                remote_title: file.remote_title.clone(),
                action: PushAction::SkippedUntracked,
                diff: None,
            });
            continue;
        }

        let commonjs = rewriter.to_commonjs(&local, &file.src_path);
        let remote = store.read_page(&file.remote_title)?.unwrap_or_default();
        if commonjs.trim() == remote.trim() {
            tracing::debug!("[[{}]] already up to date", file.remote_title);
            files.push(PushedFile {
                src_path: file.src_path.clone(),
                remote_title: file.remote_title.clone(),
                action: PushAction::Unchanged,
                diff: None,
            });
            continue;
        }

        let diff = options
            .capture_diffs
            .then(|| unified(&file.remote_title, &remote, &commonjs));
        let action = match store.save_page(&file.remote_title, &commonjs, &options.summary) {
            Ok(()) => PushAction::Saved,
            Err(e) => {
                tracing::error!("[[{}]] could not be saved: {e}", file.remote_title);
                PushAction::SaveFailed {
                    reason: e.to_string(),
                }
            }
        };
        files.push(PushedFile {
            src_path: file.src_path.clone(),
            remote_title: file.remote_title.clone(),
            action,
            diff,
        });
    }

    let definition = update_definition(config, inventory, &icons, store)?;
    Ok(PushReport { files, definition })
}

fn update_definition(
    config: &Config,
    inventory: &[FileRecord],
    icons: &BTreeSet<String>,
    store: &mut dyn PageStore,
) -> Result<DefinitionUpdate, SyncError> {
    let definition = generate_definition(config, inventory, icons);
    let current = store.read_page(DEFINITIONS_TITLE)?.unwrap_or_default();

    let (updated, matched) = replace_definition_line(&current, &config.gadget_name, &definition);
    if !matched {
        tracing::warn!(
            "no entry for '{}' on [[{DEFINITIONS_TITLE}]], leaving the page alone",
            config.gadget_name
        );
        return Ok(DefinitionUpdate::NoEntry);
    }
    if updated == current {
        tracing::debug!("[[{DEFINITIONS_TITLE}]] already up to date");
        return Ok(DefinitionUpdate::Unchanged);
    }

    let summary = format!(
        "Update the definition of [[{}]]",
        config.page_prefix.trim_end_matches('/')
    );
    match store.save_page(DEFINITIONS_TITLE, &updated, &summary) {
        Ok(()) => Ok(DefinitionUpdate::Saved { definition }),
        Err(e) => {
            tracing::error!("[[{DEFINITIONS_TITLE}]] could not be saved: {e}");
            Ok(DefinitionUpdate::SaveFailed {
                reason: e.to_string(),
            })
        }
    }
}

fn unified(title: &str, old: &str, new: &str) -> String {
    TextDiff::from_lines(old, new)
        .unified_diff()
        .header(&format!("a/{title}"), &format!("b/{title}"))
        .context_radius(3)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryStore;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn config() -> Config {
        Config::new("wikt-edit", "https://wiki.example.org/w/api.php")
    }

    fn write_local(root: &Path, src_path: &str, text: &str, tracked: bool) -> FileRecord {
        let local_path = root.join("src").join(src_path);
        fs::create_dir_all(local_path.parent().unwrap()).unwrap();
        fs::write(&local_path, text).unwrap();
        FileRecord {
            local_path,
            src_path: src_path.to_owned(),
            remote_title: format!("MediaWiki:Gadget-wikt-edit/{src_path}"),
            is_tracked: tracked,
            is_modified: false,
        }
    }

    fn definitions_page_with_entry() -> (&'static str, &'static str) {
        (
            DEFINITIONS_TITLE,
            "* other-tool [ResourceLoader] | other-tool/main.js\n\
             * wikt-edit [ResourceLoader | package | dependencies = ] | wikt-edit/stale.js\n",
        )
    }

    #[test]
    fn untracked_file_is_skipped_without_force() {
        let tmp = TempDir::new().unwrap();
        let file = write_local(tmp.path(), "main.js", "export default 1;\n", false);
        let mut store = MemoryStore::default();

        let report = push(&config(), &[file], &mut store, &PushOptions::default()).unwrap();

        assert_eq!(report.files[0].action, PushAction::SkippedUntracked);
        assert!(store.saves.is_empty());
    }

    #[test]
    fn force_publishes_untracked_files() {
        let tmp = TempDir::new().unwrap();
        let file = write_local(tmp.path(), "main.js", "export default 1;\n", false);
        let mut store = MemoryStore::default();
        let options = PushOptions {
            force: true,
            ..PushOptions::default()
        };

        let report = push(&config(), &[file], &mut store, &options).unwrap();

        assert_eq!(report.files[0].action, PushAction::Saved);
        let (title, text, summary) = &store.saves[0];
        assert_eq!(title, "MediaWiki:Gadget-wikt-edit/main.js");
        assert_eq!(text, "module.exports = 1;\n");
        assert_eq!(summary, DEFAULT_SUMMARY);
    }

    #[test]
    fn matching_remote_text_skips_the_save() {
        let tmp = TempDir::new().unwrap();
        let file = write_local(tmp.path(), "main.js", "export default 1;\n", true);
        // Same text modulo trailing whitespace.
        let mut store = MemoryStore::with_pages(&[(
            "MediaWiki:Gadget-wikt-edit/main.js",
            "module.exports = 1;\n\n",
        )]);

        let report = push(&config(), &[file], &mut store, &PushOptions::default()).unwrap();

        assert_eq!(report.files[0].action, PushAction::Unchanged);
        assert!(store.saves.is_empty());
        assert_eq!(report.outcome(), PassOutcome::Clean);
    }

    #[test]
    fn rejected_save_marks_the_file_and_continues() {
        let tmp = TempDir::new().unwrap();
        let first = write_local(tmp.path(), "broken.js", "export default 1;\n", true);
        let second = write_local(tmp.path(), "fine.js", "export default 2;\n", true);
        let mut store = MemoryStore::default();
        store
            .reject
            .insert("MediaWiki:Gadget-wikt-edit/broken.js".to_owned());

        let report = push(
            &config(),
            &[first, second],
            &mut store,
            &PushOptions::default(),
        )
        .unwrap();

        assert!(matches!(
            report.files[0].action,
            PushAction::SaveFailed { .. }
        ));
        assert_eq!(report.files[1].action, PushAction::Saved);
        assert_eq!(report.outcome(), PassOutcome::FileFailures);
    }

    #[test]
    fn icons_from_skipped_files_still_reach_the_definition() {
        let tmp = TempDir::new().unwrap();
        let skipped = write_local(
            tmp.path(),
            "extras.js",
            "import { cdxIconTrash } from \"@wikimedia/codex-icons\";\nexport default 1;\n",
            false,
        );
        let published = write_local(tmp.path(), "main.js", "export default 2;\n", true);
        let (title, text) = definitions_page_with_entry();
        let mut store = MemoryStore::with_pages(&[(title, text)]);

        let report = push(
            &config(),
            &[skipped, published],
            &mut store,
            &PushOptions::default(),
        )
        .unwrap();

        match &report.definition {
            DefinitionUpdate::Saved { definition } => {
                assert!(definition.contains("cdxIconTrash"), "got: {definition}");
            }
            other => panic!("expected a saved definition, got {other:?}"),
        }
    }

    #[test]
    fn definition_replaces_only_its_own_line() {
        let tmp = TempDir::new().unwrap();
        let file = write_local(tmp.path(), "main.js", "export default 1;\n", true);
        let (title, text) = definitions_page_with_entry();
        let mut store = MemoryStore::with_pages(&[(title, text)]);

        push(&config(), &[file], &mut store, &PushOptions::default()).unwrap();

        let page = store.pages.get(DEFINITIONS_TITLE).unwrap();
        assert!(page.starts_with("* other-tool [ResourceLoader] | other-tool/main.js\n"));
        assert!(page.contains("* wikt-edit [ResourceLoader | package | dependencies = "));
        assert!(!page.contains("stale.js"));
    }

    #[test]
    fn missing_definition_entry_is_not_a_failure() {
        let tmp = TempDir::new().unwrap();
        let file = write_local(tmp.path(), "main.js", "export default 1;\n", true);
        let mut store = MemoryStore::default();

        let report = push(&config(), &[file], &mut store, &PushOptions::default()).unwrap();

        assert_eq!(report.definition, DefinitionUpdate::NoEntry);
        assert_eq!(report.outcome(), PassOutcome::Clean);
        // Only the file save reached the wiki.
        assert_eq!(store.saves.len(), 1);
    }

    #[test]
    fn current_definition_line_skips_the_save() {
        let tmp = TempDir::new().unwrap();
        let file = write_local(tmp.path(), "main.js", "export default 1;\n", true);
        let definition = generate_definition(
            &config(),
            &[FileRecord {
                local_path: tmp.path().join("src").join("main.js"),
                src_path: "main.js".to_owned(),
                remote_title: "MediaWiki:Gadget-wikt-edit/main.js".to_owned(),
                is_tracked: true,
                is_modified: false,
            }],
            &BTreeSet::new(),
        );
        let page = format!("* {definition}\n");
        let mut store = MemoryStore::with_pages(&[(DEFINITIONS_TITLE, page.as_str())]);

        let report = push(&config(), &[file], &mut store, &PushOptions::default()).unwrap();

        assert_eq!(report.definition, DefinitionUpdate::Unchanged);
        assert_eq!(store.saves.len(), 1, "only the file save should happen");
    }

    #[test]
    fn rejected_definition_save_outranks_file_failures() {
        let tmp = TempDir::new().unwrap();
        let file = write_local(tmp.path(), "main.js", "export default 1;\n", true);
        let (title, text) = definitions_page_with_entry();
        let mut store = MemoryStore::with_pages(&[(title, text)]);
        store.reject.insert(DEFINITIONS_TITLE.to_owned());

        let report = push(&config(), &[file], &mut store, &PushOptions::default()).unwrap();

        assert!(matches!(
            report.definition,
            DefinitionUpdate::SaveFailed { .. }
        ));
        assert_eq!(report.outcome(), PassOutcome::ManifestFailure);
        assert_eq!(report.outcome().exit_code(), 2);
    }

    #[test]
    fn definition_save_uses_the_gadget_page_summary() {
        let tmp = TempDir::new().unwrap();
        let file = write_local(tmp.path(), "main.js", "export default 1;\n", true);
        let (title, text) = definitions_page_with_entry();
        let mut store = MemoryStore::with_pages(&[(title, text)]);

        push(&config(), &[file], &mut store, &PushOptions::default()).unwrap();

        let (_, _, summary) = store
            .saves
            .iter()
            .find(|(title, _, _)| title == DEFINITIONS_TITLE)
            .expect("definition save");
        assert_eq!(summary, "Update the definition of [[MediaWiki:Gadget-wikt-edit]]");
    }

    #[test]
    fn captured_diff_shows_the_pending_change() {
        let tmp = TempDir::new().unwrap();
        let file = write_local(tmp.path(), "main.js", "export default 2;\n", true);
        let mut store = MemoryStore::with_pages(&[(
            "MediaWiki:Gadget-wikt-edit/main.js",
            "module.exports = 1;\n",
        )]);
        let options = PushOptions {
            capture_diffs: true,
            ..PushOptions::default()
        };

        let report = push(&config(), &[file], &mut store, &options).unwrap();

        let diff = report.files[0].diff.as_deref().expect("diff");
        assert!(diff.contains("-module.exports = 1;"));
        assert!(diff.contains("+module.exports = 2;"));
    }
}
