//! Codex icon imports.
//!
//! Locally the sources import icons from the npm package; on the wiki the
//! same import points at the bundle's `icons.json` page. The identifiers
//! imported anywhere in the tree also feed the gadget definition's
//! `codexIcons` list.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

/// npm package specifier the local sources import icons from.
pub const CODEX_ICONS_PACKAGE: &str = "@wikimedia/codex-icons";

static CODEX_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)import \{([^}]*)\} from "@wikimedia/codex-icons";"#)
        .expect("codex import pattern")
});

/// Collect every icon identifier imported from [`CODEX_ICONS_PACKAGE`].
///
/// Import lists may span multiple lines; duplicates collapse.
pub fn extract_codex_icons(text: &str) -> BTreeSet<String> {
    let mut icons = BTreeSet::new();
    for caps in CODEX_IMPORT.captures_iter(text) {
        for name in caps[1].split(',') {
            let name = name.trim();
            if !name.is_empty() {
                icons.insert(name.to_owned());
            }
        }
    }
    icons
}
