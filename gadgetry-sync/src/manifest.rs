//! Gadget definition line: generation and in-page replacement.
//!
//! A gadget is registered on the shared definitions page as one list line:
//!
//! ```text
//! * name [ResourceLoader | package | dependencies = … | codexIcons = …] | page | page
//! ```
//!
//! [`generate_definition`] renders the body of that line from the config and
//! the current inventory; [`replace_definition_line`] swaps it into the page
//! without touching any other gadget's line.

use std::collections::BTreeSet;

use regex::{NoExpand, Regex};

use gadgetry_core::{Config, FileRecord};

/// Render the definition body for the gadget. Pure formatting, no I/O.
///
/// Dependencies keep their declared order. Icons sort case-insensitively.
/// Sources are the tracked files (as `name/src_path`) plus the declared
/// shared dependency pages, sorted case-insensitively except that entries
/// containing `main` come first.
pub fn generate_definition(
    config: &Config,
    inventory: &[FileRecord],
    icons: &BTreeSet<String>,
) -> String {
    let deps = config.dependencies.join(", ");

    let mut icon_names: Vec<&str> = icons.iter().map(String::as_str).collect();
    icon_names.sort_by_key(|name| name.to_lowercase());
    let icons = icon_names.join(", ");

    let mut sources: Vec<String> = inventory
        .iter()
        .filter(|file| file.is_tracked)
        .map(|file| format!("{}/{}", config.gadget_name, file.src_path))
        .chain(config.shared_dependencies.iter().cloned())
        .collect();
    sources.sort_by_key(|source| (!source.contains("main"), source.to_lowercase()));
    let sources = sources.join(" | ");

    format!(
        "{} [ResourceLoader | package | dependencies = {deps} | codexIcons = {icons}] | {sources}",
        config.gadget_name
    )
}

/// Replace the gadget's line on the definitions page.
///
/// Matches a line of the form `* {name} [...]` whose leading token is
/// exactly the gadget name; every other line is preserved byte for byte.
/// Returns the updated text and whether a line matched.
pub fn replace_definition_line(
    page_text: &str,
    gadget_name: &str,
    definition: &str,
) -> (String, bool) {
    let pattern = Regex::new(&format!(
        r"(?m)^\*\s*{}\s*\[.+$",
        regex::escape(gadget_name)
    ))
    .expect("definition line pattern");

    if !pattern.is_match(page_text) {
        return (page_text.to_owned(), false);
    }
    let line = format!("* {definition}");
    (pattern.replace(page_text, NoExpand(&line)).into_owned(), true)
}
