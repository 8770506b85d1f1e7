//! Relative-path prefixes for import rewriting.
//!
//! Local sources import relative to their own directory; wiki pages import
//! relative to the bundle's title prefix. Both prefixes fall out of the
//! file's `/`-separated relative path alone.

use gadgetry_core::config::SHARED_DEPS_DIR;

fn segments(src_path: &str) -> usize {
    src_path.split('/').filter(|s| !s.is_empty()).count()
}

/// Prefix that reaches the source root from `src_path`'s directory:
/// `"./"` for a root-level file, otherwise one `"../"` per directory level.
pub fn root_prefix(src_path: &str) -> String {
    let levels = segments(src_path).saturating_sub(1);
    if levels == 0 {
        "./".to_owned()
    } else {
        "../".repeat(levels)
    }
}

/// Prefix that escapes the bundle's title prefix on the wiki side: one
/// `"../"` per path segment, the page title itself counting as a level.
pub fn wiki_prefix(src_path: &str) -> String {
    "../".repeat(segments(src_path).max(1))
}

/// Whether `src_path` lies inside the shared-dependency directory.
pub fn in_shared_deps(src_path: &str) -> bool {
    src_path.split('/').next() == Some(SHARED_DEPS_DIR)
}
