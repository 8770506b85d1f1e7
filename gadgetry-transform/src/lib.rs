//! # gadgetry-transform
//!
//! The CommonJS ⇄ ESM rewrite applied to gadget sources as they move between
//! the wiki and the local tree.
//!
//! This is pattern rewriting, not a JavaScript parser. It is only valid for
//! the restricted module grammar gadget sources are held to: one
//! `require`/`export` statement per line, no nested requires, and multi-line
//! statements only for ESM import lists. Text outside that grammar passes
//! through unchanged.

pub mod icons;
pub mod paths;
pub mod rewrite;

pub use icons::{extract_codex_icons, CODEX_ICONS_PACKAGE};
pub use rewrite::Rewriter;
