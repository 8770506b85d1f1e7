//! # gadgetry-sync
//!
//! The synchronization passes between a local gadget working tree and its
//! wiki: [`pull::pull`] mirrors wiki pages into the tree, [`push::push`]
//! mirrors local sources back (and refreshes the gadget definition),
//! [`shared::refresh_shared_deps`] re-downloads shared dependencies, and
//! [`wikis::refresh_wiki_list`] rebuilds the interwiki data file.
//!
//! Passes never print; they log through `tracing` and return structured
//! reports for the caller to render.

pub mod error;
pub mod lint;
pub mod manifest;
pub mod outcome;
pub mod pull;
pub mod push;
pub mod shared;
pub mod wikis;
pub mod writer;

#[cfg(test)]
pub(crate) mod testing;

pub use error::SyncError;
pub use outcome::PassOutcome;
pub use writer::WriteResult;
