//! Subcommand implementations.

pub mod pull;
pub mod push;
pub mod refresh_deps;
pub mod refresh_wikis;
