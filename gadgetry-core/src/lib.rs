//! Gadgetry core library — configuration, file inventory, VCS status.
//!
//! Public API surface:
//! - [`config`] — `config.json` loading and the reserved names
//! - [`workspace`] — [`FileRecord`] and the source-tree scan
//! - [`vcs`] — the [`Vcs`] status oracle and its git implementation
//! - [`error`] — [`WorkspaceError`]

pub mod config;
pub mod error;
pub mod vcs;
pub mod workspace;

pub use config::Config;
pub use error::WorkspaceError;
pub use vcs::{Git, Vcs};
pub use workspace::{scan_at, FileRecord, ScanScope};
