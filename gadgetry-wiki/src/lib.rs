//! # gadgetry-wiki
//!
//! Blocking MediaWiki Action API client: the remote page store the sync
//! passes read from and write to, plus the plain-text fetch behind
//! `refresh-wikis`.

pub mod client;
pub mod error;
pub mod feed;

pub use client::{PageStore, WikiClient};
pub use error::WikiError;
