// src/errors.rs

//! Crate-wide error aliases and helpers.

use std::path::PathBuf;

use thiserror::Error;

/// Typed outcomes of store operations.
///
/// Inside the resolution engine most of these are ordinary values rather than
/// failures: the orchestrator logs them and degrades to "fewer resolved
/// processes" instead of propagating. Only the CLI / application layer treats
/// them as hard errors (e.g. an invalid project identifier on the command
/// line).
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("invalid project identifier '{ident}': {reason}")]
    InvalidProjectPath { ident: String, reason: String },

    #[error("unreadable file {path}: {source}")]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid conf file {path}: {source}")]
    InvalidConf {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("merge fragment {path} has no base configuration for process '{name}'")]
    OrphanMergeFragment { path: PathBuf, name: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, StoreError>;
