// src/store/mod.rs

//! The trigger-based process resolution engine.
//!
//! Layout of an on-disk store:
//!
//! ```text
//! <root>/Group/SubGroup/Project/     one directory per project path segment
//!     _parent                        first line: parent project identifier
//!     <trigger>.<name>.pdef          process definition, opaque text
//!     <trigger>.<name>.conf          base JSON config (whole-line # comments)
//!     <trigger>.<name>.merge_conf    deep-merged JSON fragment, null deletes
//!     <trigger>.<name>.disable       cancels the inherited process name
//! ```
//!
//! [`ProcessStore::resolve`] walks the `_parent` chain ancestor-first and
//! applies override / reset / merge / disable semantics per directory.

pub mod chain;
pub mod conf;
pub mod project;
pub mod resolve;
pub mod scan;
pub mod validate;

pub use chain::{resolve_chain, ProcessDirectory, PARENT_POINTER_FILE};
pub use conf::Config;
pub use project::ProjectPath;
pub use resolve::{ProcessStore, Resolved, ResolvedProcess};
pub use scan::{scan, TriggerFiles};
pub use validate::{audit_store, AuditReport, Finding, Severity};
