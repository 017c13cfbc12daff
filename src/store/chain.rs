// src/store/chain.rs

//! Inheritance chain resolution.
//!
//! A project directory may contain a `_parent` file whose first line names
//! another project. Resolution follows these pointers and returns the
//! directories ancestor-first, so that more specific directories override
//! what their ancestors contributed.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, error, warn};

use crate::store::project::ProjectPath;

/// Name of the inheritance pointer file inside a project directory.
pub const PARENT_POINTER_FILE: &str = "_parent";

/// One directory of an inheritance chain.
///
/// `path` is the canonicalised (symlink-resolved) location; cycle detection
/// compares these real paths, not the identifiers used to reach them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessDirectory {
    pub project: ProjectPath,
    pub path: PathBuf,
}

/// Resolve the inheritance chain for `project` under `root`, ancestor first.
///
/// The chain is recomputed from disk on every call; nothing is cached. A
/// missing or non-directory project path yields an empty chain, not an
/// error. A cycle among `_parent` pointers is logged and truncates that
/// branch: the directory whose parent closes the cycle is dropped from the
/// chain (its inheritance is unusable), while directories below it still
/// contribute.
pub fn resolve_chain(root: &Path, project: &ProjectPath) -> Vec<ProcessDirectory> {
    let mut chain = Vec::new();
    let mut visiting = Vec::new();
    descend(root, project, &mut visiting, &mut chain);
    chain
}

fn descend(
    root: &Path,
    project: &ProjectPath,
    visiting: &mut Vec<PathBuf>,
    chain: &mut Vec<ProcessDirectory>,
) {
    let dir = project.dir_under(root);
    let real = match fs::canonicalize(&dir) {
        Ok(real) => real,
        Err(err) => {
            debug!(
                project = %project,
                dir = %dir.display(),
                error = %err,
                "project directory missing, nothing to resolve"
            );
            return;
        }
    };
    if !real.is_dir() {
        debug!(
            project = %project,
            path = %real.display(),
            "project path is not a directory, skipping"
        );
        return;
    }

    visiting.push(real.clone());
    let mut cyclic = false;

    if let Some(parent) = read_parent_pointer(&real) {
        let parent_dir = parent.dir_under(root);
        match fs::canonicalize(&parent_dir) {
            Ok(parent_real) if visiting.contains(&parent_real) => {
                error!(
                    project = %project,
                    parent = %parent,
                    chain = ?visiting,
                    "inheritance cycle detected, dropping this directory from the chain"
                );
                cyclic = true;
            }
            _ => {
                // Missing parent directories are handled inside the recursion.
                descend(root, &parent, visiting, chain);
            }
        }
    }

    visiting.pop();
    if !cyclic {
        chain.push(ProcessDirectory {
            project: project.clone(),
            path: real,
        });
    }
}

/// Read and parse the `_parent` pointer of `dir`, if any.
///
/// An unreadable file or an invalid identifier is logged and treated as
/// "no parent".
fn read_parent_pointer(dir: &Path) -> Option<ProjectPath> {
    let pointer = dir.join(PARENT_POINTER_FILE);
    let contents = match fs::read_to_string(&pointer) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
        Err(err) => {
            warn!(
                file = %pointer.display(),
                error = %err,
                "unreadable _parent pointer, treating as no parent"
            );
            return None;
        }
    };

    let line = contents.lines().next().unwrap_or("").trim();
    if line.is_empty() {
        warn!(file = %pointer.display(), "empty _parent pointer, treating as no parent");
        return None;
    }

    match line.parse::<ProjectPath>() {
        Ok(parent) => Some(parent),
        Err(err) => {
            warn!(
                file = %pointer.display(),
                error = %err,
                "unparsable _parent pointer, treating as no parent"
            );
            None
        }
    }
}
