// src/store/resolve.rs

//! The process store orchestrator.
//!
//! Walks the inheritance chain for a project, applies override / reset /
//! merge / disable semantics per directory, and yields launch-ready
//! `(configuration, process text)` pairs. Stateless: every call is a fresh
//! traversal of whatever is on disk right now.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, error, warn};

use crate::errors::StoreError;
use crate::store::chain::resolve_chain;
use crate::store::conf::Config;
use crate::store::project::ProjectPath;
use crate::store::scan::scan;

/// One resolved process, ready to hand to a launcher.
///
/// Owned entirely by the caller; the engine retains nothing after yielding.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedProcess {
    /// The process name (file name suffix distinguishing processes that
    /// share a trigger).
    pub name: String,

    /// The `.pdef` file the text was read from (most specific directory in
    /// the chain that supplied a non-disabled definition).
    pub source: PathBuf,

    /// Accumulated configuration, absent when no config file ever applied.
    pub config: Option<Config>,

    /// The definition text, returned verbatim. Opaque to this engine.
    pub process_text: String,
}

/// A read-only view of the on-disk process store.
///
/// Holds nothing but the root path; all resolution state is local to one
/// [`ProcessStore::resolve`] call, so concurrent resolutions cannot
/// interfere with each other.
#[derive(Debug, Clone)]
pub struct ProcessStore {
    root: PathBuf,
}

impl ProcessStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve every still-enabled process for `trigger` under `project`.
    ///
    /// Accumulation over the whole chain happens before this returns; the
    /// `.pdef` reads are deferred to iteration, so an abandoned iterator
    /// reads no further files. Re-invoke to observe store mutations; the
    /// returned sequence reflects one point-in-time traversal.
    ///
    /// This never fails: every per-file problem (benign races, malformed
    /// JSON, cycles, orphan merge fragments) is logged and degrades to
    /// fewer resolved processes, per the store's soft-failure contract.
    pub fn resolve(&self, trigger: &str, project: &ProjectPath) -> Resolved {
        let chain = resolve_chain(&self.root, project);
        debug!(
            trigger,
            project = %project,
            directories = chain.len(),
            "resolved inheritance chain"
        );

        let mut definitions: BTreeMap<String, PathBuf> = BTreeMap::new();
        let mut configs: BTreeMap<String, Config> = BTreeMap::new();
        let mut invalid: BTreeSet<String> = BTreeSet::new();

        for dir in &chain {
            let files = scan(&dir.path, trigger);

            // Disable markers cancel inherited state; a later (or this)
            // directory may reintroduce the name with a fresh .pdef.
            for name in &files.disabled {
                debug!(trigger, process = %name, dir = %dir.path.display(), "process disabled");
                definitions.remove(name);
                configs.remove(name);
            }

            for (name, path) in files.definitions {
                definitions.insert(name, path);
            }

            // A base .conf resets the accumulated configuration outright.
            for (name, path) in files.base_configs {
                match read_config(&path) {
                    Ok(config) => {
                        configs.insert(name, config);
                    }
                    Err(err) => handle_config_error(err, &name, &mut invalid),
                }
            }

            for (name, paths) in files.merge_configs {
                for path in paths {
                    if !configs.contains_key(&name) {
                        let err = StoreError::OrphanMergeFragment {
                            path: path.clone(),
                            name: name.clone(),
                        };
                        error!(
                            trigger,
                            process = %name,
                            error = %err,
                            "merge fragment without base configuration, dropping this level's contribution"
                        );
                        break;
                    }
                    match read_config(&path) {
                        Ok(fragment) => {
                            if let Some(base) = configs.get_mut(&name) {
                                base.merge_fragment(fragment);
                            }
                        }
                        Err(err @ StoreError::Unreadable { .. }) => {
                            handle_config_error(err, &name, &mut invalid);
                        }
                        Err(err) => {
                            handle_config_error(err, &name, &mut invalid);
                            break;
                        }
                    }
                }
            }
        }

        let entries = definitions
            .into_iter()
            .filter(|(name, _)| {
                if invalid.contains(name) {
                    debug!(
                        trigger,
                        process = %name,
                        "excluding process with invalid configuration from output"
                    );
                    false
                } else {
                    true
                }
            })
            .map(|(name, source)| {
                let config = configs.remove(&name);
                (name, source, config)
            })
            .collect::<Vec<_>>();

        Resolved {
            entries: entries.into_iter(),
        }
    }
}

/// Finite iterator over the processes of one resolution call.
///
/// Each enabled process name appears at most once. Order is sorted by
/// process name, but callers must not rely on it.
#[derive(Debug)]
pub struct Resolved {
    entries: std::vec::IntoIter<(String, PathBuf, Option<Config>)>,
}

impl Iterator for Resolved {
    type Item = ResolvedProcess;

    fn next(&mut self) -> Option<Self::Item> {
        for (name, source, config) in self.entries.by_ref() {
            // Deferred read; the file may have vanished since accumulation.
            match fs::read_to_string(&source) {
                Ok(process_text) => {
                    return Some(ResolvedProcess {
                        name,
                        source,
                        config,
                        process_text,
                    });
                }
                Err(err) => {
                    warn!(
                        process = %name,
                        file = %source.display(),
                        error = %err,
                        "pdef file unreadable, skipping process"
                    );
                }
            }
        }
        None
    }
}

fn read_config(path: &Path) -> Result<Config, StoreError> {
    let text = fs::read_to_string(path).map_err(|source| StoreError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    Config::parse(&text).map_err(|source| StoreError::InvalidConf {
        path: path.to_path_buf(),
        source,
    })
}

/// Apply the error taxonomy for one config file read.
///
/// Unreadable files are benign races: that single contribution is skipped.
/// Invalid JSON poisons the process name for the whole call; a process with
/// a broken configuration must never be launched on stale or partial state.
fn handle_config_error(err: StoreError, name: &str, invalid: &mut BTreeSet<String>) {
    match err {
        StoreError::Unreadable { .. } => {
            warn!(
                process = %name,
                error = %err,
                "config file unreadable (likely vanished since listing), skipping contribution"
            );
        }
        _ => {
            error!(process = %name, error = %err, "invalid conf file, excluding process");
            invalid.insert(name.to_string());
        }
    }
}
