// src/store/scan.rs

//! Trigger file scanner: classify the contents of one process directory.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

const PDEF_SUFFIX: &str = ".pdef";
const CONF_SUFFIX: &str = ".conf";
const MERGE_CONF_SUFFIX: &str = ".merge_conf";
const DISABLE_SUFFIX: &str = ".disable";

/// The trigger-scoped files of one directory, grouped by process name.
///
/// The process name is the file name with the `<trigger>.` prefix and the
/// recognised extension stripped.
#[derive(Debug, Clone, Default)]
pub struct TriggerFiles {
    /// `<trigger>.<name>.pdef` files.
    pub definitions: BTreeMap<String, PathBuf>,

    /// `<trigger>.<name>.conf` files.
    pub base_configs: BTreeMap<String, PathBuf>,

    /// `<trigger>.<name>.merge_conf` files, sorted lexicographically by
    /// file name. Deterministic by construction; the raw directory listing
    /// order is never exposed.
    pub merge_configs: BTreeMap<String, Vec<PathBuf>>,

    /// Process names with a `<trigger>.<name>.disable` marker.
    pub disabled: BTreeSet<String>,
}

/// List `directory` (non-recursively) and classify every entry whose name
/// begins with `<trigger>.`.
///
/// Classification is by file name only; no file content or metadata is read
/// here. An entry that turns out not to be a regular file fails later at read
/// time and is handled as a benign race.
pub fn scan(directory: &Path, trigger: &str) -> TriggerFiles {
    let mut files = TriggerFiles::default();

    let entries = match fs::read_dir(directory) {
        Ok(entries) => entries,
        Err(err) => {
            warn!(
                dir = %directory.display(),
                error = %err,
                "cannot list process directory, treating as empty"
            );
            return files;
        }
    };

    let prefix = format!("{trigger}.");
    let mut names: Vec<String> = entries
        .filter_map(|entry| match entry {
            Ok(entry) => entry.file_name().into_string().ok(),
            Err(err) => {
                warn!(dir = %directory.display(), error = %err, "unreadable directory entry");
                None
            }
        })
        .collect();
    names.sort();

    for file_name in names {
        let Some(rest) = file_name.strip_prefix(&prefix) else {
            continue;
        };
        let path = directory.join(&file_name);

        if let Some(name) = rest.strip_suffix(MERGE_CONF_SUFFIX) {
            files
                .merge_configs
                .entry(name.to_string())
                .or_default()
                .push(path);
        } else if let Some(name) = rest.strip_suffix(PDEF_SUFFIX) {
            files.definitions.insert(name.to_string(), path);
        } else if let Some(name) = rest.strip_suffix(CONF_SUFFIX) {
            files.base_configs.insert(name.to_string(), path);
        } else if let Some(name) = rest.strip_suffix(DISABLE_SUFFIX) {
            files.disabled.insert(name.to_string());
        } else {
            debug!(
                dir = %directory.display(),
                file = %file_name,
                trigger,
                "ignoring trigger file with unrecognised suffix"
            );
        }
    }

    files
}
