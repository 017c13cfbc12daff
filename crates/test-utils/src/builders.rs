#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use procstore::store::ProcessStore;

/// Builder that materialises a process store tree in a temp directory.
///
/// Identifiers use the store's colon-delimited form, so test setup reads
/// like the store layout it creates:
///
/// ```no_run
/// use procstore_test_utils::builders::StoreBuilder;
///
/// let store = StoreBuilder::new();
/// store
///     .parent("Proj:Sub", "Proj")
///     .pdef("Proj:Sub", "trigger", "one", "\"X\"")
///     .conf("Proj", "trigger", "one", r#"{"k":"v"}"#);
/// ```
pub struct StoreBuilder {
    dir: TempDir,
}

impl StoreBuilder {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp store root"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn store(&self) -> ProcessStore {
        ProcessStore::new(self.root())
    }

    /// Create the directory for a project identifier (and its ancestors).
    pub fn project(&self, ident: &str) -> &Self {
        fs::create_dir_all(self.project_dir(ident)).expect("create project dir");
        self
    }

    /// Write an arbitrary file into a project directory.
    pub fn file(&self, ident: &str, file_name: &str, contents: &str) -> &Self {
        let dir = self.project_dir(ident);
        fs::create_dir_all(&dir).expect("create project dir");
        fs::write(dir.join(file_name), contents).expect("write store file");
        self
    }

    /// Write a `_parent` pointer into `ident`'s directory.
    pub fn parent(&self, ident: &str, parent_ident: &str) -> &Self {
        self.file(ident, "_parent", &format!("{parent_ident}\n"))
    }

    pub fn pdef(&self, ident: &str, trigger: &str, name: &str, text: &str) -> &Self {
        self.file(ident, &format!("{trigger}.{name}.pdef"), text)
    }

    pub fn conf(&self, ident: &str, trigger: &str, name: &str, json: &str) -> &Self {
        self.file(ident, &format!("{trigger}.{name}.conf"), json)
    }

    pub fn merge_conf(&self, ident: &str, trigger: &str, name: &str, json: &str) -> &Self {
        self.file(ident, &format!("{trigger}.{name}.merge_conf"), json)
    }

    pub fn disable(&self, ident: &str, trigger: &str, name: &str) -> &Self {
        self.file(ident, &format!("{trigger}.{name}.disable"), "")
    }

    /// Create `ident` as a symlink to `target_ident`'s directory.
    #[cfg(unix)]
    pub fn symlink_project(&self, ident: &str, target_ident: &str) -> &Self {
        let link = self.project_dir(ident);
        if let Some(parent) = link.parent() {
            fs::create_dir_all(parent).expect("create link parent dir");
        }
        std::os::unix::fs::symlink(self.project_dir(target_ident), link)
            .expect("create project symlink");
        self
    }

    pub fn project_dir(&self, ident: &str) -> PathBuf {
        ident
            .split(':')
            .filter(|seg| !seg.is_empty())
            .fold(self.dir.path().to_path_buf(), |dir, seg| dir.join(seg))
    }
}

impl Default for StoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}
