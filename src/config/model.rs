// src/config/model.rs

use serde::Deserialize;

/// Top-level settings as read from a TOML file.
///
/// This is a direct mapping of:
///
/// ```toml
/// [store]
/// root = "/srv/process-store"
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SettingsFile {
    /// Store location from `[store]`.
    #[serde(default)]
    pub store: StoreSection,
}

/// `[store]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct StoreSection {
    /// Filesystem root of the process store.
    ///
    /// May be omitted when the root is supplied via `--store-root` or the
    /// `PROCSTORE_ROOT` environment variable instead.
    #[serde(default)]
    pub root: Option<String>,
}
