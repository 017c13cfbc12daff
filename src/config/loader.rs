// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::debug;

use crate::config::model::SettingsFile;

/// Environment variable naming the store root.
pub const ENV_STORE_ROOT: &str = "PROCSTORE_ROOT";

/// Load a settings file from a given path and return the raw `SettingsFile`.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<SettingsFile> {
    let path = path.as_ref();
    let contents =
        fs::read_to_string(path).with_context(|| format!("reading settings file at {:?}", path))?;

    let settings: SettingsFile = toml::from_str(&contents)
        .with_context(|| format!("parsing TOML settings from {:?}", path))?;

    Ok(settings)
}

/// Resolve the store root directory used by all commands.
///
/// Resolution order:
/// 1. `--store-root` CLI flag
/// 2. `PROCSTORE_ROOT` environment variable
/// 3. `[store] root` in the settings file (if the file exists)
///
/// The settings file is optional; failing to find a root through any source
/// is an operator error.
pub fn resolve_store_root(flag: Option<&str>, settings_path: &Path) -> Result<PathBuf> {
    if let Some(dir) = flag {
        debug!(dir, "store root from --store-root flag");
        return check_store_root(Path::new(dir));
    }

    if let Ok(dir) = std::env::var(ENV_STORE_ROOT) {
        let dir = dir.trim().to_string();
        if !dir.is_empty() {
            debug!(dir, "store root from {} environment variable", ENV_STORE_ROOT);
            return check_store_root(Path::new(&dir));
        }
    }

    if settings_path.exists() {
        let settings = load_from_path(settings_path)?;
        if let Some(dir) = settings.store.root {
            debug!(dir, settings = ?settings_path, "store root from settings file");
            return check_store_root(Path::new(&dir));
        }
    }

    bail!(
        "no store root configured: pass --store-root, set {}, or add [store] root to {:?}",
        ENV_STORE_ROOT,
        settings_path
    )
}

fn check_store_root(dir: &Path) -> Result<PathBuf> {
    if !dir.is_dir() {
        bail!("store root {:?} is not a directory", dir);
    }
    Ok(dir.to_path_buf())
}

/// Helper to resolve a default settings path.
///
/// Currently this just returns `Procstore.toml` in the current working
/// directory.
pub fn default_settings_path() -> PathBuf {
    PathBuf::from("Procstore.toml")
}
