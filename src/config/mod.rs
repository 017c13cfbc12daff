// src/config/mod.rs

//! Settings for the `procstore` tool itself (not the process store contents).

pub mod loader;
pub mod model;

pub use loader::{default_settings_path, load_from_path, resolve_store_root};
pub use model::{SettingsFile, StoreSection};
