use std::error::Error;
use std::fs;

use procstore::config::{default_settings_path, load_from_path, resolve_store_root};
use procstore_test_utils::init_tracing;
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn settings_file_parses_store_section() -> TestResult {
    init_tracing();
    let dir = TempDir::new()?;
    let path = dir.path().join("Procstore.toml");
    fs::write(&path, "[store]\nroot = \"/srv/process-store\"\n")?;

    let settings = load_from_path(&path)?;

    assert_eq!(settings.store.root.as_deref(), Some("/srv/process-store"));
    Ok(())
}

#[test]
fn settings_sections_are_optional() -> TestResult {
    init_tracing();
    let dir = TempDir::new()?;
    let path = dir.path().join("Procstore.toml");
    fs::write(&path, "")?;

    let settings = load_from_path(&path)?;

    assert!(settings.store.root.is_none());
    Ok(())
}

#[test]
fn invalid_toml_is_an_error() -> TestResult {
    init_tracing();
    let dir = TempDir::new()?;
    let path = dir.path().join("Procstore.toml");
    fs::write(&path, "[store\nroot = ")?;

    assert!(load_from_path(&path).is_err());
    Ok(())
}

#[test]
fn flag_wins_without_any_settings_file() -> TestResult {
    init_tracing();
    let store = TempDir::new()?;
    let missing_settings = store.path().join("no-such-Procstore.toml");

    let root = resolve_store_root(store.path().to_str(), &missing_settings)?;

    assert_eq!(root, store.path());
    Ok(())
}

#[test]
fn flag_overrides_settings_file() -> TestResult {
    init_tracing();
    let store = TempDir::new()?;
    let other = TempDir::new()?;
    let settings = other.path().join("Procstore.toml");
    fs::write(
        &settings,
        format!("[store]\nroot = \"{}\"\n", other.path().display()),
    )?;

    let root = resolve_store_root(store.path().to_str(), &settings)?;

    assert_eq!(root, store.path());
    Ok(())
}

#[test]
fn settings_file_supplies_root_when_no_flag() -> TestResult {
    init_tracing();
    let store = TempDir::new()?;
    let settings_dir = TempDir::new()?;
    let settings = settings_dir.path().join("Procstore.toml");
    fs::write(
        &settings,
        format!("[store]\nroot = \"{}\"\n", store.path().display()),
    )?;

    let root = resolve_store_root(None, &settings)?;

    assert_eq!(root, store.path());
    Ok(())
}

#[test]
fn unconfigured_root_is_an_operator_error() -> TestResult {
    init_tracing();
    let dir = TempDir::new()?;
    let missing_settings = dir.path().join("no-such-Procstore.toml");

    assert!(resolve_store_root(None, &missing_settings).is_err());
    Ok(())
}

#[test]
fn nonexistent_store_root_is_rejected() -> TestResult {
    init_tracing();
    let dir = TempDir::new()?;
    let missing_settings = dir.path().join("no-such-Procstore.toml");

    assert!(resolve_store_root(Some("/no/such/store"), &missing_settings).is_err());
    Ok(())
}

#[test]
fn default_settings_path_is_cwd_local() {
    init_tracing();
    assert_eq!(default_settings_path().to_str(), Some("Procstore.toml"));
}
