//! Integration tests for Settings config loading.
//!
//! These tests run without a global config (temp directories only), so they
//! test local config merging with defaults.

use std::fs;

use tempfile::TempDir;

use rstree::config::Settings;
use rstree::{ApplicationError, NodeKey};

#[test]
fn given_local_config_when_load_then_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rstree.toml");
    fs::write(
        &path,
        r#"
root_id = "origin"

[render]
marker = "> "
"#,
    )
    .unwrap();

    let settings = Settings::load(Some(&path)).expect("load settings");

    assert_eq!(settings.root_id, NodeKey::from("origin"));
    assert_eq!(settings.render.marker, "> ");
    assert_eq!(settings.render.indent, "  ", "unspecified values keep defaults");
}

#[test]
fn given_integer_root_id_when_load_then_integer_key() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rstree.toml");
    fs::write(&path, "root_id = 100\n").unwrap();

    let settings = Settings::load(Some(&path)).unwrap();

    assert_eq!(settings.root_id, NodeKey::Int(100));
}

#[test]
fn given_missing_local_config_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.toml");

    let err = Settings::load(Some(&path)).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
    assert!(err.to_string().contains("missing.toml"));
}

#[test]
fn given_malformed_local_config_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rstree.toml");
    fs::write(&path, "root_id = [1, 2]\n").unwrap();

    let err = Settings::load(Some(&path)).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
}

#[test]
fn given_template_when_written_and_loaded_then_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rstree.toml");
    fs::write(&path, Settings::template()).unwrap();

    let settings = Settings::load(Some(&path)).unwrap();

    assert_eq!(settings, Settings::default());
}
