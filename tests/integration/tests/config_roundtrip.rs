//! Config save/load roundtrip integration tests.
//!
//! These tests verify that configuration can be serialized, written to disk,
//! and loaded back with identical field values.

use oktakey_core::config::{Config, LogLevel};
use oktakey_core::BackendType;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[test]
fn test_config_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("oktakey.json5");

    let config = Config::default();
    config.save(&path).unwrap();

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.backend_type(), None);
}

#[test]
fn test_config_modify_and_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("oktakey.json5");

    let mut config = Config::default();
    config.backend = Some("file".to_string());
    config.file_dir = Some(PathBuf::from("/var/lib/oktakey/keyring"));
    config.telemetry.enabled = true;
    config.logging.level = LogLevel::Debug;
    config.save(&path).unwrap();

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.backend_type(), Some(BackendType::File));
}

#[test]
fn test_config_load_nonexistent() {
    let result = Config::load(Path::new("/nonexistent/oktakey.json5"));
    assert!(result.is_err());
}

#[test]
fn test_missing_file_means_defaults() {
    let dir = TempDir::new().unwrap();
    let loaded = Config::load_or_default(Some(&dir.path().join("absent.json5"))).unwrap();
    assert_eq!(loaded, Config::default());
}

#[test]
fn test_hand_written_json5() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("oktakey.json5");
    std::fs::write(
        &path,
        "{\n  // prefer the encrypted files\n  backend: 'file',\n  telemetry: { enabled: false, },\n}\n",
    )
    .unwrap();

    let loaded = Config::load_or_default(Some(&path)).unwrap();
    assert_eq!(loaded.backend_type(), Some(BackendType::File));
}

#[test]
fn test_unknown_backend_loads_without_selection() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("oktakey.json5");
    std::fs::write(&path, "{ backend: 'floppy' }").unwrap();

    let loaded = Config::load_or_default(Some(&path)).unwrap();
    assert_eq!(loaded.backend.as_deref(), Some("floppy"));
    assert_eq!(loaded.backend_type(), None);
}

#[test]
fn test_config_parse_invalid() {
    let result = Config::parse("not valid json");
    assert!(result.is_err());
}
