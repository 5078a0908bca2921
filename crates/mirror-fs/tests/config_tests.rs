use mirror_fs::{ConfigStore, Error};
use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use std::fs;
use tempfile::TempDir;

#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
struct TestConfig {
    name: String,
    count: i32,
}

#[test]
fn test_load_toml() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(&path, "name = \"test\"\ncount = 42\n").unwrap();

    let config: TestConfig = ConfigStore::new().load(&path).unwrap();

    assert_eq!(
        config,
        TestConfig {
            name: "test".into(),
            count: 42
        }
    );
}

#[test]
fn test_load_invalid_toml_reports_path() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(&path, "name = \n").unwrap();

    let err = ConfigStore::new().load::<TestConfig>(&path).unwrap_err();

    assert!(matches!(err, Error::ConfigParse { .. }));
    assert!(err.to_string().contains("config.toml"));
}

#[test]
fn test_load_or_default_missing_file() {
    let temp = TempDir::new().unwrap();
    let config: TestConfig = ConfigStore::new()
        .load_or_default(&temp.path().join("absent.toml"))
        .unwrap();
    assert_eq!(config, TestConfig::default());
}

#[test]
fn test_save_then_load() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("config.toml");
    let store = ConfigStore::new();
    let original = TestConfig {
        name: "mirror".into(),
        count: 3,
    };

    store.save(&path, &original).unwrap();
    let loaded: TestConfig = store.load(&path).unwrap();

    assert_eq!(loaded, original);
}
