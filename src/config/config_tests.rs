use super::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_empty_toml_produces_defaults() {
    let cfg: UserConfig = toml::from_str("").expect("Should parse empty TOML");
    assert_eq!(cfg, UserConfig::default());
    assert!(cfg.store.data_dir.is_none());
    assert!(cfg.server.addr.is_none());
}

#[test]
fn test_full_config() {
    let toml_str = "[store]\ndata_dir = \"/srv/links\"\n\n[server]\naddr = \"0.0.0.0:8080\"\n";
    let cfg: UserConfig = toml::from_str(toml_str).expect("Should parse config");
    assert_eq!(cfg.store.data_dir, Some(PathBuf::from("/srv/links")));
    assert_eq!(cfg.server.addr.as_deref(), Some("0.0.0.0:8080"));
}

#[test]
fn test_unknown_field_rejected() {
    let result: Result<UserConfig, _> = toml::from_str("[store]\ndatadir = \"/x\"\n");
    assert!(result.is_err());
}

#[test]
fn test_load_missing_file_gives_defaults() {
    let dir = tempdir().expect("tempdir");
    let cfg = load_config_from(&dir.path().join("config.toml")).expect("defaults");
    assert_eq!(cfg, UserConfig::default());
}

#[test]
fn test_load_from_file() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    fs::write(&path, "# linkshelf config\n\n[server]\naddr = \"127.0.0.1:9000\"\n").expect("write");
    let cfg = load_config_from(&path).expect("parse config");
    assert_eq!(cfg.server.addr.as_deref(), Some("127.0.0.1:9000"));
}

#[test]
fn test_load_invalid_file() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    fs::write(&path, "[server\n").expect("write");
    assert!(matches!(load_config_from(&path), Err(ConfigError::Toml(_))));
}

#[test]
fn test_default_dirs() {
    assert!(default_data_dir().ends_with(".linkshelf/data"));
    assert!(default_log_dir().ends_with(".linkshelf/logs"));
}
