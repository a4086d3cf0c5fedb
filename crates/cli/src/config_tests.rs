// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use tempfile::TempDir;

#[test]
fn init_and_load_config() {
    let temp = TempDir::new().unwrap();
    let work_dir = init_work_dir(temp.path(), None).unwrap();

    assert_eq!(work_dir, temp.path().join(".outbox"));
    let config = Config::load(&work_dir).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn init_with_remote() {
    let temp = TempDir::new().unwrap();
    let remote = RemoteConfig::new("ws://localhost:7890").unwrap();
    let work_dir = init_work_dir(temp.path(), Some(remote.clone())).unwrap();

    let config = Config::load(&work_dir).unwrap();
    assert_eq!(config.remote, Some(remote));
}

#[test]
fn already_initialized() {
    let temp = TempDir::new().unwrap();
    init_work_dir(temp.path(), None).unwrap();

    let err = init_work_dir(temp.path(), None).unwrap_err();
    assert!(err.to_string().contains("already initialized"));
}

#[test]
fn init_reuses_empty_outbox_dir() {
    let temp = TempDir::new().unwrap();
    let work_dir = temp.path().join(".outbox");
    std::fs::create_dir_all(&work_dir).unwrap();

    init_work_dir(temp.path(), None).unwrap();
    assert!(work_dir.join("config.toml").exists());
}

#[test]
fn load_missing_file() {
    let temp = TempDir::new().unwrap();
    let err = Config::load(temp.path()).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn load_invalid_toml() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("config.toml"), "max_attempts = [").unwrap();

    let err = Config::load(temp.path()).unwrap_err();
    assert!(err.to_string().contains("failed to parse config"));
}

#[test]
fn load_rejects_non_websocket_remote() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("config.toml"),
        "[remote]\nurl = \"http://localhost:7890\"\n",
    )
    .unwrap();

    let err = Config::load(temp.path()).unwrap_err();
    assert!(matches!(err, Error::InvalidRemoteUrl(_)));
}

#[test]
fn remote_defaults() {
    let config: Config = toml::from_str("[remote]\nurl = \"ws://relay:1\"\n").unwrap();
    let remote = config.remote.unwrap();

    assert_eq!(remote.probe_interval(), Duration::from_millis(2000));
    assert_eq!(remote.probe_timeout(), Duration::from_millis(500));
    assert_eq!(remote.commit_timeout(), Duration::from_millis(5000));
    assert_eq!(config.max_attempts, 0);
}

#[test]
fn parse_full_config() {
    let toml_str = r#"
max_attempts = 3

[remote]
url = "wss://relay.example.com/sync"
probe_interval_ms = 100
probe_timeout_ms = 50
commit_timeout_ms = 250
"#;
    let config: Config = toml::from_str(toml_str).unwrap();

    assert_eq!(config.engine_config().max_attempts, 3);
    let remote = config.require_remote().unwrap();
    assert_eq!(remote.url, "wss://relay.example.com/sync");
    assert_eq!(remote.probe_interval_ms, 100);
    assert_eq!(remote.probe_timeout_ms, 50);
    assert_eq!(remote.commit_timeout_ms, 250);
}

#[test]
fn local_only_config_has_no_remote() {
    let config = Config::default();
    assert!(matches!(config.require_remote(), Err(Error::NoRemote)));

    let serialized = toml::to_string_pretty(&config).unwrap();
    assert!(!serialized.contains("remote"));
}

#[test]
fn save_and_reload() {
    let temp = TempDir::new().unwrap();
    let config = Config {
        max_attempts: 5,
        remote: Some(RemoteConfig::new("ws://127.0.0.1:9").unwrap()),
    };
    config.save(temp.path()).unwrap();

    assert_eq!(Config::load(temp.path()).unwrap(), config);
}

#[test]
fn remote_config_rejects_bad_url() {
    assert!(matches!(
        RemoteConfig::new("localhost:7890"),
        Err(Error::InvalidRemoteUrl(_))
    ));
}
