//! Tests for config functionality.

use crate::config::Config;
use crate::context::PluginContext;
use crate::error::WifiLockError;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

fn test_context() -> PluginContext {
    PluginContext::from_dirs(
        PathBuf::from("/opt/plugin"),
        PathBuf::from("/var/lib/wifilock"),
        PathBuf::from("/etc/wifilock"),
    )
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert!(config.lock_script.is_none());
    assert!(config.unlock_script.is_none());
    assert!(config.clear_library_path);
    assert_eq!(config.state_file_name, "wifi_lock_state.json");
    assert!(config.legacy_runtime_dir.is_none());
    assert!(config.journal);
    assert_eq!(config.journal_max_bytes, 1024 * 1024);
    assert_eq!(config.force_reset_timeout_secs, 10);
    assert!(config.force_reset_requires_unlock);
}

#[test]
fn test_parse_empty_yaml_uses_defaults() {
    let config = Config::from_yaml("").unwrap();
    assert_eq!(config.force_reset_timeout_secs, 10);
    assert_eq!(config.state_file_name, "wifi_lock_state.json");
}

#[test]
fn test_parse_partial_yaml() {
    let yaml = r#"
force_reset_timeout_secs: 3
lock_script: /usr/local/bin/lock.sh
"#;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.force_reset_timeout_secs, 3);
    assert_eq!(config.lock_script, Some(PathBuf::from("/usr/local/bin/lock.sh")));
    assert!(config.unlock_script.is_none());
    assert!(config.force_reset_requires_unlock);
}

#[test]
fn test_unknown_fields_are_ignored() {
    let yaml = r#"
journal: false
some_future_option: 42
"#;
    let config = Config::from_yaml(yaml).unwrap();
    assert!(!config.journal);
}

#[test]
fn test_journal_size_cap_can_be_disabled() {
    let config = Config::from_yaml("journal_max_bytes: 0").unwrap();
    assert_eq!(config.journal_max_bytes, 0);
}

#[test]
fn test_zero_timeout_rejected() {
    let result = Config::from_yaml("force_reset_timeout_secs: 0");
    match result {
        Err(WifiLockError::ConfigError(msg)) => {
            assert!(msg.contains("force_reset_timeout_secs"));
        }
        other => panic!("expected config error, got {:?}", other),
    }
}

#[test]
fn test_state_file_name_with_separator_rejected() {
    let result = Config::from_yaml("state_file_name: ../escape.json");
    assert!(matches!(result, Err(WifiLockError::ConfigError(_))));

    let result = Config::from_yaml("state_file_name: \"  \"");
    assert!(matches!(result, Err(WifiLockError::ConfigError(_))));
}

#[test]
fn test_invalid_yaml_rejected() {
    let result = Config::from_yaml("force_reset_timeout_secs: [not a number");
    assert!(matches!(result, Err(WifiLockError::ConfigError(_))));
}

#[test]
fn test_yaml_overrides_are_parsed() {
    let yaml = "unlock_script: /srv/unlock.sh\nforce_reset_requires_unlock: false\n";
    let parsed = Config::from_yaml(yaml).unwrap();

    assert_eq!(parsed.unlock_script, Some(PathBuf::from("/srv/unlock.sh")));
    assert!(!parsed.force_reset_requires_unlock);
}

#[test]
fn test_script_paths_default_to_assets() {
    let ctx = test_context();
    let config = Config::default();

    assert_eq!(
        config.lock_script_path(&ctx),
        PathBuf::from("/opt/plugin/assets/lock_wifi.sh")
    );
    assert_eq!(
        config.unlock_script_path(&ctx),
        PathBuf::from("/opt/plugin/assets/unlock_wifi.sh")
    );
    assert_eq!(
        config.state_file_path(&ctx),
        PathBuf::from("/var/lib/wifilock/wifi_lock_state.json")
    );
    assert_eq!(config.force_reset_timeout(), Duration::from_secs(10));
}

#[test]
fn test_load_for_missing_default_path_uses_defaults() {
    let temp = TempDir::new().unwrap();
    let ctx = PluginContext::from_dirs(
        temp.path().join("plugin"),
        temp.path().join("runtime"),
        temp.path().join("settings"),
    );

    let config = Config::load_for(&ctx, None).unwrap();
    assert_eq!(config.force_reset_timeout_secs, 10);
}

#[test]
fn test_load_for_reads_settings_file() {
    let temp = TempDir::new().unwrap();
    let ctx = PluginContext::from_dirs(
        temp.path().join("plugin"),
        temp.path().join("runtime"),
        temp.path().join("settings"),
    );
    std::fs::create_dir_all(&ctx.settings_dir).unwrap();
    std::fs::write(ctx.config_path(), "force_reset_timeout_secs: 4\n").unwrap();

    let config = Config::load_for(&ctx, None).unwrap();
    assert_eq!(config.force_reset_timeout_secs, 4);
}

#[test]
fn test_load_for_explicit_missing_path_fails() {
    let temp = TempDir::new().unwrap();
    let ctx = PluginContext::from_dirs(
        temp.path().to_path_buf(),
        temp.path().to_path_buf(),
        temp.path().to_path_buf(),
    );

    let missing = temp.path().join("nope.yaml");
    let result = Config::load_for(&ctx, Some(&missing));
    assert!(matches!(result, Err(WifiLockError::ConfigError(_))));
}
