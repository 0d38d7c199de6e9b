//! Tests for the state store.

use super::*;
use crate::error::WifiLockError;
use std::fs;
use tempfile::TempDir;

fn store_in(temp: &TempDir) -> StateStore {
    StateStore::new(temp.path().join("runtime").join("wifi_lock_state.json"))
}

#[test]
fn test_load_missing_file_is_unlocked() {
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);

    assert!(!store.exists());
    assert_eq!(store.load(), LockState::unlocked());
    assert!(store.read().unwrap().is_none());
}

#[test]
fn test_save_creates_runtime_dir_and_roundtrips() {
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);
    let state = LockState::locked("HomeNet", Some("aa:bb:cc:dd:ee:ff".to_string()));

    store.save(&state).unwrap();

    assert!(store.exists());
    assert_eq!(store.load(), state);
}

#[test]
fn test_saved_file_uses_expected_json_shape() {
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);

    store.save(&LockState::locked("Cafe", None)).unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
    assert_eq!(raw["locked"], true);
    assert_eq!(raw["ssid"], "Cafe");
    assert!(raw["bssid"].is_null());
}

#[test]
fn test_load_corrupt_file_is_unlocked_but_read_errors() {
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);
    fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    fs::write(store.path(), "{not json").unwrap();

    assert_eq!(store.load(), LockState::unlocked());
    assert!(matches!(store.read(), Err(WifiLockError::StateError(_))));
}

#[test]
fn test_load_accepts_missing_fields() {
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);
    fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    fs::write(store.path(), r#"{"locked": true, "ssid": "Lab"}"#).unwrap();

    let state = store.load();
    assert!(state.locked);
    assert_eq!(state.ssid.as_deref(), Some("Lab"));
    assert!(state.bssid.is_none());
}

#[test]
fn test_load_lock_without_ssid_is_unlocked_and_file_kept() {
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);
    fs::create_dir_all(store.path().parent().unwrap()).unwrap();

    for raw in [
        r#"{"locked": true, "ssid": ""}"#,
        r#"{"locked": true, "ssid": null}"#,
        r#"{"locked": true}"#,
    ] {
        fs::write(store.path(), raw).unwrap();

        assert_eq!(store.load(), LockState::unlocked(), "{}", raw);
        assert!(store.exists());
        assert!(store.read().unwrap().unwrap().locked);
    }
}

#[test]
fn test_delete_existing_and_absent() {
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);
    store.save(&LockState::locked("HomeNet", None)).unwrap();

    assert!(store.delete().unwrap());
    assert!(!store.exists());
    assert!(!store.delete().unwrap());
}

#[test]
fn test_save_failure_is_reported() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("runtime");
    fs::write(&blocker, "a file where the runtime dir should be").unwrap();
    let store = StateStore::new(blocker.join("wifi_lock_state.json"));

    let result = store.save(&LockState::locked("HomeNet", None));
    assert!(matches!(result, Err(WifiLockError::StateError(_))));
}

#[test]
fn test_locked_ssid_requires_lock_and_name() {
    assert_eq!(LockState::locked("A", None).locked_ssid(), Some("A"));
    assert_eq!(LockState::locked("", None).locked_ssid(), None);
    assert_eq!(LockState::unlocked().locked_ssid(), None);

    let stale = LockState {
        locked: false,
        ssid: Some("A".to_string()),
        bssid: None,
    };
    assert_eq!(stale.locked_ssid(), None);
}

#[test]
fn test_clear_resets_all_fields() {
    let mut state = LockState::locked("HomeNet", Some("11:22:33:44:55:66".to_string()));
    state.clear();
    assert_eq!(state, LockState::unlocked());
}

#[test]
fn test_display() {
    assert_eq!(LockState::unlocked().to_string(), "unlocked");
    assert_eq!(
        LockState::locked("HomeNet", Some("aa:bb".to_string())).to_string(),
        "locked to HomeNet (aa:bb)"
    );
}
