//! Config struct definition and default implementation.

use crate::events::DEFAULT_JOURNAL_MAX_BYTES;
use serde::Deserialize;
use std::path::PathBuf;

/// Configuration for wifilock.
///
/// This struct represents the contents of `<settings_dir>/config.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Scripts
    // =========================================================================
    /// Lock script path. Defaults to `<plugin_dir>/assets/lock_wifi.sh`.
    pub lock_script: Option<PathBuf>,

    /// Unlock script path. Defaults to `<plugin_dir>/assets/unlock_wifi.sh`.
    pub unlock_script: Option<PathBuf>,

    /// Clear `LD_LIBRARY_PATH` for script subprocesses.
    ///
    /// The host runtime injects its bundled libraries through this variable,
    /// which breaks system tools the scripts call.
    #[serde(default = "default_true")]
    pub clear_library_path: bool,

    // =========================================================================
    // State
    // =========================================================================
    /// File name of the lock state file inside the runtime directory.
    #[serde(default = "default_state_file_name")]
    pub state_file_name: String,

    /// Previous runtime directory to migrate the state file from.
    pub legacy_runtime_dir: Option<PathBuf>,

    /// Append operation outcomes to `events.ndjson` in the runtime directory.
    #[serde(default = "default_true")]
    pub journal: bool,

    /// Rotate the journal once it reaches this many bytes; `0` never rotates.
    #[serde(default = "default_journal_max_bytes")]
    pub journal_max_bytes: u64,

    // =========================================================================
    // Force reset
    // =========================================================================
    /// Seconds to wait for the unlock script during a forced reset.
    #[serde(default = "default_force_reset_timeout_secs")]
    pub force_reset_timeout_secs: u64,

    /// Report a forced reset as failed when a recorded lock could not be
    /// released by the unlock script. State is cleared either way.
    #[serde(default = "default_true")]
    pub force_reset_requires_unlock: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lock_script: None,
            unlock_script: None,
            clear_library_path: true,
            state_file_name: default_state_file_name(),
            legacy_runtime_dir: None,
            journal: true,
            journal_max_bytes: default_journal_max_bytes(),
            force_reset_timeout_secs: default_force_reset_timeout_secs(),
            force_reset_requires_unlock: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_journal_max_bytes() -> u64 {
    DEFAULT_JOURNAL_MAX_BYTES
}

fn default_state_file_name() -> String {
    "wifi_lock_state.json".to_string()
}

fn default_force_reset_timeout_secs() -> u64 {
    10
}
