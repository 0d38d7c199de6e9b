//! Install path resolution for wifilock.
//!
//! The embedding host tells the plugin where it lives through environment
//! variables. Every wifilock command resolves its paths through this module so
//! the CLI, the `serve` loop and the lifecycle hooks agree on where the
//! scripts, the state file and the settings are.
//!
//! Priority for each directory: explicit override (CLI flag) > host env var >
//! built-in default.

use crate::error::{Result, WifiLockError};
use std::env;
use std::path::{Path, PathBuf};

/// Host variable naming the packaged plugin directory.
pub const PLUGIN_DIR_ENV: &str = "DECKY_PLUGIN_DIR";

/// Host variable naming the writable runtime directory.
pub const RUNTIME_DIR_ENV: &str = "DECKY_PLUGIN_RUNTIME_DIR";

/// Host variable naming the settings directory.
pub const SETTINGS_DIR_ENV: &str = "DECKY_PLUGIN_SETTINGS_DIR";

/// Application directory name used under XDG defaults.
pub const APP_DIR_NAME: &str = "wifilock";

/// Directory under the plugin dir holding packaged scripts.
pub const ASSETS_DIR: &str = "assets";

/// Marker directory present only for manual (non-store) installs.
pub const DEFAULTS_DIR: &str = "defaults";

/// Script that pins the interface to the current BSSID.
pub const LOCK_SCRIPT_NAME: &str = "lock_wifi.sh";

/// Script that releases the pin for a given SSID.
pub const UNLOCK_SCRIPT_NAME: &str = "unlock_wifi.sh";

/// Config file name inside the settings directory.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Journal file name inside the runtime directory.
pub const EVENTS_FILE_NAME: &str = "events.ndjson";

/// Explicit directory overrides, typically from CLI flags.
#[derive(Debug, Clone, Default)]
pub struct PathOverrides {
    pub plugin_dir: Option<PathBuf>,
    pub runtime_dir: Option<PathBuf>,
    pub settings_dir: Option<PathBuf>,
}

/// Resolved directories for one plugin install. All paths are absolute.
#[derive(Debug, Clone)]
pub struct PluginContext {
    /// Packaged plugin directory (scripts live under `assets/`).
    pub plugin_dir: PathBuf,

    /// Writable per-install directory for the state file and journal.
    pub runtime_dir: PathBuf,

    /// Directory holding `config.yaml`.
    pub settings_dir: PathBuf,
}

impl PluginContext {
    /// Resolve paths from overrides, the host environment and defaults.
    pub fn resolve(overrides: &PathOverrides) -> Result<Self> {
        let cwd = env::current_dir().map_err(|e| {
            WifiLockError::UserError(format!("failed to get current working directory: {}", e))
        })?;

        let plugin_dir = overrides
            .plugin_dir
            .clone()
            .or_else(|| env_path(PLUGIN_DIR_ENV))
            .unwrap_or_else(|| cwd.clone());

        let runtime_dir = match overrides.runtime_dir.clone().or_else(|| env_path(RUNTIME_DIR_ENV)) {
            Some(dir) => dir,
            None => default_dir(dirs::data_local_dir(), "runtime")?,
        };

        let settings_dir = match overrides
            .settings_dir
            .clone()
            .or_else(|| env_path(SETTINGS_DIR_ENV))
        {
            Some(dir) => dir,
            None => default_dir(dirs::config_dir(), "settings")?,
        };

        Ok(Self {
            plugin_dir: absolutize(&cwd, plugin_dir),
            runtime_dir: absolutize(&cwd, runtime_dir),
            settings_dir: absolutize(&cwd, settings_dir),
        })
    }

    /// Build a context rooted at explicit directories (used by tests and hosts
    /// that already know their layout).
    pub fn from_dirs(plugin_dir: PathBuf, runtime_dir: PathBuf, settings_dir: PathBuf) -> Self {
        Self {
            plugin_dir,
            runtime_dir,
            settings_dir,
        }
    }

    /// Directory holding the packaged scripts.
    pub fn assets_dir(&self) -> PathBuf {
        self.plugin_dir.join(ASSETS_DIR)
    }

    /// Manual-install marker directory.
    pub fn defaults_dir(&self) -> PathBuf {
        self.plugin_dir.join(DEFAULTS_DIR)
    }

    /// Default lock script location.
    pub fn default_lock_script(&self) -> PathBuf {
        self.assets_dir().join(LOCK_SCRIPT_NAME)
    }

    /// Default unlock script location.
    pub fn default_unlock_script(&self) -> PathBuf {
        self.assets_dir().join(UNLOCK_SCRIPT_NAME)
    }

    /// Path of the config file.
    pub fn config_path(&self) -> PathBuf {
        self.settings_dir.join(CONFIG_FILE_NAME)
    }

    /// Path of the operation journal.
    pub fn events_path(&self) -> PathBuf {
        self.runtime_dir.join(EVENTS_FILE_NAME)
    }
}

fn env_path(name: &str) -> Option<PathBuf> {
    env::var_os(name)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn default_dir(base: Option<PathBuf>, what: &str) -> Result<PathBuf> {
    base.map(|b| b.join(APP_DIR_NAME)).ok_or_else(|| {
        WifiLockError::UserError(format!(
            "cannot determine a default {} directory; pass it explicitly",
            what
        ))
    })
}

fn absolutize(cwd: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}
