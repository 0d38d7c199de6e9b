//! Config loading, validation, and path helpers.

use super::model::Config;
use crate::context::PluginContext;
use crate::error::{Result, WifiLockError};
use crate::events::Journal;
use std::path::{Path, PathBuf};
use std::time::Duration;

impl Config {
    /// Load config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(WifiLockError::ConfigError)` - Read, parse, or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            WifiLockError::ConfigError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Load the config for `ctx`.
    ///
    /// An explicit path must exist. Without one, a missing
    /// `<settings_dir>/config.yaml` yields the defaults.
    pub fn load_for(ctx: &PluginContext, explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let path = ctx.config_path();
                if path.exists() {
                    Self::load(path)
                } else {
                    log::debug!("no config at {}, using defaults", path.display());
                    Ok(Self::default())
                }
            }
        }
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes to unit, not a map.
        let config: Config = if yaml.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(yaml)
                .map_err(|e| WifiLockError::ConfigError(format!("failed to parse YAML: {}", e)))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate config values.
    ///
    /// - `force_reset_timeout_secs` must be positive
    /// - `state_file_name` must be a bare, non-empty file name
    pub fn validate(&self) -> Result<()> {
        if self.force_reset_timeout_secs == 0 {
            return Err(WifiLockError::ConfigError(
                "force_reset_timeout_secs must be greater than 0".to_string(),
            ));
        }

        let name = self.state_file_name.trim();
        if name.is_empty() {
            return Err(WifiLockError::ConfigError(
                "state_file_name must not be empty".to_string(),
            ));
        }
        if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
            return Err(WifiLockError::ConfigError(format!(
                "state_file_name must be a plain file name (found '{}')",
                self.state_file_name
            )));
        }

        Ok(())
    }

    /// Effective lock script path.
    pub fn lock_script_path(&self, ctx: &PluginContext) -> PathBuf {
        self.lock_script
            .clone()
            .unwrap_or_else(|| ctx.default_lock_script())
    }

    /// Effective unlock script path.
    pub fn unlock_script_path(&self, ctx: &PluginContext) -> PathBuf {
        self.unlock_script
            .clone()
            .unwrap_or_else(|| ctx.default_unlock_script())
    }

    /// Effective state file path.
    pub fn state_file_path(&self, ctx: &PluginContext) -> PathBuf {
        ctx.runtime_dir.join(&self.state_file_name)
    }

    /// The operation journal for this install.
    pub fn journal(&self, ctx: &PluginContext) -> Journal {
        Journal::new(ctx.events_path(), self.journal).with_max_bytes(self.journal_max_bytes)
    }

    /// Forced reset unlock deadline.
    pub fn force_reset_timeout(&self) -> Duration {
        Duration::from_secs(self.force_reset_timeout_secs)
    }
}
