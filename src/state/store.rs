//! On-disk storage for [`LockState`].

use super::types::LockState;
use crate::error::{Result, WifiLockError};
use crate::fs::atomic_write_file;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Owns the lock state file.
///
/// [`load`](Self::load) never fails; the strict [`read`](Self::read) is for
/// recovery paths that need to tell "absent" from "corrupt".
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read the state file. `Ok(None)` when it does not exist.
    pub fn read(&self) -> Result<Option<LockState>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(WifiLockError::StateError(format!(
                    "failed to read '{}': {}",
                    self.path.display(),
                    e
                )));
            }
        };

        serde_json::from_str(&content).map(Some).map_err(|e| {
            WifiLockError::StateError(format!(
                "failed to parse '{}': {}",
                self.path.display(),
                e
            ))
        })
    }

    /// Read the state file, treating absence and any failure as unlocked.
    ///
    /// A file that records a lock without an SSID is loaded as unlocked and
    /// left on disk for a forced reset to clear.
    pub fn load(&self) -> LockState {
        match self.read() {
            Ok(Some(state)) => {
                if state.locked && state.locked_ssid().is_none() {
                    log::warn!(
                        "State file {} records a lock without an SSID; treating as unlocked (run force-reset to clear it)",
                        self.path.display()
                    );
                    LockState::unlocked()
                } else if state.locked {
                    log::info!("Loaded previous lock state: {}", state);
                    state
                } else {
                    log::info!("Loaded previous state: WiFi was not locked");
                    state
                }
            }
            Ok(None) => {
                log::info!("No previous lock state file found");
                LockState::unlocked()
            }
            Err(e) => {
                log::error!("Error loading state file: {}", e);
                LockState::unlocked()
            }
        }
    }

    /// Atomically persist `state`, creating the runtime directory if needed.
    pub fn save(&self, state: &LockState) -> Result<()> {
        let json = serde_json::to_string(state).map_err(|e| {
            WifiLockError::StateError(format!("failed to serialize lock state: {}", e))
        })?;
        atomic_write_file(&self.path, &json)?;
        log::info!("Saved lock state to {}", self.path.display());
        Ok(())
    }

    /// Remove the state file. Returns whether a file was removed; absence is
    /// not an error.
    pub fn delete(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                log::info!("Deleted lock state file: {}", self.path.display());
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(WifiLockError::StateError(format!(
                "failed to delete '{}': {}",
                self.path.display(),
                e
            ))),
        }
    }
}
