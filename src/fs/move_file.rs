//! Moving files between install directories.
//!
//! Legacy runtime data may live on a different mount than the current
//! runtime directory, in which case `rename(2)` fails with `EXDEV`. Those moves
//! fall back to an atomic copy followed by removing the source.

use crate::error::{Result, WifiLockError};
use std::fs;
use std::io;
use std::path::Path;

/// Move `source` to `destination`, creating the destination's parent.
pub fn move_file<P: AsRef<Path>, Q: AsRef<Path>>(source: P, destination: Q) -> Result<()> {
    let source = source.as_ref();
    let destination = destination.as_ref();

    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            WifiLockError::StateError(format!(
                "failed to create directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    match fs::rename(source, destination) {
        Ok(()) => Ok(()),
        Err(e) if crosses_devices(&e) => copy_then_remove(source, destination),
        Err(e) => Err(WifiLockError::StateError(format!(
            "failed to move '{}' to '{}': {}",
            source.display(),
            destination.display(),
            e
        ))),
    }
}

fn copy_then_remove(source: &Path, destination: &Path) -> Result<()> {
    let content = fs::read(source).map_err(|e| {
        WifiLockError::StateError(format!(
            "failed to read '{}' for cross-device move: {}",
            source.display(),
            e
        ))
    })?;

    crate::fs::atomic_write(destination, &content)?;

    fs::remove_file(source).map_err(|e| {
        WifiLockError::StateError(format!(
            "copied '{}' but failed to remove the original: {}",
            source.display(),
            e
        ))
    })
}

fn crosses_devices(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::CrossesDevices || err.raw_os_error() == Some(18)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn move_file_creates_destination_dirs() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("old").join("wifi_lock_state.json");
        fs::create_dir_all(source.parent().unwrap()).unwrap();
        fs::write(&source, b"{}").unwrap();

        let destination = temp.path().join("new/runtime/wifi_lock_state.json");
        move_file(&source, &destination).unwrap();

        assert!(!source.exists());
        assert_eq!(fs::read(&destination).unwrap(), b"{}");
    }

    #[test]
    fn move_file_missing_source_is_an_error() {
        let temp = TempDir::new().unwrap();
        let result = move_file(temp.path().join("absent"), temp.path().join("dest"));
        assert!(result.is_err());
    }
}
