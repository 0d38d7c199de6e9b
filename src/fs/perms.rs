//! Script file installation helpers.

use crate::error::{Result, WifiLockError};
use std::fs;
use std::path::Path;

/// Mode applied to installed scripts (rwxr-xr-x).
pub const SCRIPT_MODE: u32 = 0o755;

/// Mark `path` as executable with [`SCRIPT_MODE`].
#[cfg(unix)]
pub fn set_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(SCRIPT_MODE)).map_err(|e| {
        WifiLockError::UserError(format!(
            "failed to make '{}' executable: {}",
            path.display(),
            e
        ))
    })
}

#[cfg(not(unix))]
pub fn set_executable(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(WifiLockError::UserError(format!(
            "script '{}' does not exist",
            path.display()
        )))
    }
}

/// Copy `source` over `destination`, creating the destination's parent.
pub fn copy_file(source: &Path, destination: &Path) -> Result<()> {
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            WifiLockError::UserError(format!(
                "failed to create directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    fs::copy(source, destination).map_err(|e| {
        WifiLockError::UserError(format!(
            "failed to copy '{}' to '{}': {}",
            source.display(),
            destination.display(),
            e
        ))
    })?;

    Ok(())
}
