//! Atomic file writes.
//!
//! The lock state file must never be observed half-written: a torn file would
//! be read back as "not locked" on the next start and the OS-level pin would
//! stay engaged with nothing left to release it.
//!
//! Every write goes through the same sequence:
//! 1. write the bytes to `.{filename}.tmp` next to the target
//! 2. fsync the temporary file
//! 3. rename it over the target and fsync the directory
//!
//! Rename is only atomic within one filesystem, which holds because the
//! temporary file lives in the target's directory. A crash between steps 1
//! and 3 can leave the `.tmp` file behind; the next write truncates it.

use crate::error::{Result, WifiLockError};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Atomically replace `path` with `content`, creating parent directories.
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| {
            WifiLockError::StateError(format!(
                "failed to create directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp_path = temp_path_for(path)?;
    write_synced(&temp_path, content)?;
    replace(&temp_path, path)
}

/// String convenience wrapper around [`atomic_write`].
pub fn atomic_write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    atomic_write(path, content.as_bytes())
}

fn temp_path_for(target: &Path) -> Result<PathBuf> {
    let filename = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            WifiLockError::StateError(format!("invalid file path '{}'", target.display()))
        })?;

    let parent = target.parent().unwrap_or(Path::new("."));
    Ok(parent.join(format!(".{}.tmp", filename)))
}

fn write_synced(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = File::create(path).map_err(|e| {
        WifiLockError::StateError(format!(
            "failed to create temporary file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let written = file.write_all(content).and_then(|()| file.sync_all());
    if let Err(e) = written {
        let _ = fs::remove_file(path);
        return Err(WifiLockError::StateError(format!(
            "failed to write temporary file '{}': {}",
            path.display(),
            e
        )));
    }

    Ok(())
}

fn replace(source: &Path, target: &Path) -> Result<()> {
    if let Err(e) = fs::rename(source, target) {
        let _ = fs::remove_file(source);
        return Err(WifiLockError::StateError(format!(
            "failed to replace '{}': {}",
            target.display(),
            e
        )));
    }

    // Persist the directory entry too; failure here is not fatal.
    #[cfg(unix)]
    if let Some(parent) = target.parent()
        && let Ok(dir) = File::open(parent)
    {
        let _ = dir.sync_all();
    }

    Ok(())
}
