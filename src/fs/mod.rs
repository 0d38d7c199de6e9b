//! Filesystem utilities for wifilock.
//!
//! Atomic writes keep the lock state file intact across crashes; the other
//! helpers support install-time migration.

pub mod atomic;
mod move_file;
mod perms;

pub use atomic::atomic_write;
pub use atomic::atomic_write_file;
pub use move_file::move_file;
pub use perms::{SCRIPT_MODE, copy_file, set_executable};
