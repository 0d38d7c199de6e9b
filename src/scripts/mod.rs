//! External lock/unlock scripts.
//!
//! The OS-level work lives in two shell scripts that report back as JSON on
//! stdout:
//!
//! - `lock_wifi.sh` (no arguments): `{"success": bool, "ssid": str, "bssid": str}`
//! - `unlock_wifi.sh <ssid>`: `{"success": bool, "ssid": str, "message"?: str}`
//!
//! Both run with `LD_LIBRARY_PATH` cleared, because the host runtime leaks its
//! bundled library path into child processes.

mod executor;
mod runner;
mod types;

pub use executor::{ExecOptions, LIBRARY_PATH_VAR, run_script};
pub use runner::{ScriptRunner, SubprocessRunner};
pub use types::{ScriptOutput, ScriptResult};
