//! The script capability used by the lock controller.

use super::executor::{ExecOptions, run_script};
use super::types::ScriptOutput;
use crate::config::Config;
use crate::context::PluginContext;
use crate::error::Result;
use std::path::PathBuf;
use std::time::Duration;

/// Invokes the external lock and unlock scripts.
///
/// Implementations only run the scripts; interpreting the output is the
/// controller's job, so a fake runner can replay canned [`ScriptOutput`]s.
pub trait ScriptRunner {
    /// Run the lock script with no arguments.
    fn invoke_lock(&self) -> Result<ScriptOutput>;

    /// Run the unlock script for `ssid`, killing it after `timeout` if given.
    fn invoke_unlock(&self, ssid: &str, timeout: Option<Duration>) -> Result<ScriptOutput>;
}

/// Runs the real scripts as subprocesses.
#[derive(Debug, Clone)]
pub struct SubprocessRunner {
    pub lock_script: PathBuf,
    pub unlock_script: PathBuf,
    pub clear_library_path: bool,
}

impl SubprocessRunner {
    pub fn from_config(ctx: &PluginContext, config: &Config) -> Self {
        Self {
            lock_script: config.lock_script_path(ctx),
            unlock_script: config.unlock_script_path(ctx),
            clear_library_path: config.clear_library_path,
        }
    }
}

impl ScriptRunner for SubprocessRunner {
    fn invoke_lock(&self) -> Result<ScriptOutput> {
        let opts = ExecOptions {
            clear_library_path: self.clear_library_path,
            timeout: None,
        };
        run_script(&self.lock_script, &[], opts)
    }

    fn invoke_unlock(&self, ssid: &str, timeout: Option<Duration>) -> Result<ScriptOutput> {
        let opts = ExecOptions {
            clear_library_path: self.clear_library_path,
            timeout,
        };
        run_script(&self.unlock_script, &[ssid], opts)
    }
}
