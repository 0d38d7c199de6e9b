//! The Wi-Fi lock controller.
//!
//! A two-state machine, UNLOCKED and LOCKED(ssid, bssid), driven entirely by
//! callers. The controller owns the in-memory [`LockState`], mirrors it to the
//! [`StateStore`], and delegates the OS-level work to a [`ScriptRunner`].
//!
//! # Guarantees
//!
//! - No operation ever returns an error: every failure becomes an
//!   [`OpResponse`] with `success: false` and a diagnostic message.
//! - Persistence failures are logged and never fail an operation, so a broken
//!   state file can't stop the user from unlocking.
//! - Every operation takes `&mut self`, so at most one transition is in flight.
//! - [`force_reset`](LockController::force_reset) always leaves the controller
//!   unlocked and removes the state file.

mod hooks;
mod lock;
mod reset;
mod response;
mod unlock;


pub use response::OpResponse;

use crate::config::Config;
use crate::context::PluginContext;
use crate::events::{Event, Journal};
use crate::scripts::{ScriptOutput, ScriptRunner, SubprocessRunner};
use crate::state::{LockState, StateStore};
use std::time::Duration;

/// Tunables for the controller.
#[derive(Debug, Clone, Copy)]
pub struct ControllerOptions {
    /// Deadline for the unlock attempt inside a forced reset.
    pub force_reset_timeout: Duration,
    /// Fail a forced reset when a recorded lock was not released.
    pub force_reset_requires_unlock: bool,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            force_reset_timeout: Duration::from_secs(10),
            force_reset_requires_unlock: true,
        }
    }
}

impl From<&Config> for ControllerOptions {
    fn from(config: &Config) -> Self {
        Self {
            force_reset_timeout: config.force_reset_timeout(),
            force_reset_requires_unlock: config.force_reset_requires_unlock,
        }
    }
}

/// Owns the single global lock.
#[derive(Debug)]
pub struct LockController<R: ScriptRunner> {
    state: LockState,
    store: StateStore,
    runner: R,
    journal: Journal,
    options: ControllerOptions,
}

impl LockController<SubprocessRunner> {
    /// Build a controller running the real scripts for this install.
    pub fn from_config(ctx: &PluginContext, config: &Config) -> Self {
        LockController::new(
            StateStore::new(config.state_file_path(ctx)),
            SubprocessRunner::from_config(ctx, config),
        )
        .with_journal(config.journal(ctx))
        .with_options(ControllerOptions::from(config))
    }
}

impl<R: ScriptRunner> LockController<R> {
    /// A controller starting UNLOCKED. Call [`on_start`](Self::on_start) to
    /// adopt the persisted state.
    pub fn new(store: StateStore, runner: R) -> Self {
        Self {
            state: LockState::unlocked(),
            store,
            runner,
            journal: Journal::disabled(),
            options: ControllerOptions::default(),
        }
    }

    pub fn with_journal(mut self, journal: Journal) -> Self {
        self.journal = journal;
        self
    }

    pub fn with_options(mut self, options: ControllerOptions) -> Self {
        self.options = options;
        self
    }

    /// Current in-memory lock state. Never touches the store or the scripts.
    pub fn status(&self) -> LockState {
        self.state.clone()
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Persist the current state, logging on failure.
    fn persist(&self) {
        if let Err(e) = self.store.save(&self.state) {
            log::error!(
                "Error saving state file ({}); WiFi is locked to {} but the lock will not survive a restart",
                e,
                self.state
            );
        }
    }

    /// Remove the state file, logging on failure.
    fn forget_persisted(&self) {
        if let Err(e) = self.store.delete() {
            log::error!(
                "Error deleting state file ({}); run force-reset to clear it",
                e
            );
        }
    }

    fn record(&self, event: Event) {
        self.journal.record(event);
    }
}

/// Log everything a script produced.
fn log_script_output(label: &str, output: &ScriptOutput) {
    log::info!("{} script {}", label, output.exit_description());
    log::info!("{} script stdout: {}", label, output.stdout.trim_end());
    if !output.stderr.trim().is_empty() {
        log::error!("{} script stderr: {}", label, output.stderr.trim_end());
    }
}

/// Failure response for stdout that isn't a JSON report.
fn parse_failure(label: &str, err: &serde_json::Error, output: &ScriptOutput) -> OpResponse {
    log::error!("Failed to parse {} script output as JSON: {}", label, err);
    let raw = output.stdout.trim();
    OpResponse::failure(format!(
        "Failed to parse script output: {}. Raw output: {}",
        err, raw
    ))
    .with_raw_output(output.stdout.clone())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
