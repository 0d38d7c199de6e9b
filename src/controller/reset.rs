//! Forced reset: the last-resort recovery path.
//!
//! Runs four independent steps, each logged and none able to stop the next:
//! read the state file, try the unlock script once under a deadline, delete
//! the state file, reset memory. The returned message strings the outcome of
//! each step together.

use super::{LockController, OpResponse};
use crate::events::{Event, EventAction};
use crate::scripts::ScriptRunner;
use crate::state::LockState;

/// What happened to the recorded lock during a forced reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UnlockAttempt {
    /// Nothing was recorded as locked.
    NotNeeded,
    /// A lock was recorded without an SSID to release.
    Skipped,
    Succeeded,
    Failed,
}

impl<R: ScriptRunner> LockController<R> {
    /// Clear all lock state, releasing the recorded lock if possible.
    ///
    /// Afterwards [`status`](Self::status) is unlocked and the state file is
    /// gone, whatever the unlock script did. `success` additionally requires
    /// the recorded lock to have been released unless
    /// `force_reset_requires_unlock` is off.
    pub fn force_reset(&mut self) -> OpResponse {
        log::warn!("Forcefully deleting WiFi lock state file and ensuring unlock");
        let mut fragments: Vec<String> = Vec::new();

        // 1. What does the system believe is locked?
        let recorded = self.recorded_lock();
        let target = recorded.as_ref().and_then(|s| s.locked_ssid().map(str::to_string));

        // 2. Try to release it.
        let attempt = match (&recorded, &target) {
            (None, _) => UnlockAttempt::NotNeeded,
            (Some(_), None) => {
                log::warn!("State indicated lock but SSID was missing; cannot attempt unlock");
                fragments.push("State locked but SSID missing, unlock not attempted.".to_string());
                UnlockAttempt::Skipped
            }
            (Some(_), Some(ssid)) => {
                let (attempt, fragment) = self.forced_unlock(ssid);
                fragments.push(fragment);
                attempt
            }
        };

        // 3. Remove the state file.
        let deleted = match self.store.delete() {
            Ok(true) => {
                fragments.push("Successfully deleted state file.".to_string());
                true
            }
            Ok(false) => {
                fragments.push("State file did not exist.".to_string());
                true
            }
            Err(e) => {
                log::error!("{}", e);
                fragments.push(format!("Error deleting state file: {}.", e));
                false
            }
        };

        // 4. Reset memory.
        self.state.clear();
        log::info!("In-memory lock state reset");
        fragments.push("In-memory state reset.".to_string());

        let released = matches!(attempt, UnlockAttempt::NotNeeded | UnlockAttempt::Succeeded);
        let success = deleted && (released || !self.options.force_reset_requires_unlock);
        let response = if success {
            OpResponse::success(fragments.join(" "))
        } else {
            OpResponse::failure(fragments.join(" "))
        };

        self.record(
            Event::new(EventAction::ForceReset, response.success, &response.message)
                .with_ssid(target.as_deref()),
        );
        response
    }

    /// The lock to release: the state file's, or memory's when the file is
    /// absent or unreadable (a lock whose save failed is still engaged).
    fn recorded_lock(&self) -> Option<LockState> {
        let on_disk = match self.store.read() {
            Ok(Some(state)) => Some(state),
            Ok(None) => {
                log::info!("State file did not exist");
                None
            }
            Err(e) => {
                log::error!("Error reading state file during force reset: {}", e);
                None
            }
        };

        match on_disk {
            Some(state) if state.locked => {
                log::info!("Found locked state in file: {}", state);
                Some(state)
            }
            Some(_) => {
                log::info!("State file existed but indicated WiFi was not locked");
                None
            }
            None if self.state.locked => {
                log::info!("Using in-memory lock state: {}", self.state);
                Some(self.state.clone())
            }
            None => None,
        }
    }

    fn forced_unlock(&self, ssid: &str) -> (UnlockAttempt, String) {
        log::info!("Attempting to run unlock script for SSID {} before deleting state", ssid);
        let timeout = Some(self.options.force_reset_timeout);

        let output = match self.runner.invoke_unlock(ssid, timeout) {
            Ok(output) => output,
            Err(e) => {
                log::error!("Exception running unlock script: {}", e);
                return (
                    UnlockAttempt::Failed,
                    format!("Exception running unlock script for {}: {}.", ssid, e),
                );
            }
        };
        super::log_script_output("Unlock", &output);

        if output.timed_out {
            log::error!("Unlock script timed out during force reset");
            return (
                UnlockAttempt::Failed,
                format!("Unlock script timed out for {}.", ssid),
            );
        }

        if !output.exited_ok() {
            log::error!("Unlock script execution failed ({})", output.exit_description());
            return (
                UnlockAttempt::Failed,
                format!(
                    "Unlock script failed to execute for {} ({}).",
                    ssid,
                    output.exit_description()
                ),
            );
        }

        match output.parse() {
            Ok(report) if report.success && report.error_message().is_none() => {
                log::info!("Unlock script successful for {}", ssid);
                (
                    UnlockAttempt::Succeeded,
                    format!("Successfully ran unlock command for {}.", ssid),
                )
            }
            Ok(report) => {
                let detail = report
                    .error_message()
                    .map(|m| format!(": {}", m))
                    .unwrap_or_default();
                log::warn!("Unlock script reported failure for {}{}", ssid, detail);
                (
                    UnlockAttempt::Failed,
                    format!("Unlock script reported failure for {}{}.", ssid, detail),
                )
            }
            Err(e) => {
                log::error!("Failed to parse unlock script output: {}", e);
                (
                    UnlockAttempt::Failed,
                    format!("Failed to parse unlock script output for {}.", ssid),
                )
            }
        }
    }
}
