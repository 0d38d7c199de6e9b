//! UNLOCKED -> LOCKED.

use super::{LockController, OpResponse, log_script_output, non_empty, parse_failure};
use crate::events::{Event, EventAction};
use crate::scripts::ScriptRunner;
use crate::state::LockState;

impl<R: ScriptRunner> LockController<R> {
    /// Pin the interface to the currently associated access point.
    ///
    /// Already locked is a no-op failure that reports the existing lock
    /// without running any script.
    pub fn lock(&mut self) -> OpResponse {
        let response = self.lock_inner();
        self.record(
            Event::new(EventAction::Lock, response.success, &response.message)
                .with_ssid(response.ssid.as_deref()),
        );
        response
    }

    fn lock_inner(&mut self) -> OpResponse {
        if self.state.locked {
            log::info!("Lock requested but WiFi is already {}", self.state);
            return OpResponse::failure("WiFi already locked")
                .with_network(self.state.ssid.clone(), self.state.bssid.clone());
        }

        log::info!("Locking WiFi to current BSSID");
        let output = match self.runner.invoke_lock() {
            Ok(output) => output,
            Err(e) => {
                log::error!("Exception while locking WiFi: {}", e);
                return OpResponse::failure(format!("Exception: {}", e));
            }
        };
        log_script_output("Lock", &output);

        if !output.exited_ok() {
            let detail = match output.stderr.trim() {
                "" => format!("lock script failed with {}", output.exit_description()),
                stderr => stderr.to_string(),
            };
            log::error!("Error locking WiFi: {}", detail);
            return OpResponse::failure(format!("Error: {}", detail));
        }

        let report = match output.parse() {
            Ok(report) => report,
            Err(e) => return parse_failure("lock", &e, &output),
        };

        if !report.success {
            log::error!(
                "Lock script reported failure: {}",
                report.error_message().unwrap_or("no message")
            );
            return OpResponse::failure("Failed to lock WiFi. Check logs for details.");
        }

        let Some(ssid) = non_empty(report.ssid) else {
            log::error!("Lock script reported success without an SSID");
            return OpResponse::failure(
                "Lock script reported success without an SSID. Check logs for details.",
            );
        };
        let bssid = non_empty(report.bssid);

        self.state = LockState::locked(ssid.clone(), bssid.clone());
        log::info!("WiFi {}", self.state);
        self.persist();

        OpResponse::success(format!("WiFi locked to {}", ssid)).with_network(Some(ssid), bssid)
    }
}
