//! LOCKED -> UNLOCKED.

use super::{LockController, OpResponse, log_script_output, parse_failure};
use crate::events::{Event, EventAction};
use crate::scripts::{ScriptOutput, ScriptRunner};

impl<R: ScriptRunner> LockController<R> {
    /// Release the lock.
    ///
    /// When memory holds no SSID the state file is consulted, so a lock left
    /// behind by a crashed process can still be released. Without an SSID from
    /// either source the unlock script is never run.
    pub fn unlock(&mut self) -> OpResponse {
        let (is_locked, target) = self.unlock_target();
        let response = self.unlock_inner(is_locked, target.as_deref());
        self.record(
            Event::new(EventAction::Unlock, response.success, &response.message)
                .with_ssid(target.as_deref()),
        );
        response
    }

    /// Reconcile memory with disk: (locked, ssid to release).
    fn unlock_target(&self) -> (bool, Option<String>) {
        let mut is_locked = self.state.locked;
        let mut target = self.state.locked_ssid().map(str::to_string);

        if target.is_none() && self.store.exists() {
            match self.store.read() {
                Ok(Some(disk)) => {
                    log::info!("Loaded lock state from file for unlock: {}", disk);
                    is_locked = is_locked || disk.locked;
                    target = disk.locked_ssid().map(str::to_string);
                }
                Ok(None) => {}
                Err(e) => log::error!("Error reading state file during unlock: {}", e),
            }
        }

        (is_locked, target)
    }

    fn unlock_inner(&mut self, is_locked: bool, target: Option<&str>) -> OpResponse {
        if !is_locked {
            log::info!("Unlock requested but WiFi is not locked (checked memory and file)");
            return OpResponse::failure("WiFi not locked");
        }

        let Some(ssid) = target else {
            log::error!("Unlock requested but no SSID found in state");
            return OpResponse::failure("Cannot unlock: Locked SSID not found.");
        };

        log::info!("Unlocking WiFi from BSSID lock for SSID: {}", ssid);
        let output = match self.runner.invoke_unlock(ssid, None) {
            Ok(output) => output,
            Err(e) => {
                log::error!("Exception while unlocking WiFi: {}", e);
                return OpResponse::failure(format!("Exception: {}", e));
            }
        };
        log_script_output("Unlock", &output);

        if let Some(failure) = interpret_unlock(ssid, &output) {
            return failure;
        }

        log::info!("WiFi unlocked for SSID: {}", ssid);
        self.state.clear();
        self.forget_persisted();

        OpResponse::success(format!("WiFi unlocked from {}", ssid))
    }
}

/// Check an unlock script's output against `target`. `None` means the unlock
/// succeeded.
fn interpret_unlock(target: &str, output: &ScriptOutput) -> Option<OpResponse> {
    if !output.exited_ok() {
        // A script that fails loudly may still have printed a JSON report.
        let reported = output
            .parse()
            .ok()
            .and_then(|r| r.error_message().map(str::to_string));
        let detail = reported.unwrap_or_else(|| match output.stderr.trim() {
            "" => format!("Unlock script failed with {}", output.exit_description()),
            stderr => stderr.to_string(),
        });
        log::error!("Error running unlock script: {}", detail);
        return Some(OpResponse::failure(format!("Error: {}", detail)));
    }

    let report = match output.parse() {
        Ok(report) => report,
        Err(e) => return Some(parse_failure("unlock", &e, output)),
    };

    if let Some(message) = report.error_message() {
        log::error!("Unlock script reported message: {}", message);
        return Some(OpResponse::failure(message));
    }

    if !report.success {
        log::error!(
            "Unlock script reported failure for SSID: {}",
            report.ssid.as_deref().unwrap_or("<none>")
        );
        return Some(OpResponse::failure(
            "Failed to unlock WiFi. Script reported failure.",
        ));
    }

    if report.ssid.as_deref() != Some(target) {
        log::error!(
            "Unlock script success mismatch: expected {}, got {}",
            target,
            report.ssid.as_deref().unwrap_or("<none>")
        );
        return Some(OpResponse::failure("Unlock state mismatch. Check logs."));
    }

    None
}
