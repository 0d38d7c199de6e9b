//! Line-oriented request loop for hosts that keep wifilock running.
//!
//! Requests are handled one at a time in arrival order, so operations never
//! interleave. Every request gets exactly one JSON response line.

use crate::controller::LockController;
use crate::error::{Result, WifiLockError};
use crate::scripts::ScriptRunner;
use serde::Deserialize;
use serde_json::json;
use std::io::{BufRead, Write};

/// Methods a host may call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    LockWifi,
    UnlockWifi,
    GetWifiStatus,
    ForceDeleteState,
}

impl Method {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "lock_wifi" => Some(Self::LockWifi),
            "unlock_wifi" => Some(Self::UnlockWifi),
            "get_wifi_status" => Some(Self::GetWifiStatus),
            "force_delete_state" => Some(Self::ForceDeleteState),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Request {
    method: String,
}

/// Parse one request line: a bare method name or `{"method": "..."}`.
pub fn parse_request(line: &str) -> std::result::Result<Method, String> {
    let line = line.trim();
    let name = if line.starts_with('{') {
        serde_json::from_str::<Request>(line)
            .map_err(|e| format!("Invalid request: {}", e))?
            .method
    } else {
        line.to_string()
    };

    Method::from_name(&name).ok_or_else(|| format!("Unknown method: {}", name))
}

/// Run the request loop until `input` ends.
///
/// The start hook runs before the first request. At end of input the stop
/// hook releases any lock unless `keep_lock` is set.
pub fn serve<R, I, O>(
    controller: &mut LockController<R>,
    input: I,
    mut output: O,
    keep_lock: bool,
) -> Result<()>
where
    R: ScriptRunner,
    I: BufRead,
    O: Write,
{
    controller.on_start();

    for line in input.lines() {
        let line = line.map_err(|e| WifiLockError::UserError(format!("failed to read request: {}", e)))?;
        if line.trim().is_empty() {
            continue;
        }

        let reply = match parse_request(&line) {
            Ok(method) => handle(controller, method)?,
            Err(message) => {
                log::warn!("{}", message);
                json!({ "success": false, "message": message }).to_string()
            }
        };

        writeln!(output, "{}", reply)
            .and_then(|_| output.flush())
            .map_err(|e| WifiLockError::UserError(format!("failed to write response: {}", e)))?;
    }

    if keep_lock {
        log::info!("Input closed; keeping current lock");
    } else {
        controller.on_stop();
    }
    Ok(())
}

fn handle<R: ScriptRunner>(controller: &mut LockController<R>, method: Method) -> Result<String> {
    log::debug!("Handling {:?}", method);
    match method {
        Method::LockWifi => super::to_json(&controller.lock()),
        Method::UnlockWifi => super::to_json(&controller.unlock()),
        Method::ForceDeleteState => super::to_json(&controller.force_reset()),
        Method::GetWifiStatus => super::to_json(&controller.status()),
    }
}
