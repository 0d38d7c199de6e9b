//! Operation journal for wifilock.
//!
//! Every lock, unlock, forced reset and lifecycle hook appends one NDJSON line
//! to `<runtime_dir>/events.ndjson`. When the state file and the network
//! disagree, the journal is how you find out which script run left them that
//! way.
//!
//! # Event Format
//!
//! - `ts`: RFC3339 timestamp
//! - `action`: `lock`, `unlock`, `force_reset`, `start`, `stop`, `migrate`,
//!   `uninstall`
//! - `actor`: `user@HOST`
//! - `success`: operation outcome
//! - `ssid`: network involved, when known
//! - `message`: the message returned to the caller
//!
//! Journal writes are best-effort: a failure is logged and never changes the
//! outcome of the operation being recorded.

use crate::error::{Result, WifiLockError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Actions recorded in the journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    Lock,
    Unlock,
    ForceReset,
    Start,
    Stop,
    Migrate,
    Uninstall,
}

impl std::fmt::Display for EventAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EventAction::Lock => "lock",
            EventAction::Unlock => "unlock",
            EventAction::ForceReset => "force_reset",
            EventAction::Start => "start",
            EventAction::Stop => "stop",
            EventAction::Migrate => "migrate",
            EventAction::Uninstall => "uninstall",
        };
        f.write_str(s)
    }
}

/// One journal record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub ts: DateTime<Utc>,
    pub action: EventAction,
    pub actor: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssid: Option<String>,
    #[serde(default)]
    pub message: String,
}

impl Event {
    /// Create an event stamped with the current time and actor.
    pub fn new(action: EventAction, success: bool, message: impl Into<String>) -> Self {
        Self {
            ts: Utc::now(),
            action,
            actor: actor_string(),
            success,
            ssid: None,
            message: message.into(),
        }
    }

    /// Attach the SSID involved.
    pub fn with_ssid(mut self, ssid: Option<&str>) -> Self {
        self.ssid = ssid.map(str::to_string);
        self
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {:<11} {:<4} {}",
            self.ts.format("%Y-%m-%d %H:%M:%S"),
            self.action.to_string(),
            if self.success { "ok" } else { "FAIL" },
            self.message
        )?;
        if let Some(ssid) = &self.ssid {
            write!(f, " [{}]", ssid)?;
        }
        Ok(())
    }
}

fn actor_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}

/// Journal size at which it is rotated to `events.ndjson.1`.
pub const DEFAULT_JOURNAL_MAX_BYTES: u64 = 1024 * 1024;

/// Appends events to a journal file.
///
/// The journal keeps at most two generations: once the current file reaches
/// `max_bytes` it replaces the previous generation before the next append.
#[derive(Debug, Clone)]
pub struct Journal {
    path: PathBuf,
    enabled: bool,
    max_bytes: u64,
}

impl Journal {
    pub fn new(path: impl Into<PathBuf>, enabled: bool) -> Self {
        Self {
            path: path.into(),
            enabled,
            max_bytes: DEFAULT_JOURNAL_MAX_BYTES,
        }
    }

    /// A journal that records nothing.
    pub fn disabled() -> Self {
        Self::new(PathBuf::new(), false)
    }

    /// Rotation threshold in bytes; `0` disables rotation.
    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Append `event`, logging instead of failing.
    pub fn record(&self, event: Event) {
        if !self.enabled {
            return;
        }
        if let Err(e) = rotate_if_needed(&self.path, self.max_bytes) {
            log::warn!("Failed to rotate journal: {}", e);
        }
        if let Err(e) = append_event(&self.path, &event) {
            log::warn!("Failed to record {} event: {}", event.action, e);
        }
    }
}

/// The previous journal generation for `path` (`events.ndjson.1`).
pub fn rotated_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".1");
    path.with_file_name(name)
}

/// Move `path` to its rotated name once it holds `max_bytes` or more.
///
/// Returns whether the journal was rotated. A `max_bytes` of `0` never
/// rotates.
pub fn rotate_if_needed(path: &Path, max_bytes: u64) -> Result<bool> {
    if max_bytes == 0 {
        return Ok(false);
    }

    let len = match fs::metadata(path) {
        Ok(meta) => meta.len(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => {
            return Err(WifiLockError::StateError(format!(
                "failed to stat journal '{}': {}",
                path.display(),
                e
            )));
        }
    };
    if len < max_bytes {
        return Ok(false);
    }

    let rotated = rotated_path(path);
    fs::rename(path, &rotated).map_err(|e| {
        WifiLockError::StateError(format!(
            "failed to rotate journal '{}' to '{}': {}",
            path.display(),
            rotated.display(),
            e
        ))
    })?;
    log::info!("Rotated journal {} ({} bytes)", path.display(), len);
    Ok(true)
}

/// Append `event` as one JSON line, creating the file and its directory.
pub fn append_event(path: &Path, event: &Event) -> Result<()> {
    let line = serde_json::to_string(event)
        .map_err(|e| WifiLockError::StateError(format!("failed to serialize event: {}", e)))?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| {
            WifiLockError::StateError(format!(
                "failed to create journal directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            WifiLockError::StateError(format!(
                "failed to open journal '{}': {}",
                path.display(),
                e
            ))
        })?;

    writeln!(file, "{}", line).map_err(|e| {
        WifiLockError::StateError(format!(
            "failed to write journal '{}': {}",
            path.display(),
            e
        ))
    })
}

/// Read the last `limit` events (all when `None`), oldest first.
///
/// The rotated generation is read before the current file. Lines that fail
/// to parse are skipped with a warning; a missing journal is empty.
pub fn read_events(path: &Path, limit: Option<usize>) -> Result<Vec<Event>> {
    let mut events: Vec<Event> = Vec::new();
    for file in [rotated_path(path), path.to_path_buf()] {
        let Some(content) = read_journal_file(&file)? else {
            continue;
        };
        for (lineno, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str(line) {
                Ok(event) => events.push(event),
                Err(e) => log::warn!(
                    "Skipping {} line {}: {}",
                    file.display(),
                    lineno + 1,
                    e
                ),
            }
        }
    }

    if let Some(limit) = limit
        && events.len() > limit
    {
        events.drain(..events.len() - limit);
    }

    Ok(events)
}

fn read_journal_file(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(WifiLockError::StateError(format!(
            "failed to read journal '{}': {}",
            path.display(),
            e
        ))),
    }
}
