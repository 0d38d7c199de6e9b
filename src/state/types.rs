//! The persisted lock state.

use serde::{Deserialize, Serialize};

/// The single global Wi-Fi lock.
///
/// Serialized as `{"locked": bool, "ssid": string|null, "bssid": string|null}`.
/// A locked state always names an SSID; the BSSID is optional because the
/// lock script may not report it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockState {
    #[serde(default)]
    pub locked: bool,

    #[serde(default)]
    pub ssid: Option<String>,

    #[serde(default)]
    pub bssid: Option<String>,
}

impl LockState {
    /// The unlocked state.
    pub fn unlocked() -> Self {
        Self::default()
    }

    /// A locked state pinned to `ssid` (and `bssid` when known).
    pub fn locked(ssid: impl Into<String>, bssid: Option<String>) -> Self {
        Self {
            locked: true,
            ssid: Some(ssid.into()),
            bssid,
        }
    }

    /// The SSID to release, if this state is locked and names one.
    pub fn locked_ssid(&self) -> Option<&str> {
        if !self.locked {
            return None;
        }
        self.ssid.as_deref().filter(|s| !s.is_empty())
    }

    /// Forget the lock.
    pub fn clear(&mut self) {
        *self = Self::unlocked();
    }
}

impl std::fmt::Display for LockState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.locked {
            return write!(f, "unlocked");
        }
        write!(
            f,
            "locked to {} ({})",
            self.ssid.as_deref().unwrap_or("<unknown ssid>"),
            self.bssid.as_deref().unwrap_or("unknown bssid")
        )
    }
}
