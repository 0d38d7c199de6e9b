//! Responses returned to the host for lock, unlock and forced reset.

use serde::Serialize;

/// Outcome of a controller operation.
///
/// Serialized as `{"success": bool, "message": str, ...}` with absent optional
/// fields omitted, which is the shape the host UI consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bssid: Option<String>,
    /// Unparsed script stdout, included when it could not be interpreted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_output: Option<String>,
}

impl OpResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            ssid: None,
            bssid: None,
            raw_output: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            ..Self::success(message)
        }
    }

    /// Attach the network the operation concerned.
    pub fn with_network(mut self, ssid: Option<String>, bssid: Option<String>) -> Self {
        self.ssid = ssid;
        self.bssid = bssid;
        self
    }

    pub fn with_raw_output(mut self, raw: impl Into<String>) -> Self {
        self.raw_output = Some(raw.into());
        self
    }
}
