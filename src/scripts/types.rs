//! Script invocation results.

use serde::Deserialize;

/// Raw outcome of one script invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptOutput {
    /// Exit code (None if killed by a signal or on timeout).
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    /// Whether the process was killed for exceeding its deadline.
    pub timed_out: bool,
}

impl ScriptOutput {
    /// An output that exited with `code`.
    pub fn exited(code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code: Some(code),
            stdout: stdout.into(),
            stderr: stderr.into(),
            timed_out: false,
        }
    }

    /// Whether the script ran to completion with exit code 0.
    pub fn exited_ok(&self) -> bool {
        !self.timed_out && self.exit_code == Some(0)
    }

    /// Parse stdout as the script's JSON report.
    pub fn parse(&self) -> Result<ScriptResult, serde_json::Error> {
        serde_json::from_str(self.stdout.trim())
    }

    /// Human-readable description of how the script exited.
    pub fn exit_description(&self) -> String {
        match (self.timed_out, self.exit_code) {
            (true, _) => "timed out".to_string(),
            (false, Some(code)) => format!("exit code {}", code),
            (false, None) => "terminated by signal".to_string(),
        }
    }
}

/// The JSON report a lock/unlock script prints on stdout.
///
/// Missing fields take their defaults, so `{}` parses as a failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ScriptResult {
    #[serde(default)]
    pub success: bool,

    #[serde(default)]
    pub ssid: Option<String>,

    #[serde(default)]
    pub bssid: Option<String>,

    /// Error text reported by the script; non-empty means failure.
    #[serde(default)]
    pub message: Option<String>,
}

impl ScriptResult {
    /// The script's error message, if it reported a non-empty one.
    pub fn error_message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_lock_report() {
        let out = ScriptOutput::exited(
            0,
            "{\"success\": true, \"ssid\": \"HomeNet\", \"bssid\": \"aa:bb:cc:dd:ee:ff\"}\n",
            "",
        );
        let parsed = out.parse().unwrap();
        assert!(parsed.success);
        assert_eq!(parsed.ssid.as_deref(), Some("HomeNet"));
        assert_eq!(parsed.bssid.as_deref(), Some("aa:bb:cc:dd:ee:ff"));
        assert!(parsed.error_message().is_none());
    }

    #[test]
    fn parse_empty_object_is_failure() {
        let parsed = ScriptOutput::exited(0, "{}", "").parse().unwrap();
        assert!(!parsed.success);
    }

    #[test]
    fn parse_rejects_non_json() {
        assert!(ScriptOutput::exited(0, "nmcli: command not found", "").parse().is_err());
        assert!(ScriptOutput::exited(0, "", "").parse().is_err());
    }

    #[test]
    fn blank_message_is_not_an_error() {
        let parsed = ScriptOutput::exited(0, r#"{"success": true, "message": "  "}"#, "")
            .parse()
            .unwrap();
        assert!(parsed.error_message().is_none());

        let parsed = ScriptOutput::exited(0, r#"{"success": true, "message": "no such connection"}"#, "")
            .parse()
            .unwrap();
        assert_eq!(parsed.error_message(), Some("no such connection"));
    }

    #[test]
    fn exit_description_variants() {
        assert_eq!(ScriptOutput::exited(2, "", "").exit_description(), "exit code 2");

        let killed = ScriptOutput::default();
        assert_eq!(killed.exit_description(), "terminated by signal");

        let timed_out = ScriptOutput {
            timed_out: true,
            ..Default::default()
        };
        assert_eq!(timed_out.exit_description(), "timed out");
        assert!(!timed_out.exited_ok());
    }
}
