//! Error types for wifilock.
//!
//! Uses thiserror for derive macros. Controller operations never surface these
//! to the host; they are turned into `{success: false, message}` responses or
//! logged. The CLI maps whatever reaches `main` onto an exit code.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for wifilock operations.
#[derive(Error, Debug)]
pub enum WifiLockError {
    /// User provided invalid arguments or unusable paths.
    #[error("{0}")]
    UserError(String),

    /// Configuration could not be loaded or failed validation.
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// The persisted lock state could not be read, parsed, or written.
    #[error("State file error: {0}")]
    StateError(String),

    /// A lock/unlock script could not be spawned or waited on.
    #[error("Script execution failed: {0}")]
    ScriptError(String),

    /// The requested operation ran but reported failure.
    #[error("{0}")]
    OperationFailed(String),
}

impl WifiLockError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            WifiLockError::UserError(_) => exit_codes::USER_ERROR,
            WifiLockError::ConfigError(_) => exit_codes::CONFIG_ERROR,
            WifiLockError::StateError(_) => exit_codes::STATE_FAILURE,
            WifiLockError::ScriptError(_) => exit_codes::SCRIPT_FAILURE,
            WifiLockError::OperationFailed(_) => exit_codes::OPERATION_FAILED,
        }
    }
}

/// Result type alias for wifilock operations.
pub type Result<T> = std::result::Result<T, WifiLockError>;
