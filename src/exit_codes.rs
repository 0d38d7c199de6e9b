//! Exit code constants for the wifilock CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid paths)
//! - 2: Operation failed (lock/unlock/reset reported `success: false`)
//! - 3: Script could not be executed
//! - 4: State file could not be read or written
//! - 5: Configuration invalid

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or unusable paths.
pub const USER_ERROR: i32 = 1;

/// The requested operation ran but reported failure.
pub const OPERATION_FAILED: i32 = 2;

/// A lock/unlock script could not be spawned or waited on.
pub const SCRIPT_FAILURE: i32 = 3;

/// Persisted lock state could not be read or written.
pub const STATE_FAILURE: i32 = 4;

/// Configuration file failed to parse or validate.
pub const CONFIG_ERROR: i32 = 5;
