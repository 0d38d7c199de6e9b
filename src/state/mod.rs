//! Persistent lock state.
//!
//! The state file lives in the runtime directory and holds a single JSON
//! object:
//!
//! ```json
//! {"locked": true, "ssid": "HomeNet", "bssid": "aa:bb:cc:dd:ee:ff"}
//! ```
//!
//! Absence of the file means "not locked". The file is written atomically on
//! every successful lock and removed on every successful unlock or forced
//! reset. At process start it is authoritative over whatever the process held
//! in memory before it stopped.

mod store;
mod types;

#[cfg(test)]
mod tests;

pub use store::StateStore;
pub use types::LockState;
