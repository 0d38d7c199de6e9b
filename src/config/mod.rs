//! Configuration model for wifilock.
//!
//! This module defines the Config struct that represents
//! `<settings_dir>/config.yaml`. Parsing is forward-compatible (unknown fields
//! are ignored), every field has a default, and values are validated on load.

mod model;
mod operations;

#[cfg(test)]
mod tests;

pub use model::Config;
