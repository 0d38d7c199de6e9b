//! CLI argument parsing for wifilock.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use crate::context::PathOverrides;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// wifilock: pin the wireless interface to the access point it is connected
/// to, and release the pin later.
///
/// Lock state survives restarts in a JSON file in the runtime directory. The
/// OS-level work is done by `lock_wifi.sh` and `unlock_wifi.sh` from the
/// plugin's `assets/` directory.
#[derive(Parser, Debug)]
#[command(name = "wifilock")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command.
#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
    /// Plugin directory holding `assets/` (default: $DECKY_PLUGIN_DIR or cwd).
    #[arg(long, global = true, value_name = "DIR")]
    pub plugin_dir: Option<PathBuf>,

    /// Writable runtime directory for the state file and journal.
    #[arg(long, global = true, value_name = "DIR")]
    pub runtime_dir: Option<PathBuf>,

    /// Settings directory holding `config.yaml`.
    #[arg(long, global = true, value_name = "DIR")]
    pub settings_dir: Option<PathBuf>,

    /// Explicit config file (must exist).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print responses as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl GlobalArgs {
    pub fn path_overrides(&self) -> PathOverrides {
        PathOverrides {
            plugin_dir: self.plugin_dir.clone(),
            runtime_dir: self.runtime_dir.clone(),
            settings_dir: self.settings_dir.clone(),
        }
    }
}

/// Available commands for wifilock.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Lock Wi-Fi to the currently associated access point.
    Lock,

    /// Release the Wi-Fi lock.
    ///
    /// Falls back to the persisted state file to find the locked network.
    Unlock,

    /// Show the current lock state.
    Status,

    /// Clear all lock state, trying the unlock script once first.
    ///
    /// Always removes the state file. Use when a normal unlock fails.
    #[command(alias = "force-delete-state")]
    ForceReset,

    /// Show recent operations from the journal.
    History(HistoryArgs),

    /// Run a lifecycle hook on behalf of the host.
    Hook(HookCommand),

    /// Serve requests from stdin, one per line, for a host process.
    ///
    /// Each line is a method name (`lock_wifi`, `unlock_wifi`,
    /// `get_wifi_status`, `force_delete_state`) or `{"method": "..."}`. One
    /// JSON response line is written per request. The start hook runs first
    /// and the stop hook at end of input.
    Serve(ServeArgs),
}

/// Arguments for the `history` command.
#[derive(Parser, Debug)]
pub struct HistoryArgs {
    /// Number of most recent entries to show.
    #[arg(short = 'n', long, default_value_t = 20)]
    pub limit: usize,
}

/// Arguments for the `hook` command.
#[derive(Parser, Debug)]
pub struct HookCommand {
    #[command(subcommand)]
    pub hook: Hook,
}

/// Lifecycle hooks.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hook {
    /// Load persisted state (and report it).
    Start,
    /// Release any active lock before the host stops the plugin.
    Stop,
    /// Plugin removal.
    Uninstall,
    /// One-time install migration: copy and chmod scripts, move legacy state.
    Migrate,
}

/// Arguments for the `serve` command.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Do not release the lock when input ends.
    #[arg(long)]
    pub keep_lock: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
