//! wifilock: pin a Wi-Fi interface to a single access point and release it later.
//!
//! This is the main entry point for the `wifilock` CLI. It parses arguments,
//! sets up logging, dispatches to the appropriate command handler, and handles
//! errors with proper exit codes.

mod cli;
mod commands;
pub mod config;
pub mod context;
pub mod controller;
pub mod error;
pub mod events;
pub mod exit_codes;
pub mod fs;
pub mod migrate;
pub mod scripts;
pub mod state;

use cli::{Cli, Command};
use std::process::ExitCode;

/// Log to stderr so stdout stays clean for responses.
///
/// Host-facing commands log at info by default; interactive ones only warn.
fn setup_logging(cli: &Cli) {
    let level = if cli.global.verbose {
        "debug"
    } else if matches!(cli.command, Command::Serve(_) | Command::Hook(_)) {
        "info"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    setup_logging(&cli);

    match commands::dispatch(cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
