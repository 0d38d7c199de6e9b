//! Command implementations for wifilock.
//!
//! Resolves the install paths and config once, then routes the parsed command
//! to its handler. One-shot commands load the persisted state first so the
//! state file is authoritative for every invocation.

mod serve;

use crate::cli::{Cli, Command, GlobalArgs, HistoryArgs, Hook, ServeArgs};
use crate::config::Config;
use crate::context::PluginContext;
use crate::controller::{LockController, OpResponse};
use crate::error::{Result, WifiLockError};
use crate::events::read_events;
use crate::migrate::run_migration;
use crate::scripts::SubprocessRunner;
use crate::state::LockState;
use serde::Serialize;

/// Dispatch a command to its implementation.
pub fn dispatch(cli: Cli) -> Result<()> {
    let ctx = PluginContext::resolve(&cli.global.path_overrides())?;
    let config = match Config::load_for(&ctx, cli.global.config.as_deref()) {
        Ok(config) => config,
        Err(e) if releases_lock(&cli.command) => {
            log::error!("{}; continuing with default configuration", e);
            Config::default()
        }
        Err(e) => return Err(e),
    };
    log::debug!(
        "plugin_dir={} runtime_dir={}",
        ctx.plugin_dir.display(),
        ctx.runtime_dir.display()
    );

    let global = &cli.global;
    match cli.command {
        Command::Lock => run_operation(&ctx, &config, global, |c| c.lock()),
        Command::Unlock => run_operation(&ctx, &config, global, |c| c.unlock()),
        Command::ForceReset => run_operation(&ctx, &config, global, |c| c.force_reset()),
        Command::Status => cmd_status(&ctx, &config, global),
        Command::History(args) => cmd_history(&ctx, global, args),
        Command::Hook(cmd) => cmd_hook(&ctx, &config, global, cmd.hook),
        Command::Serve(args) => cmd_serve(&ctx, &config, args),
    }
}

/// Commands that must still run when the config file is unusable.
fn releases_lock(command: &Command) -> bool {
    match command {
        Command::Unlock | Command::ForceReset => true,
        Command::Hook(cmd) => cmd.hook == Hook::Stop,
        _ => false,
    }
}

fn loaded_controller(ctx: &PluginContext, config: &Config) -> LockController<SubprocessRunner> {
    let mut controller = LockController::from_config(ctx, config);
    controller.load();
    controller
}

fn run_operation<F>(ctx: &PluginContext, config: &Config, global: &GlobalArgs, op: F) -> Result<()>
where
    F: FnOnce(&mut LockController<SubprocessRunner>) -> OpResponse,
{
    let mut controller = loaded_controller(ctx, config);
    let response = op(&mut controller);
    report(&response, global.json)
}

/// Print `response`; a failed operation becomes an error for the exit code.
fn report(response: &OpResponse, json: bool) -> Result<()> {
    if json {
        println!("{}", to_json(response)?);
    } else if response.success {
        println!("{}", response.message);
    }

    if response.success {
        Ok(())
    } else {
        Err(WifiLockError::OperationFailed(response.message.clone()))
    }
}

fn cmd_status(ctx: &PluginContext, config: &Config, global: &GlobalArgs) -> Result<()> {
    let controller = loaded_controller(ctx, config);
    print_status(&controller.status(), global.json)
}

fn print_status(state: &LockState, json: bool) -> Result<()> {
    if json {
        println!("{}", to_json(state)?);
        return Ok(());
    }

    match (state.locked, &state.ssid) {
        (false, _) => println!("WiFi not locked"),
        (true, Some(ssid)) => {
            println!("WiFi locked");
            println!("  SSID:  {}", ssid);
            println!("  BSSID: {}", state.bssid.as_deref().unwrap_or("unknown"));
        }
        (true, None) => println!("WiFi locked (SSID unknown; run force-reset)"),
    }
    Ok(())
}

fn cmd_history(ctx: &PluginContext, global: &GlobalArgs, args: HistoryArgs) -> Result<()> {
    let events = read_events(&ctx.events_path(), Some(args.limit))?;

    if global.json {
        println!("{}", to_json(&events)?);
        return Ok(());
    }

    if events.is_empty() {
        println!("No recorded operations.");
        return Ok(());
    }
    for event in &events {
        println!("{}", event);
    }
    Ok(())
}

fn cmd_hook(ctx: &PluginContext, config: &Config, global: &GlobalArgs, hook: Hook) -> Result<()> {
    match hook {
        Hook::Start => {
            let mut controller = LockController::from_config(ctx, config);
            controller.on_start();
            print_status(&controller.status(), global.json)
        }
        Hook::Stop => {
            let mut controller = loaded_controller(ctx, config);
            controller.on_stop();
            Ok(())
        }
        Hook::Uninstall => {
            let mut controller = LockController::from_config(ctx, config);
            controller.on_uninstall();
            Ok(())
        }
        Hook::Migrate => {
            let report = run_migration(ctx, config)?;
            println!("Migration complete: {}", report.summary());
            Ok(())
        }
    }
}

fn cmd_serve(ctx: &PluginContext, config: &Config, args: ServeArgs) -> Result<()> {
    let mut controller = LockController::from_config(ctx, config);
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    serve::serve(&mut controller, stdin.lock(), stdout.lock(), args.keep_lock)
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string(value)
        .map_err(|e| WifiLockError::UserError(format!("failed to serialize response: {}", e)))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::context::UNLOCK_SCRIPT_NAME;
    use clap::Parser;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// An install with a locked state file, an unlock script that leaves a
    /// marker, and an invalid `config.yaml`.
    struct Install {
        temp: TempDir,
    }

    impl Install {
        fn with_broken_config() -> Self {
            let temp = TempDir::new().unwrap();
            let install = Self { temp };

            let assets = install.dir("plugin").join("assets");
            fs::create_dir_all(&assets).unwrap();
            let script = assets.join(UNLOCK_SCRIPT_NAME);
            fs::write(
                &script,
                format!(
                    "#!/bin/sh\ntouch '{}'\necho \"{{\\\"success\\\":true,\\\"ssid\\\":\\\"$1\\\"}}\"\n",
                    install.marker().display()
                ),
            )
            .unwrap();
            fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

            fs::create_dir_all(install.dir("runtime")).unwrap();
            fs::write(install.state_file(), r#"{"locked":true,"ssid":"HomeNet"}"#).unwrap();

            fs::create_dir_all(install.dir("settings")).unwrap();
            fs::write(
                install.dir("settings").join("config.yaml"),
                "force_reset_timeout_secs: 0\n",
            )
            .unwrap();

            install
        }

        fn dir(&self, name: &str) -> PathBuf {
            self.temp.path().join(name)
        }

        fn marker(&self) -> PathBuf {
            self.temp.path().join("unlock-ran")
        }

        fn state_file(&self) -> PathBuf {
            self.dir("runtime").join("wifi_lock_state.json")
        }

        fn run(&self, args: &[&str]) -> Result<()> {
            let plugin = self.dir("plugin");
            let runtime = self.dir("runtime");
            let settings = self.dir("settings");
            let mut argv = vec!["wifilock"];
            argv.extend_from_slice(args);
            argv.extend([
                "--plugin-dir",
                plugin.to_str().unwrap(),
                "--runtime-dir",
                runtime.to_str().unwrap(),
                "--settings-dir",
                settings.to_str().unwrap(),
            ]);
            dispatch(Cli::try_parse_from(argv).unwrap())
        }
    }

    #[test]
    fn test_stop_hook_unlocks_despite_invalid_config() {
        let install = Install::with_broken_config();

        install.run(&["hook", "stop"]).unwrap();

        assert!(install.marker().exists());
        assert!(!install.state_file().exists());
    }

    #[test]
    fn test_force_reset_clears_state_despite_invalid_config() {
        let install = Install::with_broken_config();

        install.run(&["force-reset"]).unwrap();

        assert!(install.marker().exists());
        assert!(!install.state_file().exists());
    }

    #[test]
    fn test_unlock_runs_despite_invalid_config() {
        let install = Install::with_broken_config();

        install.run(&["unlock"]).unwrap();

        assert!(install.marker().exists());
        assert!(!install.state_file().exists());
    }

    #[test]
    fn test_other_commands_still_reject_invalid_config() {
        let install = Install::with_broken_config();

        let result = install.run(&["lock"]);

        assert!(matches!(result, Err(WifiLockError::ConfigError(_))));
        assert!(!install.marker().exists());
        assert!(install.state_file().exists());
    }
}
