//! One-time install migration, run by the host before the first start.
//!
//! Three steps, in order:
//! 1. Move a state file left in a legacy runtime directory into the current
//!    one, so a lock taken by an older install can still be released.
//! 2. On a manual install (a `defaults/` directory next to the plugin), copy
//!    the packaged scripts from `defaults/assets/` to their configured paths.
//! 3. Make both scripts executable.

use crate::config::Config;
use crate::context::{ASSETS_DIR, LOCK_SCRIPT_NAME, PluginContext, UNLOCK_SCRIPT_NAME};
use crate::error::Result;
use crate::events::{Event, EventAction};
use crate::fs::{copy_file, move_file, set_executable};
use std::path::PathBuf;

/// What a migration run changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// A legacy state file was moved into the runtime directory.
    pub state_migrated: bool,
    /// Scripts were copied from the manual-install defaults.
    pub scripts_copied: bool,
    /// Scripts whose mode was set to executable.
    pub executable: Vec<PathBuf>,
}

impl MigrationReport {
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if self.state_migrated {
            parts.push("migrated legacy lock state".to_string());
        }
        if self.scripts_copied {
            parts.push("copied scripts from defaults".to_string());
        }
        parts.push(format!("{} script(s) made executable", self.executable.len()));
        parts.join(", ")
    }
}

/// Run the install migration for `ctx`.
///
/// Legacy state migration is best-effort. Failing to copy or chmod a script is
/// an error, because lock and unlock cannot work without them.
pub fn run_migration(ctx: &PluginContext, config: &Config) -> Result<MigrationReport> {
    log::info!("Migrating WiFi lock plugin");
    let journal = config.journal(ctx);

    let result = migrate_steps(ctx, config);
    match &result {
        Ok(report) => journal.record(Event::new(EventAction::Migrate, true, report.summary())),
        Err(e) => journal.record(Event::new(EventAction::Migrate, false, e.to_string())),
    }
    result
}

fn migrate_steps(ctx: &PluginContext, config: &Config) -> Result<MigrationReport> {
    let mut report = MigrationReport {
        state_migrated: migrate_legacy_state(ctx, config),
        ..Default::default()
    };

    let lock_script = config.lock_script_path(ctx);
    let unlock_script = config.unlock_script_path(ctx);

    let defaults = ctx.defaults_dir();
    if defaults.is_dir() {
        log::info!("Copying scripts from {} for manual install", defaults.display());
        let packaged = defaults.join(ASSETS_DIR);
        copy_file(&packaged.join(LOCK_SCRIPT_NAME), &lock_script)?;
        copy_file(&packaged.join(UNLOCK_SCRIPT_NAME), &unlock_script)?;
        report.scripts_copied = true;
    }

    for script in [lock_script, unlock_script] {
        set_executable(&script)?;
        report.executable.push(script);
    }

    Ok(report)
}

fn migrate_legacy_state(ctx: &PluginContext, config: &Config) -> bool {
    let Some(legacy_dir) = &config.legacy_runtime_dir else {
        return false;
    };

    let legacy = legacy_dir.join(&config.state_file_name);
    let current = config.state_file_path(ctx);
    if !legacy.is_file() || legacy == current {
        return false;
    }
    if current.exists() {
        log::warn!(
            "Both {} and {} exist; keeping the current state file",
            legacy.display(),
            current.display()
        );
        return false;
    }

    match move_file(&legacy, &current) {
        Ok(()) => {
            log::info!("Moved legacy lock state {} -> {}", legacy.display(), current.display());
            true
        }
        Err(e) => {
            log::error!("Failed to migrate legacy lock state: {}", e);
            false
        }
    }
}
