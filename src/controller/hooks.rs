//! Lifecycle hooks called by the embedding host.

use super::LockController;
use crate::events::{Event, EventAction};
use crate::scripts::ScriptRunner;
use std::fs;

impl<R: ScriptRunner> LockController<R> {
    /// Adopt the persisted state without journaling a start.
    pub fn load(&mut self) {
        if let Some(runtime_dir) = self.store.path().parent()
            && let Err(e) = fs::create_dir_all(runtime_dir)
        {
            log::error!(
                "Failed to create runtime directory '{}': {}",
                runtime_dir.display(),
                e
            );
        }

        self.state = self.store.load();
        log::debug!("Loaded lock state: {}", self.state);
    }

    /// Process start: adopt the persisted state.
    pub fn on_start(&mut self) {
        self.load();
        log::info!("WiFi lock controller initialized ({})", self.state);
        self.record(
            Event::new(EventAction::Start, true, self.state.to_string())
                .with_ssid(self.state.ssid.as_deref()),
        );
    }

    /// Process stop: release any lock, in memory or on disk.
    ///
    /// Never fails; an unlock failure is logged and the state file is left for
    /// the next start to pick up.
    pub fn on_stop(&mut self) {
        if self.state.locked || self.store.exists() {
            log::info!("Attempting to unlock WiFi during unload");
            let result = self.unlock();
            if result.success {
                log::info!("Successfully unlocked WiFi during unload");
            } else {
                log::error!("Failed to unlock WiFi during unload: {}", result.message);
            }
        }

        self.state.clear();
        self.record(Event::new(EventAction::Stop, true, "unloaded"));
        log::info!("WiFi lock controller unloaded");
    }

    /// Plugin removal. Runs after [`on_stop`](Self::on_stop).
    pub fn on_uninstall(&mut self) {
        self.record(Event::new(EventAction::Uninstall, true, "uninstalled"));
        log::info!("WiFi lock controller uninstalled");
    }
}
