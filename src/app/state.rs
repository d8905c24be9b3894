//! Shared application state for the TUI.

use crate::config::AppConfig;
use crate::log_debug;
use crate::monitor::{MonitorConfig, MonitorHandle, MonitorSnapshot};

/// Owns the monitor handle and the bits of state the UI renders around it.
pub struct App {
    config: AppConfig,
    monitor: Option<MonitorHandle>,
    capture_error: Option<String>,
}

impl App {
    /// Spawn the monitor and wrap it for the UI. Device failures show up via
    /// [`App::poll_monitor`] rather than here, so the TUI can come up and
    /// display the error in place.
    pub fn new(config: AppConfig) -> Self {
        let monitor = MonitorHandle::spawn(MonitorConfig::from(&config));
        Self {
            config,
            monitor: Some(monitor),
            capture_error: None,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Pick up a capture failure from the monitor thread, once.
    pub fn poll_monitor(&mut self) {
        if self.capture_error.is_some() {
            return;
        }
        if let Some(error) = self.monitor.as_ref().and_then(|m| m.capture_error()) {
            log_debug(&format!("capture unavailable: {error}"));
            self.capture_error = Some(error);
        }
    }

    pub fn capture_error(&self) -> Option<&str> {
        self.capture_error.as_deref()
    }

    pub fn snapshot(&self) -> MonitorSnapshot {
        match &self.monitor {
            Some(monitor) => monitor.snapshot(),
            None => MonitorSnapshot {
                level: 0.0,
                calories: 0.0,
                frames_processed: 0,
                frames_dropped: 0,
            },
        }
    }

    /// Forward the reset command to the monitor loop.
    pub fn reset(&mut self) {
        if let Some(monitor) = &self.monitor {
            monitor.request_reset();
        }
        log_debug("reset command");
    }

    /// One-line status summary for the bottom bar.
    pub fn status_text(&self) -> String {
        if let Some(error) = &self.capture_error {
            return format!("capture unavailable: {error}");
        }
        let snap = self.snapshot();
        format!(
            "algo={} threshold={:.1} dB policy={} frames={} dropped={}",
            self.config.level_algo.label(),
            self.config.threshold_db,
            self.config.silence_policy.label(),
            snap.frames_processed,
            snap.frames_dropped,
        )
    }

    /// Stop the monitor and release the capture device.
    pub fn shutdown(&mut self) {
        if let Some(monitor) = self.monitor.take() {
            monitor.stop();
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.shutdown();
    }
}
