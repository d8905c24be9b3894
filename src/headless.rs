//! Headless mode: run the monitor without a TUI and stream JSON lines.
//!
//! Each line is one [`MonitorSnapshot`] rounded to the 2-decimal rendering
//! contract, suitable for piping into `jq` or a plotting script.

use crate::config::AppConfig;
use crate::log_debug;
use crate::monitor::{MonitorConfig, MonitorHandle};
use anyhow::{bail, Result};
use std::io::{self, Write};
use std::thread;
use std::time::{Duration, Instant};

pub fn run_headless(config: &AppConfig) -> Result<()> {
    let monitor = MonitorHandle::spawn(MonitorConfig::from(config));
    let deadline = Instant::now() + Duration::from_secs(config.duration_secs);
    let interval = Duration::from_millis(config.publish_interval_ms);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    log_debug(&format!(
        "headless run: {}s at {}ms cadence",
        config.duration_secs, config.publish_interval_ms
    ));

    loop {
        if let Some(error) = monitor.capture_error() {
            monitor.stop();
            bail!("capture unavailable: {error}");
        }

        let snapshot = monitor.snapshot().rounded();
        writeln!(out, "{}", serde_json::to_string(&snapshot)?)?;
        out.flush()?;

        if Instant::now() >= deadline {
            break;
        }
        thread::sleep(interval);
    }

    let last = monitor.snapshot().rounded();
    monitor.stop();
    eprintln!(
        "done: {} frames processed, {} dropped, {:.2} calories",
        last.frames_processed, last.frames_dropped, last.calories
    );
    Ok(())
}
