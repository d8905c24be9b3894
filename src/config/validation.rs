use super::defaults::{
    MAX_BURN_RATE, MAX_FRAME_MS, MAX_HEADLESS_DURATION_SECS, MAX_PUBLISH_INTERVAL_MS,
    MAX_SILENCE_WINDOW_MS, MAX_THRESHOLD_DB, MIN_FRAME_MS, MIN_PUBLISH_INTERVAL_MS,
    MIN_SILENCE_WINDOW_MS,
};
use super::AppConfig;
use anyhow::{bail, Result};
use clap::Parser;

impl AppConfig {
    /// Parse CLI arguments and validate them right away.
    pub fn parse_args() -> Result<Self> {
        let mut config = Self::parse();
        config.validate()?;
        Ok(config)
    }

    /// Check CLI values against their operating ranges.
    pub fn validate(&mut self) -> Result<()> {
        if !(0.0..=MAX_THRESHOLD_DB).contains(&self.threshold_db) {
            bail!(
                "--threshold-db must be between 0.0 and {MAX_THRESHOLD_DB}, got {}",
                self.threshold_db
            );
        }
        if !(self.burn_rate > 0.0 && self.burn_rate <= MAX_BURN_RATE) {
            bail!(
                "--burn-rate must be greater than 0.0 and at most {MAX_BURN_RATE}, got {}",
                self.burn_rate
            );
        }
        if !(MIN_SILENCE_WINDOW_MS..=MAX_SILENCE_WINDOW_MS).contains(&self.silence_window_ms) {
            bail!(
                "--silence-window-ms must be between {MIN_SILENCE_WINDOW_MS} and {MAX_SILENCE_WINDOW_MS}, got {}",
                self.silence_window_ms
            );
        }
        if !(MIN_FRAME_MS..=MAX_FRAME_MS).contains(&self.frame_ms) {
            bail!(
                "--frame-ms must be between {MIN_FRAME_MS} and {MAX_FRAME_MS}, got {}",
                self.frame_ms
            );
        }
        if self.silence_window_ms <= self.frame_ms {
            bail!(
                "--silence-window-ms ({}) must exceed --frame-ms ({})",
                self.silence_window_ms,
                self.frame_ms
            );
        }
        if !(8..=1024).contains(&self.channel_capacity) {
            bail!(
                "--channel-capacity must be between 8 and 1024, got {}",
                self.channel_capacity
            );
        }
        if self.duration_secs == 0 || self.duration_secs > MAX_HEADLESS_DURATION_SECS {
            bail!(
                "--duration-secs must be between 1 and {MAX_HEADLESS_DURATION_SECS}, got {}",
                self.duration_secs
            );
        }
        if !(MIN_PUBLISH_INTERVAL_MS..=MAX_PUBLISH_INTERVAL_MS).contains(&self.publish_interval_ms)
        {
            bail!(
                "--publish-interval-ms must be between {MIN_PUBLISH_INTERVAL_MS} and {MAX_PUBLISH_INTERVAL_MS}, got {}",
                self.publish_interval_ms
            );
        }
        if let Some(device) = &self.input_device {
            if device.trim().is_empty() {
                bail!("--input-device must not be empty");
            }
        }
        Ok(())
    }
}
