//! Calorie accrual from per-frame level readings.
//!
//! While the level stays above the threshold the counter accrues calories in
//! proportion to the overshoot. Sub-threshold frames grow a silence streak;
//! once the streak outlives the silence window the configured policy decides
//! whether the total freezes in place or resets to zero.

use crate::config::{AppConfig, SilencePolicy};

#[cfg(test)]
mod tests;

/// Tunables for the calorie counter.
#[derive(Debug, Clone)]
pub struct EnergyConfig {
    /// Level above which sound counts as "active".
    pub threshold_db: f32,
    /// Calories accrued per dB of overshoot per frame.
    pub burn_rate: f32,
    /// Sub-threshold streak length after which the silence policy applies.
    pub silence_window_ms: u64,
    pub silence_policy: SilencePolicy,
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            threshold_db: 30.0,
            burn_rate: 0.1,
            silence_window_ms: 5_000,
            silence_policy: SilencePolicy::Freeze,
        }
    }
}

impl From<&AppConfig> for EnergyConfig {
    fn from(cfg: &AppConfig) -> Self {
        Self {
            threshold_db: cfg.threshold_db,
            burn_rate: cfg.burn_rate,
            silence_window_ms: cfg.silence_window_ms,
            silence_policy: cfg.silence_policy,
        }
    }
}

/// Running accumulator state. Calories never decrease except at a reset
/// event (explicit command or the `reset` silence policy firing).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EnergyState {
    pub calories: f32,
    /// Total time spent above the threshold.
    pub active_ms: u64,
    /// Length of the current sub-threshold streak. Reset to zero whenever a
    /// frame crosses the threshold, so it only grows through silence.
    pub silence_ms: u64,
}

/// Per-frame calorie accumulator.
#[derive(Debug, Clone)]
pub struct CalorieCounter {
    cfg: EnergyConfig,
    state: EnergyState,
}

impl CalorieCounter {
    pub fn new(cfg: EnergyConfig) -> Self {
        Self {
            cfg,
            state: EnergyState::default(),
        }
    }

    /// Fold one frame's level into the running state.
    pub fn on_level(&mut self, level: f32, frame_ms: u64) -> EnergyState {
        if level > self.cfg.threshold_db {
            self.state.calories += (level - self.cfg.threshold_db) * self.cfg.burn_rate;
            self.state.active_ms = self.state.active_ms.saturating_add(frame_ms);
            self.state.silence_ms = 0;
        } else {
            self.state.silence_ms = self.state.silence_ms.saturating_add(frame_ms);
            if self.state.silence_ms > self.cfg.silence_window_ms
                && self.cfg.silence_policy == SilencePolicy::Reset
            {
                self.state.calories = 0.0;
            }
        }
        self.state
    }

    /// Explicit reset command: zero the calorie total and the silence streak.
    /// Idempotent.
    pub fn reset(&mut self) {
        self.state = EnergyState::default();
    }

    pub fn calories(&self) -> f32 {
        self.state.calories
    }

    pub fn state(&self) -> EnergyState {
        self.state
    }

    pub fn config(&self) -> &EnergyConfig {
        &self.cfg
    }
}
