//! Command-line parsing and validation helpers.

mod defaults;
mod validation;

use clap::{Parser, ValueEnum};

pub use defaults::{
    DEFAULT_BURN_RATE, DEFAULT_CHANNEL_CAPACITY, DEFAULT_FRAME_MS, DEFAULT_HEADLESS_DURATION_SECS,
    DEFAULT_PUBLISH_INTERVAL_MS, DEFAULT_SILENCE_WINDOW_MS, DEFAULT_THRESHOLD_DB,
};

/// CLI options for the noisefit monitor. Validated values keep the audio
/// pipeline inside safe operating ranges.
#[derive(Debug, Parser, Clone)]
#[command(about = "noisefit: real-time decibel & calorie monitor", author, version)]
pub struct AppConfig {
    /// Preferred audio input device name
    #[arg(long)]
    pub input_device: Option<String>,

    /// Print detected audio input devices and exit
    #[arg(long = "list-input-devices", default_value_t = false)]
    pub list_input_devices: bool,

    /// Level estimation algorithm
    #[arg(long = "level-algo", value_enum, default_value_t = LevelAlgorithm::Rms)]
    pub level_algo: LevelAlgorithm,

    /// Level above which sound accrues calories (display dB)
    #[arg(long = "threshold-db", allow_negative_numbers = true, default_value_t = DEFAULT_THRESHOLD_DB)]
    pub threshold_db: f32,

    /// Calories accrued per dB of overshoot per frame
    #[arg(long = "burn-rate", default_value_t = DEFAULT_BURN_RATE)]
    pub burn_rate: f32,

    /// Sub-threshold streak length before the silence policy applies (milliseconds)
    #[arg(long = "silence-window-ms", default_value_t = DEFAULT_SILENCE_WINDOW_MS)]
    pub silence_window_ms: u64,

    /// What happens to the calorie total once the silence window elapses
    #[arg(long = "silence-policy", value_enum, default_value_t = SilencePolicy::Freeze)]
    pub silence_policy: SilencePolicy,

    /// Capture frame duration (milliseconds)
    #[arg(long = "frame-ms", default_value_t = DEFAULT_FRAME_MS)]
    pub frame_ms: u64,

    /// Frame channel capacity between the capture callback and the monitor loop
    #[arg(long = "channel-capacity", default_value_t = DEFAULT_CHANNEL_CAPACITY)]
    pub channel_capacity: usize,

    /// Run without the TUI and print JSON snapshot lines to stdout
    #[arg(long = "headless", default_value_t = false)]
    pub headless: bool,

    /// How long the headless run lasts (seconds)
    #[arg(long = "duration-secs", default_value_t = DEFAULT_HEADLESS_DURATION_SECS)]
    pub duration_secs: u64,

    /// Snapshot cadence in headless mode (milliseconds)
    #[arg(long = "publish-interval-ms", default_value_t = DEFAULT_PUBLISH_INTERVAL_MS)]
    pub publish_interval_ms: u64,

    /// Enable file logging (debug)
    #[arg(long = "logs", env = "NOISEFIT_LOGS", default_value_t = false)]
    pub logs: bool,

    /// Disable all file logging (overrides --logs and log env vars)
    #[arg(long = "no-logs", env = "NOISEFIT_NO_LOGS", default_value_t = false)]
    pub no_logs: bool,
}

/// Runtime-selectable level estimation algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LevelAlgorithm {
    /// Time-domain RMS with a +100 dB display offset
    Rms,
    /// Frequency-domain average bin energy
    Spectral,
}

impl LevelAlgorithm {
    pub fn label(self) -> &'static str {
        match self {
            LevelAlgorithm::Rms => "rms",
            LevelAlgorithm::Spectral => "spectral",
        }
    }
}

/// Behavior of the calorie total after a full silence window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SilencePolicy {
    /// Keep the accrued total while silence persists
    Freeze,
    /// Zero the accrued total once silence outlives the window
    Reset,
}

impl SilencePolicy {
    pub fn label(self) -> &'static str {
        match self {
            SilencePolicy::Freeze => "freeze",
            SilencePolicy::Reset => "reset",
        }
    }
}
