pub const DEFAULT_THRESHOLD_DB: f32 = 30.0;
pub const DEFAULT_BURN_RATE: f32 = 0.1;
pub const DEFAULT_SILENCE_WINDOW_MS: u64 = 5_000;
pub const DEFAULT_FRAME_MS: u64 = 16;
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;
pub const DEFAULT_HEADLESS_DURATION_SECS: u64 = 10;
pub const DEFAULT_PUBLISH_INTERVAL_MS: u64 = 250;

pub(super) const MIN_FRAME_MS: u64 = 5;
pub(super) const MAX_FRAME_MS: u64 = 120;
pub(super) const MAX_THRESHOLD_DB: f32 = 120.0;
pub(super) const MAX_BURN_RATE: f32 = 10.0;
pub(super) const MIN_SILENCE_WINDOW_MS: u64 = 200;
pub(super) const MAX_SILENCE_WINDOW_MS: u64 = 600_000;
pub(super) const MAX_HEADLESS_DURATION_SECS: u64 = 3_600;
pub(super) const MIN_PUBLISH_INTERVAL_MS: u64 = 50;
pub(super) const MAX_PUBLISH_INTERVAL_MS: u64 = 5_000;
