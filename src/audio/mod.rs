//! Microphone capture and per-frame level estimation.
//!
//! Audio is captured via CPAL at the device's native rate, converted to f32,
//! downmixed to mono, and sliced into fixed-duration frames. Each frame is
//! reduced to a single "level" scalar by one of the estimators in [`level`].

mod capture;
mod dispatch;
mod level;
mod meter;
#[cfg(test)]
mod tests;

pub use capture::{FrameStream, Microphone};
pub use level::{build_estimator, LevelEstimator, RmsEstimator, SpectralEstimator};
pub use meter::LiveReadings;
