//! Per-frame level estimation.
//!
//! Reduces one frame of mono f32 samples to a single display-friendly level
//! scalar. Two interchangeable algorithms are provided: time-domain RMS and
//! frequency-domain average energy. Non-finite results are always clamped to
//! zero before they leave this module.

use crate::config::LevelAlgorithm;
use rustfft::{num_complex::Complex, FftPlanner};
use std::f32::consts::PI;

/// Offset that maps the naturally negative dBFS range into a positive
/// display range (silence floor 0, full-scale input just under 100).
pub const LEVEL_OFFSET_DB: f32 = 100.0;

/// Reduces one captured frame to one level value.
pub trait LevelEstimator {
    fn estimate(&mut self, samples: &[f32]) -> f32;
    fn name(&self) -> &'static str {
        "unknown_estimator"
    }
}

/// Construct the estimator selected on the command line.
pub fn build_estimator(algorithm: LevelAlgorithm) -> Box<dyn LevelEstimator> {
    match algorithm {
        LevelAlgorithm::Rms => Box::new(RmsEstimator),
        LevelAlgorithm::Spectral => Box::new(SpectralEstimator::new()),
    }
}

/// `-Infinity` and `NaN` both collapse to the silence floor.
pub(crate) fn finite_or_zero(level: f32) -> f32 {
    if level.is_finite() {
        level
    } else {
        0.0
    }
}

/// Time-domain RMS estimator: `20 * log10(rms) + 100`, with exact-zero RMS
/// (digital silence) mapping to level 0 instead of negative infinity.
#[derive(Debug, Clone, Default)]
pub struct RmsEstimator;

impl LevelEstimator for RmsEstimator {
    fn estimate(&mut self, samples: &[f32]) -> f32 {
        if samples.is_empty() {
            return 0.0;
        }
        let mean_square = samples.iter().map(|s| s * s).sum::<f32>() / samples.len() as f32;
        let rms = mean_square.sqrt();
        if rms == 0.0 {
            return 0.0;
        }
        finite_or_zero(20.0 * rms.log10() + LEVEL_OFFSET_DB)
    }

    fn name(&self) -> &'static str {
        "rms"
    }
}

/// Frequency-domain estimator: mean of byte-scaled FFT bin magnitudes,
/// `10 * log10(mean)`, zero mean mapping to level 0.
///
/// Magnitudes are normalized so a full-scale sine lands near 255 in its bin,
/// keeping the level on the same scale an 8-bit analyser would report.
pub struct SpectralEstimator {
    planner: FftPlanner<f32>,
    window: Vec<f32>,
    buf: Vec<Complex<f32>>,
}

impl SpectralEstimator {
    pub fn new() -> Self {
        Self {
            planner: FftPlanner::new(),
            window: Vec::new(),
            buf: Vec::new(),
        }
    }

    fn ensure_window(&mut self, len: usize) {
        if self.window.len() == len {
            return;
        }
        // Hann window to reduce spectral leakage from frame boundaries.
        self.window = (0..len)
            .map(|i| 0.5 * (1.0 - (2.0 * PI * i as f32 / len as f32).cos()))
            .collect();
    }
}

impl Default for SpectralEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl LevelEstimator for SpectralEstimator {
    fn estimate(&mut self, samples: &[f32]) -> f32 {
        let n = samples.len();
        if n < 2 {
            return 0.0;
        }
        self.ensure_window(n);
        self.buf.clear();
        self.buf.extend(
            samples
                .iter()
                .zip(&self.window)
                .map(|(s, w)| Complex::new(s * w, 0.0)),
        );
        let fft = self.planner.plan_fft_forward(n);
        fft.process(&mut self.buf);

        let bins = n / 2;
        let scale = 2.0 / n as f32;
        let sum: f32 = self.buf[..bins]
            .iter()
            .map(|c| (c.norm() * scale * 255.0).min(255.0))
            .sum();
        let average = sum / bins as f32;
        if average <= 0.0 {
            return 0.0;
        }
        finite_or_zero(10.0 * average.log10())
    }

    fn name(&self) -> &'static str {
        "spectral"
    }
}
