use super::dispatch::{downmix_into, FrameSlicer};
use super::level::{finite_or_zero, LEVEL_OFFSET_DB};
use super::{build_estimator, LevelEstimator, RmsEstimator, SpectralEstimator};
use crate::config::LevelAlgorithm;
use crossbeam_channel::bounded;
use std::f32::consts::PI;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn sine(amplitude: f32, cycles: f32, len: usize) -> Vec<f32> {
    (0..len)
        .map(|i| amplitude * (2.0 * PI * cycles * i as f32 / len as f32).sin())
        .collect()
}

#[test]
fn downmixes_stereo_to_frame_averages() {
    let mut buf = Vec::new();
    let samples = [1.0f32, -1.0, 0.5, 0.5];
    downmix_into(&mut buf, &samples, 2, |sample| sample);
    assert_eq!(buf, vec![0.0, 0.5]);
}

#[test]
fn preserves_mono_input() {
    let mut buf = Vec::new();
    let samples = [0.1f32, 0.2, 0.3];
    downmix_into(&mut buf, &samples, 1, |sample| sample);
    assert_eq!(buf, samples);
}

#[test]
fn downmix_averages_a_truncated_trailing_frame() {
    let mut buf = Vec::new();
    let samples = [1.0f32, 1.0, 0.5];
    downmix_into(&mut buf, &samples, 2, |sample| sample);
    assert_eq!(buf, vec![1.0, 0.5]);
}

#[test]
fn downmix_applies_the_converter() {
    let mut buf = Vec::new();
    let samples = [16_384i16, -16_384];
    downmix_into(&mut buf, &samples, 1, |sample| sample as f32 / 32_768.0);
    assert_eq!(buf, vec![0.5, -0.5]);
}

#[test]
fn frame_slicer_emits_fixed_size_frames() {
    let (sender, receiver) = bounded(8);
    let dropped = Arc::new(AtomicUsize::new(0));
    let mut slicer = FrameSlicer::new(4, sender, dropped.clone());

    slicer.push(&[0.1f32; 10], 1, |sample| sample);

    let first = receiver.try_recv().expect("first frame");
    let second = receiver.try_recv().expect("second frame");
    assert_eq!(first.len(), 4);
    assert_eq!(second.len(), 4);
    assert!(receiver.try_recv().is_err());
    assert_eq!(dropped.load(Ordering::Relaxed), 0);
}

#[test]
fn frame_slicer_counts_drops_when_channel_is_full() {
    let (sender, receiver) = bounded(1);
    let dropped = Arc::new(AtomicUsize::new(0));
    let mut slicer = FrameSlicer::new(2, sender, dropped.clone());

    slicer.push(&[0.5f32; 8], 1, |sample| sample);

    assert_eq!(receiver.try_recv().expect("kept frame").len(), 2);
    assert!(dropped.load(Ordering::Relaxed) > 0);
}

#[test]
fn rms_silence_is_exactly_zero() {
    let mut estimator = RmsEstimator;
    assert_eq!(estimator.estimate(&vec![0.0f32; 512]), 0.0);
}

#[test]
fn rms_empty_frame_is_zero() {
    let mut estimator = RmsEstimator;
    assert_eq!(estimator.estimate(&[]), 0.0);
}

#[test]
fn rms_full_scale_matches_the_byte_reference_value() {
    // Byte sample 255 normalizes to (255 - 128) / 128 = 0.9921875; the
    // expected level is 20 * log10(0.9921875) + 100.
    let mut estimator = RmsEstimator;
    let level = estimator.estimate(&vec![0.992_187_5f32; 1024]);
    assert!((level - 99.932).abs() < 0.01, "got {level}");
}

#[test]
fn rms_nan_input_clamps_to_zero() {
    let mut estimator = RmsEstimator;
    assert_eq!(estimator.estimate(&[f32::NAN, 0.5, 0.25]), 0.0);
}

#[test]
fn rms_level_grows_with_amplitude() {
    let mut estimator = RmsEstimator;
    let quiet = estimator.estimate(&sine(0.1, 8.0, 1024));
    let loud = estimator.estimate(&sine(0.5, 8.0, 1024));
    assert!(loud > quiet);
}

#[test]
fn rms_offset_keeps_typical_levels_positive() {
    let mut estimator = RmsEstimator;
    let level = estimator.estimate(&sine(0.1, 8.0, 1024));
    assert!(level > 0.0);
    assert!(level < LEVEL_OFFSET_DB);
}

#[test]
fn spectral_silence_is_exactly_zero() {
    let mut estimator = SpectralEstimator::new();
    assert_eq!(estimator.estimate(&vec![0.0f32; 1024]), 0.0);
}

#[test]
fn spectral_level_is_finite_for_a_sine() {
    let mut estimator = SpectralEstimator::new();
    let level = estimator.estimate(&sine(1.0, 16.0, 1024));
    assert!(level.is_finite());
}

#[test]
fn spectral_level_grows_with_amplitude() {
    let mut estimator = SpectralEstimator::new();
    let quiet = estimator.estimate(&sine(0.05, 16.0, 1024));
    let loud = estimator.estimate(&sine(0.8, 16.0, 1024));
    assert!(loud > quiet);
}

#[test]
fn spectral_handles_changing_frame_lengths() {
    let mut estimator = SpectralEstimator::new();
    let a = estimator.estimate(&sine(0.5, 8.0, 512));
    let b = estimator.estimate(&sine(0.5, 8.0, 768));
    assert!(a.is_finite());
    assert!(b.is_finite());
}

#[test]
fn spectral_tiny_frame_is_zero() {
    let mut estimator = SpectralEstimator::new();
    assert_eq!(estimator.estimate(&[0.5]), 0.0);
    assert_eq!(estimator.estimate(&[]), 0.0);
}

#[test]
fn finite_or_zero_clamps_non_finite_values() {
    assert_eq!(finite_or_zero(f32::NEG_INFINITY), 0.0);
    assert_eq!(finite_or_zero(f32::INFINITY), 0.0);
    assert_eq!(finite_or_zero(f32::NAN), 0.0);
    assert_eq!(finite_or_zero(-12.5), -12.5);
    assert_eq!(finite_or_zero(42.0), 42.0);
}

#[test]
fn build_estimator_selects_by_algorithm() {
    assert_eq!(build_estimator(LevelAlgorithm::Rms).name(), "rms");
    assert_eq!(build_estimator(LevelAlgorithm::Spectral).name(), "spectral");
}
