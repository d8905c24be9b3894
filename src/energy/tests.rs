use super::{CalorieCounter, EnergyConfig, EnergyState};
use crate::config::SilencePolicy;

const FRAME_MS: u64 = 16;

fn counter_with_policy(policy: SilencePolicy) -> CalorieCounter {
    CalorieCounter::new(EnergyConfig {
        silence_policy: policy,
        ..EnergyConfig::default()
    })
}

#[test]
fn below_threshold_leaves_calories_unchanged() {
    let mut counter = counter_with_policy(SilencePolicy::Freeze);
    counter.on_level(50.0, FRAME_MS);
    let before = counter.calories();

    counter.on_level(30.0, FRAME_MS);
    counter.on_level(10.0, FRAME_MS);
    counter.on_level(0.0, FRAME_MS);
    assert_eq!(counter.calories(), before);
}

#[test]
fn level_exactly_at_threshold_does_not_accrue() {
    let mut counter = counter_with_policy(SilencePolicy::Freeze);
    counter.on_level(30.0, FRAME_MS);
    assert_eq!(counter.calories(), 0.0);
}

#[test]
fn above_threshold_adds_overshoot_times_rate() {
    let mut counter = counter_with_policy(SilencePolicy::Freeze);
    let state = counter.on_level(99.93, FRAME_MS);
    assert!((state.calories - 6.993).abs() < 1e-3);

    let state = counter.on_level(40.0, FRAME_MS);
    assert!((state.calories - (6.993 + 1.0)).abs() < 1e-3);
}

#[test]
fn active_frames_clear_the_silence_streak() {
    let mut counter = counter_with_policy(SilencePolicy::Freeze);
    counter.on_level(10.0, 3_000);
    assert_eq!(counter.state().silence_ms, 3_000);

    counter.on_level(45.0, FRAME_MS);
    assert_eq!(counter.state().silence_ms, 0);
    assert_eq!(counter.state().active_ms, FRAME_MS);
}

#[test]
fn freeze_policy_keeps_calories_through_long_silence() {
    let mut counter = counter_with_policy(SilencePolicy::Freeze);
    counter.on_level(50.0, FRAME_MS);
    let before = counter.calories();
    assert!(before > 0.0);

    // Hold the level at 10 dB for well past the 5 s window.
    let frames = (6_000 / FRAME_MS) + 1;
    for _ in 0..frames {
        counter.on_level(10.0, FRAME_MS);
    }
    assert_eq!(counter.calories(), before);
}

#[test]
fn reset_policy_zeroes_calories_after_the_window() {
    let mut counter = counter_with_policy(SilencePolicy::Reset);
    counter.on_level(50.0, FRAME_MS);
    assert!(counter.calories() > 0.0);

    let frames = (6_000 / FRAME_MS) + 1;
    for _ in 0..frames {
        counter.on_level(10.0, FRAME_MS);
    }
    assert_eq!(counter.calories(), 0.0);
}

#[test]
fn reset_policy_waits_for_the_full_window() {
    let mut counter = counter_with_policy(SilencePolicy::Reset);
    counter.on_level(50.0, FRAME_MS);
    let before = counter.calories();

    counter.on_level(10.0, 4_000);
    assert_eq!(counter.calories(), before);

    counter.on_level(10.0, 1_001);
    assert_eq!(counter.calories(), 0.0);
}

#[test]
fn explicit_reset_is_idempotent() {
    let mut counter = counter_with_policy(SilencePolicy::Freeze);
    counter.on_level(80.0, FRAME_MS);
    counter.on_level(10.0, FRAME_MS);

    counter.reset();
    let once = counter.state();
    counter.reset();
    let twice = counter.state();

    assert_eq!(once, EnergyState::default());
    assert_eq!(once, twice);
}

#[test]
fn calories_are_monotone_between_reset_events() {
    let mut counter = counter_with_policy(SilencePolicy::Freeze);
    let levels = [45.0, 10.0, 80.0, 29.9, 31.0, 0.0, 99.0];
    let mut previous = 0.0f32;
    for level in levels {
        let state = counter.on_level(level, FRAME_MS);
        assert!(state.calories >= previous);
        previous = state.calories;
    }
}
