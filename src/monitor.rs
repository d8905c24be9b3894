//! The monitor loop: capture, estimate, accumulate, publish.
//!
//! One frame of audio flows through the level estimator and the calorie
//! counter per iteration, paced by the capture channel. Cancellation and
//! reset are explicit flags consumed at frame boundaries, so the loop owns
//! all mutable state and the UI only ever reads published snapshots.

use crate::audio::{build_estimator, LiveReadings, Microphone};
use crate::config::{AppConfig, LevelAlgorithm};
use crate::energy::{CalorieCounter, EnergyConfig};
use crate::log_debug;
use anyhow::{anyhow, Context, Result};
use crossbeam_channel::RecvTimeoutError;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Everything the monitor loop needs, lifted out of the CLI config.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub input_device: Option<String>,
    pub algorithm: LevelAlgorithm,
    pub frame_ms: u64,
    pub channel_capacity: usize,
    pub energy: EnergyConfig,
}

impl From<&AppConfig> for MonitorConfig {
    fn from(cfg: &AppConfig) -> Self {
        Self {
            input_device: cfg.input_device.clone(),
            algorithm: cfg.level_algo,
            frame_ms: cfg.frame_ms,
            channel_capacity: cfg.channel_capacity,
            energy: EnergyConfig::from(cfg),
        }
    }
}

/// Point-in-time view of the monitor, cheap to copy into the UI or a JSON
/// line. Progress accessors clamp to the 0..=100 gauge range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonitorSnapshot {
    pub level: f32,
    pub calories: f32,
    pub frames_processed: u64,
    pub frames_dropped: u64,
}

impl MonitorSnapshot {
    pub fn level_percent(&self) -> f64 {
        f64::from(self.level).clamp(0.0, 100.0)
    }

    pub fn calories_percent(&self) -> f64 {
        f64::from(self.calories).clamp(0.0, 100.0)
    }

    /// Readings rounded to 2 decimal places, the precision the rendering
    /// contract promises.
    pub fn rounded(&self) -> Self {
        Self {
            level: (self.level * 100.0).round() / 100.0,
            calories: (self.calories * 100.0).round() / 100.0,
            ..*self
        }
    }
}

#[derive(Debug, Default)]
struct MonitorCounters {
    frames_processed: AtomicU64,
    frames_dropped: AtomicU64,
}

/// Handle to a running monitor thread.
///
/// The loop publishes into [`LiveReadings`]; callers read snapshots and send
/// commands through atomic flags, so no lock is held across the frame path.
pub struct MonitorHandle {
    readings: LiveReadings,
    counters: Arc<MonitorCounters>,
    stop: Arc<AtomicBool>,
    reset: Arc<AtomicBool>,
    capture_error: Arc<Mutex<Option<String>>>,
    join: Option<JoinHandle<()>>,
}

impl MonitorHandle {
    /// Start the monitor on its own thread. Device acquisition happens on
    /// that thread; failures surface through [`MonitorHandle::capture_error`]
    /// and the loop never starts (no retry).
    pub fn spawn(cfg: MonitorConfig) -> Self {
        let readings = LiveReadings::new();
        let counters = Arc::new(MonitorCounters::default());
        let stop = Arc::new(AtomicBool::new(false));
        let reset = Arc::new(AtomicBool::new(false));
        let capture_error = Arc::new(Mutex::new(None));

        let join = {
            let readings = readings.clone();
            let counters = counters.clone();
            let stop = stop.clone();
            let reset = reset.clone();
            let capture_error = capture_error.clone();
            thread::spawn(move || {
                if let Err(err) = run_loop(&cfg, &readings, &counters, &stop, &reset) {
                    log_debug(&format!("monitor loop failed: {err:#}"));
                    if let Ok(mut slot) = capture_error.lock() {
                        *slot = Some(format!("{err:#}"));
                    }
                }
            })
        };

        Self {
            readings,
            counters,
            stop,
            reset,
            capture_error,
            join: Some(join),
        }
    }

    pub fn snapshot(&self) -> MonitorSnapshot {
        MonitorSnapshot {
            level: self.readings.level(),
            calories: self.readings.calories(),
            frames_processed: self.counters.frames_processed.load(Ordering::Relaxed),
            frames_dropped: self.counters.frames_dropped.load(Ordering::Relaxed),
        }
    }

    /// Reset command: zero the published readings immediately and tell the
    /// loop to clear its accumulator state at the next frame boundary.
    pub fn request_reset(&self) {
        self.readings.clear();
        self.reset.store(true, Ordering::Relaxed);
    }

    /// Capture failure message, if the loop died during device acquisition
    /// or mid-stream. The monitor stays inert after the first failure.
    pub fn capture_error(&self) -> Option<String> {
        self.capture_error.lock().ok().and_then(|slot| slot.clone())
    }

    pub fn is_running(&self) -> bool {
        self.join.as_ref().map(|j| !j.is_finished()).unwrap_or(false)
    }

    /// Signal stop and wait for the loop to wind down.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(join) = self.join.take() {
            if join.join().is_err() {
                log_debug("monitor thread panicked during shutdown");
            }
        }
    }
}

impl Drop for MonitorHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_loop(
    cfg: &MonitorConfig,
    readings: &LiveReadings,
    counters: &MonitorCounters,
    stop: &AtomicBool,
    reset: &AtomicBool,
) -> Result<()> {
    let mic = Microphone::new(cfg.input_device.as_deref()).context("microphone unavailable")?;
    log_debug(&format!(
        "Monitoring '{}' with {} estimator",
        mic.device_name(),
        cfg.algorithm.label()
    ));
    let stream = mic
        .open_frame_stream(cfg.frame_ms, cfg.channel_capacity)
        .context("cannot open capture stream")?;

    let mut estimator = build_estimator(cfg.algorithm);
    let mut counter = CalorieCounter::new(cfg.energy.clone());
    let wait = Duration::from_millis(cfg.frame_ms);

    while !stop.load(Ordering::Relaxed) {
        if reset.swap(false, Ordering::Relaxed) {
            counter.reset();
            readings.clear();
        }
        match stream.frames().recv_timeout(wait) {
            Ok(frame) => {
                let level = estimator.estimate(&frame);
                let state = counter.on_level(level, cfg.frame_ms);
                counters.frames_processed.fetch_add(1, Ordering::Relaxed);
                counters
                    .frames_dropped
                    .store(stream.dropped_frames() as u64, Ordering::Relaxed);
                readings.publish(level, state.calories);
            }
            Err(RecvTimeoutError::Timeout) => {
                // No audio arrived in a frame's time; count the gap as
                // silence so the silence window keeps advancing.
                let state = counter.on_level(0.0, cfg.frame_ms);
                readings.publish(0.0, state.calories);
            }
            Err(RecvTimeoutError::Disconnected) => {
                return Err(anyhow!("audio stream disconnected"));
            }
        }
    }

    readings.publish(0.0, counter.calories());
    // Returning drops the stream, releasing the device on every exit path.
    Ok(())
}

/// Final state of an offline run, mirroring what a live session would have
/// published after the last frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonitorReport {
    pub final_level: f32,
    pub calories: f32,
    pub frames_processed: u64,
}

/// Run the estimate/accumulate pipeline over synthetic PCM without a device.
/// Frames shorter than `frame_samples` are zero-padded like a live tail.
pub fn offline_monitor_from_pcm(
    samples: &[f32],
    frame_samples: usize,
    cfg: &MonitorConfig,
) -> MonitorReport {
    let frame_samples = frame_samples.max(1);
    let mut estimator = build_estimator(cfg.algorithm);
    let mut counter = CalorieCounter::new(cfg.energy.clone());
    let mut final_level = 0.0;
    let mut frames_processed = 0u64;

    for chunk in samples.chunks(frame_samples) {
        let mut frame = chunk.to_vec();
        frame.resize(frame_samples, 0.0);
        final_level = estimator.estimate(&frame);
        counter.on_level(final_level, cfg.frame_ms);
        frames_processed += 1;
    }

    MonitorReport {
        final_level,
        calories: counter.calories(),
        frames_processed,
    }
}
