//! System microphone access via CPAL.
//!
//! Opens the default (or a named) input device and turns its callback-driven
//! sample stream into fixed-duration mono f32 frames on a bounded channel.

use super::dispatch::FrameSlicer;
use crate::log_debug;
use anyhow::{anyhow, Context, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, StreamConfig};
use crossbeam_channel::{bounded, Receiver};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Audio input device wrapper.
pub struct Microphone {
    device: cpal::Device,
}

impl Microphone {
    /// List microphone names so the CLI can expose a human-friendly selector.
    pub fn list_devices() -> Result<Vec<String>> {
        let host = cpal::default_host();
        let devices = host.input_devices().context("no input devices available")?;
        let mut names = Vec::new();
        for device in devices {
            if let Ok(name) = device.name() {
                names.push(name);
            }
        }
        Ok(names)
    }

    /// Open a microphone, optionally forcing a specific device so users can
    /// pick the right input when a machine exposes several.
    pub fn new(preferred_device: Option<&str>) -> Result<Self> {
        let host = cpal::default_host();
        let device = match preferred_device {
            Some(name) => {
                let mut devices = host.input_devices().context("no input devices available")?;
                devices
                    .find(|d| d.name().map(|n| n == name).unwrap_or(false))
                    .ok_or_else(|| anyhow!("input device '{name}' not found"))?
            }
            None => host
                .default_input_device()
                .ok_or_else(|| anyhow!("no default input device. {}", mic_permission_hint()))?,
        };
        Ok(Self { device })
    }

    /// Name of the active input device.
    pub fn device_name(&self) -> String {
        self.device
            .name()
            .unwrap_or_else(|_| "Unknown Device".to_string())
    }

    /// Start a live capture stream that delivers `frame_ms` worth of mono f32
    /// samples per channel message. The stream keeps running until the
    /// returned [`FrameStream`] is dropped.
    pub fn open_frame_stream(&self, frame_ms: u64, channel_capacity: usize) -> Result<FrameStream> {
        let default_config = self
            .device
            .default_input_config()
            .with_context(|| format!("cannot query input config. {}", mic_permission_hint()))?;
        let format = default_config.sample_format();
        let device_config: StreamConfig = default_config.into();
        let sample_rate = device_config.sample_rate.0;
        let channels = usize::from(device_config.channels.max(1));
        let frame_samples = ((u64::from(sample_rate) * frame_ms) / 1000).max(1) as usize;

        log_debug(&format!(
            "Capture config: format={format:?} sample_rate={sample_rate}Hz channels={channels} frame_samples={frame_samples}"
        ));

        let (sender, receiver) = bounded::<Vec<f32>>(channel_capacity.max(1));
        let dropped = Arc::new(AtomicUsize::new(0));
        let slicer = Arc::new(Mutex::new(FrameSlicer::new(
            frame_samples,
            sender,
            dropped.clone(),
        )));

        // Keep the error callback quiet in the UI and mirror issues into the log.
        let err_fn = |err| log_debug(&format!("audio_stream_error: {err}"));

        let stream = match format {
            SampleFormat::F32 => {
                let slicer = slicer.clone();
                let dropped = dropped.clone();
                self.device.build_input_stream(
                    &device_config,
                    move |data: &[f32], _| {
                        if let Ok(mut slicer) = slicer.try_lock() {
                            slicer.push(data, channels, |sample| sample);
                        } else {
                            dropped.fetch_add(1, Ordering::Relaxed);
                        }
                    },
                    err_fn,
                    None,
                )?
            }
            SampleFormat::I16 => {
                let slicer = slicer.clone();
                let dropped = dropped.clone();
                self.device.build_input_stream(
                    &device_config,
                    move |data: &[i16], _| {
                        if let Ok(mut slicer) = slicer.try_lock() {
                            slicer.push(data, channels, |sample| sample as f32 / 32_768.0);
                        } else {
                            dropped.fetch_add(1, Ordering::Relaxed);
                        }
                    },
                    err_fn,
                    None,
                )?
            }
            SampleFormat::U16 => {
                let slicer = slicer.clone();
                let dropped = dropped.clone();
                self.device.build_input_stream(
                    &device_config,
                    move |data: &[u16], _| {
                        if let Ok(mut slicer) = slicer.try_lock() {
                            slicer.push(data, channels, |sample| {
                                (sample as f32 - 32_768.0) / 32_768.0
                            });
                        } else {
                            dropped.fetch_add(1, Ordering::Relaxed);
                        }
                    },
                    err_fn,
                    None,
                )?
            }
            other => return Err(anyhow!("unsupported sample format: {other:?}")),
        };

        stream.play().context("cannot start input stream")?;

        Ok(FrameStream {
            stream,
            frames: receiver,
            dropped,
            sample_rate,
        })
    }
}

/// Live capture handle. Dropping it pauses and releases the device stream,
/// which is the only teardown path the monitor needs.
pub struct FrameStream {
    stream: cpal::Stream,
    frames: Receiver<Vec<f32>>,
    dropped: Arc<AtomicUsize>,
    sample_rate: u32,
}

impl FrameStream {
    pub fn frames(&self) -> &Receiver<Vec<f32>> {
        &self.frames
    }

    pub fn dropped_frames(&self) -> usize {
        self.dropped.load(Ordering::Relaxed)
    }

    #[allow(dead_code)]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

impl Drop for FrameStream {
    fn drop(&mut self) {
        if let Err(err) = self.stream.pause() {
            log_debug(&format!("failed to pause audio stream: {err}"));
        }
    }
}

pub(crate) fn mic_permission_hint() -> &'static str {
    #[cfg(target_os = "macos")]
    {
        "macOS: System Settings > Privacy & Security > Microphone (enable your terminal)."
    }
    #[cfg(target_os = "linux")]
    {
        "Linux: check PipeWire/PulseAudio permissions and ensure the device is not muted."
    }
    #[cfg(target_os = "windows")]
    {
        "Windows: Settings > Privacy & Security > Microphone (allow access for your terminal)."
    }
    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        "Check OS microphone permissions."
    }
}
