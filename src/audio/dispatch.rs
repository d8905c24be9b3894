use crossbeam_channel::{Sender, TrySendError};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

/// Downmix interleaved multi-channel input to mono while converting each
/// sample to f32, so the estimators see one channel regardless of the
/// microphone layout.
pub(super) fn downmix_into<T, F>(out: &mut Vec<f32>, data: &[T], channels: usize, mut convert: F)
where
    T: Copy,
    F: FnMut(T) -> f32,
{
    if channels <= 1 {
        out.extend(data.iter().copied().map(&mut convert));
        return;
    }

    let mut frames = data.chunks_exact(channels);
    for frame in &mut frames {
        let sum: f32 = frame.iter().copied().map(&mut convert).sum();
        out.push(sum / channels as f32);
    }
    // A truncated trailing frame still contributes its average.
    let rest = frames.remainder();
    if !rest.is_empty() {
        let sum: f32 = rest.iter().copied().map(&mut convert).sum();
        out.push(sum / rest.len() as f32);
    }
}

/// Accumulates downmixed samples on the CPAL callback thread and emits
/// fixed-size frames over a bounded channel. Full channels drop the frame
/// and count it rather than blocking the audio callback.
pub(super) struct FrameSlicer {
    frame_samples: usize,
    pending: Vec<f32>,
    scratch: Vec<f32>,
    sender: Sender<Vec<f32>>,
    dropped: Arc<AtomicUsize>,
}

impl FrameSlicer {
    pub(super) fn new(
        frame_samples: usize,
        sender: Sender<Vec<f32>>,
        dropped: Arc<AtomicUsize>,
    ) -> Self {
        Self {
            frame_samples: frame_samples.max(1),
            pending: Vec::with_capacity(frame_samples),
            scratch: Vec::new(),
            sender,
            dropped,
        }
    }

    pub(super) fn push<T, F>(&mut self, data: &[T], channels: usize, convert: F)
    where
        T: Copy,
        F: FnMut(T) -> f32,
    {
        self.scratch.clear();
        downmix_into(&mut self.scratch, data, channels, convert);
        self.pending.extend_from_slice(&self.scratch);

        while self.pending.len() >= self.frame_samples {
            let frame: Vec<f32> = self.pending.drain(..self.frame_samples).collect();
            match self.sender.try_send(frame) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    self.dropped.fetch_add(1, Ordering::Relaxed);
                }
                Err(TrySendError::Disconnected(_)) => break,
            }
        }
    }
}
