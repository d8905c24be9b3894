use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Lock-free level/calorie pair shared between the monitor loop and the UI.
///
/// The loop writes once per frame; the UI reads at its own pace. Values are
/// stored as f32 bit patterns so no locking is needed on either side.
#[derive(Clone, Debug)]
pub struct LiveReadings {
    level_bits: Arc<AtomicU32>,
    calorie_bits: Arc<AtomicU32>,
}

impl LiveReadings {
    pub fn new() -> Self {
        Self {
            level_bits: Arc::new(AtomicU32::new(0f32.to_bits())),
            calorie_bits: Arc::new(AtomicU32::new(0f32.to_bits())),
        }
    }

    pub fn publish(&self, level: f32, calories: f32) {
        self.level_bits.store(level.to_bits(), Ordering::Relaxed);
        self.calorie_bits.store(calories.to_bits(), Ordering::Relaxed);
    }

    pub fn level(&self) -> f32 {
        f32::from_bits(self.level_bits.load(Ordering::Relaxed))
    }

    pub fn calories(&self) -> f32 {
        f32::from_bits(self.calorie_bits.load(Ordering::Relaxed))
    }

    /// Zero both readings, used by the reset command and at shutdown.
    pub fn clear(&self) {
        self.publish(0.0, 0.0);
    }
}

impl Default for LiveReadings {
    fn default() -> Self {
        Self::new()
    }
}
