//! Time management utilities
//!
//! The render clock records how long each repaint took; game code running on
//! the simulation clock may read that delta to scale frame-rate dependent
//! effects. The state is shared across both threads, hence the atomics.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Frame timing state shared between the render thread and its readers
pub struct TimeState {
    delta_nanos: AtomicU64,
    total_nanos: AtomicU64,
    frame_count: AtomicU64,
}

impl Default for TimeState {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeState {
    /// Create a fresh timing state
    pub fn new() -> Self {
        Self {
            delta_nanos: AtomicU64::new(0),
            total_nanos: AtomicU64::new(0),
            frame_count: AtomicU64::new(0),
        }
    }

    /// Record the wall-time duration of a completed render tick
    pub fn record_frame(&self, elapsed: Duration) {
        let nanos = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);
        self.delta_nanos.store(nanos, Ordering::Relaxed);
        self.total_nanos.fetch_add(nanos, Ordering::Relaxed);
        self.frame_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Duration of the last render tick
    pub fn delta(&self) -> Duration {
        Duration::from_nanos(self.delta_nanos.load(Ordering::Relaxed))
    }

    /// Duration of the last render tick in seconds
    pub fn delta_seconds(&self) -> f32 {
        self.delta().as_secs_f32()
    }

    /// Number of render ticks recorded so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count.load(Ordering::Relaxed)
    }

    /// Current FPS estimate based on the last render tick
    pub fn current_fps(&self) -> f32 {
        let delta = self.delta_seconds();
        if delta > 0.0 {
            1.0 / delta
        } else {
            0.0
        }
    }

    /// Average FPS over every recorded render tick
    pub fn average_fps(&self) -> f32 {
        let total = Duration::from_nanos(self.total_nanos.load(Ordering::Relaxed)).as_secs_f32();
        if total > 0.0 {
            self.frame_count() as f32 / total
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_starts_at_zero() {
        let time = TimeState::new();
        assert_eq!(time.frame_count(), 0);
        assert_relative_eq!(time.delta_seconds(), 0.0);
        assert_relative_eq!(time.current_fps(), 0.0);
    }

    #[test]
    fn test_record_frame() {
        let time = TimeState::new();
        time.record_frame(Duration::from_millis(20));
        time.record_frame(Duration::from_millis(10));

        assert_eq!(time.frame_count(), 2);
        assert_relative_eq!(time.delta_seconds(), 0.010, epsilon = 1e-6);
        assert_relative_eq!(time.current_fps(), 100.0, epsilon = 1e-3);
    }

    #[test]
    fn test_average_fps() {
        let time = TimeState::new();
        for _ in 0..4 {
            time.record_frame(Duration::from_millis(25));
        }
        assert_relative_eq!(time.average_fps(), 40.0, epsilon = 1e-3);
    }
}
