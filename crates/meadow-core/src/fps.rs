use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Frames-per-second over a sliding window, for the HUD readout.
pub struct FpsMeter {
    frames: VecDeque<Instant>,
    window: Duration,
}

impl Default for FpsMeter {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl FpsMeter {
    pub fn new(window: Duration) -> Self {
        Self {
            frames: VecDeque::new(),
            window,
        }
    }

    /// Record a rendered frame.
    pub fn record(&mut self, now: Instant) {
        self.frames.push_back(now);
        while let Some(&oldest) = self.frames.front() {
            match now.checked_duration_since(oldest) {
                Some(age) if age > self.window => {
                    self.frames.pop_front();
                }
                _ => break,
            }
        }
    }

    /// Frame rate measured between the oldest and newest frame in the window.
    ///
    /// `0.0` until two frames with distinct timestamps are recorded.
    pub fn fps(&self) -> f64 {
        let (Some(first), Some(last)) = (self.frames.front(), self.frames.back()) else {
            return 0.0;
        };
        let span = last.duration_since(*first).as_secs_f64();
        if span <= 0.0 {
            return 0.0;
        }
        (self.frames.len() - 1) as f64 / span
    }
}
