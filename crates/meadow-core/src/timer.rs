use std::time::{Duration, Instant};

/// Cancelable periodic timer driven by explicit instants.
///
/// The owner polls it with the current time; it reports whether a period
/// boundary passed since the last firing. Missed periods are skipped rather
/// than replayed in a burst, so a stalled host fires once on resume.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    period: Duration,
    next_due: Instant,
    cancelled: bool,
}

impl IntervalTimer {
    /// Arm a timer whose first firing is one `period` after `now`.
    ///
    /// A zero period is raised to one millisecond.
    pub fn new(period: Duration, now: Instant) -> Self {
        let period = period.max(Duration::from_millis(1));
        Self {
            period,
            next_due: now + period,
            cancelled: false,
        }
    }

    /// Returns `true` when the timer fires at `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.cancelled || now < self.next_due {
            return false;
        }
        let mut skipped = 0u32;
        self.next_due += self.period;
        while self.next_due <= now {
            self.next_due += self.period;
            skipped += 1;
        }
        if skipped > 0 {
            tracing::debug!(skipped, "interval timer skipped missed periods");
        }
        true
    }

    /// Time left until the next firing, `None` once cancelled.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        if self.cancelled {
            return None;
        }
        Some(self.next_due.saturating_duration_since(now))
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}
