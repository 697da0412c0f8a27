use std::time::{Duration, Instant};

/// Host-level state that is not owned by the scene itself.
pub struct AppState {
    pub started_at: Instant,
    pub status_line: String,
    pub frames_rendered: u64,
}

impl AppState {
    pub fn new(now: Instant) -> Self {
        Self {
            started_at: now,
            status_line: "THE BUNNIES ARE OUT.".to_string(),
            frames_rendered: 0,
        }
    }

    pub fn uptime(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started_at)
    }
}
