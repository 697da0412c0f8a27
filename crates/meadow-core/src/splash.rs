/// Loading screen shown while assets and the scene are prepared.
///
/// Progress is tracked as completed steps out of a known total so the label
/// reads `Loading 0%` .. `Loading 100%`.
#[derive(Debug, Clone)]
pub struct Splash {
    completed: usize,
    total: usize,
    stage: String,
}

impl Splash {
    pub fn new(total_steps: usize) -> Self {
        Self {
            completed: 0,
            total: total_steps.max(1),
            stage: String::new(),
        }
    }

    /// Mark one more step finished and record what is loading next.
    pub fn advance(&mut self, next_stage: impl Into<String>) {
        self.completed = (self.completed + 1).min(self.total);
        self.stage = next_stage.into();
        tracing::debug!(percent = self.percent(), stage = %self.stage, "loading progress");
    }

    pub fn percent(&self) -> u8 {
        ((self.completed * 100) / self.total) as u8
    }

    pub fn label(&self) -> String {
        format!("Loading {}%", self.percent())
    }

    pub fn stage(&self) -> &str {
        &self.stage
    }
}
