use serde::{Deserialize, Serialize};

/// Trial counts and pacing for one task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskConfig {
    pub practice_trials: usize,
    pub main_trials: usize,
    /// Response window; `None` means the trial waits indefinitely for input.
    pub response_window_ms: Option<u64>,
    pub feedback_ms: u64,
}

impl TaskConfig {
    pub fn total_for(&self, phase: cogbat_core::Phase) -> usize {
        match phase {
            cogbat_core::Phase::Practice => self.practice_trials,
            cogbat_core::Phase::Main => self.main_trials,
            _ => 0,
        }
    }
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            practice_trials: 3,
            main_trials: 10,
            response_window_ms: Some(2_500),
            feedback_ms: 700,
        }
    }
}
