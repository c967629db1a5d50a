use cogbat_core::{Frame, Stimulus, TrialState};

use crate::task::Partial;

/// One timed reveal step: what to show and for how long.
#[derive(Debug, Clone, PartialEq)]
pub struct PresentStep {
    pub frame: Frame,
    pub ms: u64,
}

impl PresentStep {
    pub fn new(frame: Frame, ms: u64) -> Self {
        Self { frame, ms }
    }
}

/// The trial currently owned by the scheduler.
#[derive(Debug, Clone)]
pub struct ActiveTrial {
    /// 1-based ordinal within the current phase.
    pub index: usize,
    pub stimulus: Stimulus,
    pub plan: Vec<PresentStep>,
    pub step: usize,
    pub partial: Partial,
    /// Set when the response window opens; response times count from here.
    pub window_opened_ns: Option<u64>,
    pub state: TrialState,
    /// Feedback text and correctness, present during `Feedback`.
    pub feedback: Option<(String, bool)>,
}

impl ActiveTrial {
    pub fn new(index: usize, stimulus: Stimulus, plan: Vec<PresentStep>) -> Self {
        Self {
            index,
            stimulus,
            plan,
            step: 0,
            partial: Partial::None,
            window_opened_ns: None,
            state: TrialState::Presenting,
            feedback: None,
        }
    }
}
