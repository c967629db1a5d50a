use cogbat_core::{Frame, InputEvent, Phase, Response, Stimulus};
use rand::Rng;

use crate::config::TaskConfig;
use crate::trial::PresentStep;

/// What a qualifying input does to the current trial.
#[derive(Debug, Clone, PartialEq)]
pub enum InputOutcome {
    /// Not a qualifying input for this task; drop it.
    Ignore,
    /// Qualifying but invalid (e.g. empty submission): show the message,
    /// keep the trial open.
    Reject(String),
    /// Part of a multi-step response (Corsi taps, balloon pumps).
    Progress(Partial),
    /// The response that resolves the trial.
    Resolve(Response),
}

/// Accumulated partial response within one trial.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Partial {
    #[default]
    None,
    Taps(Vec<u8>),
    Pumps(u8),
}

/// Scored outcome of one resolved trial.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub correct: bool,
    pub payout_cents: Option<u32>,
    pub feedback: String,
}

impl Verdict {
    pub fn new(correct: bool, feedback: impl Into<String>) -> Self {
        Self {
            correct,
            payout_cents: None,
            feedback: feedback.into(),
        }
    }
}

/// A cognitive task plugged into the scheduler: stimulus generation, input
/// classification and scoring. The scheduler owns the lifecycle; the task
/// owns everything stimulus-specific.
pub trait Task {
    fn name(&self) -> &'static str;

    fn instructions(&self) -> &'static str;

    fn config(&self) -> TaskConfig;

    /// The stimulus for trial `index` (0-based within `phase`).
    fn next_stimulus<R: Rng>(&self, phase: Phase, index: usize, rng: &mut R) -> Stimulus;

    /// Timed reveal steps run before the response window opens. An empty
    /// plan opens the window immediately.
    fn presentation(&self, stimulus: &Stimulus) -> Vec<PresentStep>;

    /// What to show while awaiting a response.
    fn response_frame(&self, stimulus: &Stimulus, partial: &Partial) -> Frame;

    /// Classify one input against the current trial.
    fn accept(&self, stimulus: &Stimulus, partial: &Partial, input: &InputEvent) -> InputOutcome;

    /// Score a resolved trial.
    fn judge(&self, phase: Phase, stimulus: &Stimulus, response: &Response) -> Verdict;

    /// Feedback dwell for this verdict.
    fn feedback_ms(&self, _verdict: &Verdict) -> u64 {
        self.config().feedback_ms
    }

    /// Feedback text when the response window expires.
    fn timeout_feedback(&self) -> String {
        "Incorrect.".to_string()
    }
}
