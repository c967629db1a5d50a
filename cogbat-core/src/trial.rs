use serde::{Deserialize, Serialize};

use crate::phase::Phase;
use crate::response::Response;
use crate::stimulus::Stimulus;

/// Trial state machine states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrialState {
    WaitingStart,
    Presenting,
    AwaitingResponse,
    Feedback,
    Complete,
}

/// Recorded outcome of one trial. Built when the trial resolves (by input
/// or by timeout) and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialRecord {
    /// 1-based ordinal within its phase.
    pub index: usize,
    pub phase: Phase,
    pub stimulus: Stimulus,
    /// `None` when the response window expired.
    pub response: Option<Response>,
    pub rt_ms: u64,
    pub correct: bool,
    pub timeout: bool,
    /// Earnings for this trial, in cents (balloon task only).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub payout_cents: Option<u32>,
}

/// One participant: an id plus the ordered main-phase trial log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: u32,
    pub trials: Vec<TrialRecord>,
}

impl Participant {
    pub fn correct_count(&self) -> usize {
        self.trials.iter().filter(|t| t.correct).count()
    }

    /// Mean response time over all trials, rounded to whole milliseconds.
    pub fn mean_rt_ms(&self) -> Option<u64> {
        if self.trials.is_empty() {
            return None;
        }
        let sum: u64 = self.trials.iter().map(|t| t.rt_ms).sum();
        Some((sum as f64 / self.trials.len() as f64).round() as u64)
    }

    /// Total banked earnings in cents (balloon task).
    pub fn total_payout_cents(&self) -> u32 {
        self.trials.iter().filter_map(|t| t.payout_cents).sum()
    }
}
