use serde::{Deserialize, Serialize};

/// Experiment lifecycle phases. A session advances monotonically through
/// these and never regresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Instructions,
    Practice,
    Main,
    Done,
}

impl Phase {
    pub fn next(&self) -> Option<Self> {
        use Phase::*;
        Some(match self {
            Instructions => Practice,
            Practice => Main,
            Main => Done,
            Done => return None,
        })
    }

    /// Phases in which trials run.
    pub fn is_trial_phase(&self) -> bool {
        matches!(self, Phase::Practice | Phase::Main)
    }

    pub fn is_practice(&self) -> bool {
        matches!(self, Phase::Practice)
    }

    pub fn is_main(&self) -> bool {
        matches!(self, Phase::Main)
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Phase::Done)
    }
}
