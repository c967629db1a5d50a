use cogbat_core::{Frame, InputEvent, Key, Phase, Response, Stimulus};
use rand::Rng;

use crate::config::TaskConfig;
use crate::task::{InputOutcome, Partial, Task, Verdict};
use crate::trial::PresentStep;

pub const PUMP_CENTS: u32 = 5;
pub const MAX_PUMPS: u8 = 32;

const BANK_FEEDBACK_MS: u64 = 900;
const POP_FEEDBACK_MS: u64 = 1_100;

/// Balloon analogue risk task: each pump adds five cents to the round
/// value, but a hidden pump count pops the balloon and forfeits it.
/// Banking first keeps the round value.
#[derive(Debug, Clone, Default)]
pub struct BalloonRisk;

pub fn format_cents(cents: u32) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}

fn pumps_of(partial: &Partial) -> u8 {
    match partial {
        Partial::Pumps(p) => *p,
        _ => 0,
    }
}

impl Task for BalloonRisk {
    fn name(&self) -> &'static str {
        "balloon"
    }

    fn instructions(&self) -> &'static str {
        "Pump the balloon with space. Every pump is worth $0.05, but the\n\
         balloon can pop at any point and a popped balloon pays nothing.\n\
         Press Enter to bank the money before it pops. Press space to begin."
    }

    fn config(&self) -> TaskConfig {
        TaskConfig {
            practice_trials: 1,
            main_trials: 10,
            response_window_ms: None,
            feedback_ms: BANK_FEEDBACK_MS,
        }
    }

    fn next_stimulus<R: Rng>(&self, _phase: Phase, _index: usize, rng: &mut R) -> Stimulus {
        Stimulus::Balloon {
            threshold: rng.random_range(1..=MAX_PUMPS),
        }
    }

    fn presentation(&self, _stimulus: &Stimulus) -> Vec<PresentStep> {
        Vec::new()
    }

    fn response_frame(&self, _stimulus: &Stimulus, partial: &Partial) -> Frame {
        let pumps = pumps_of(partial);
        Frame::Balloon {
            pumps,
            value_cents: u32::from(pumps) * PUMP_CENTS,
        }
    }

    fn accept(&self, stimulus: &Stimulus, partial: &Partial, input: &InputEvent) -> InputOutcome {
        let Stimulus::Balloon { threshold } = stimulus else {
            return InputOutcome::Ignore;
        };
        let pumps = pumps_of(partial);
        match input {
            InputEvent::Key { key: Key::Space, .. } => {
                let pumps = pumps.saturating_add(1);
                if pumps >= *threshold {
                    InputOutcome::Resolve(Response::Exploded { pumps })
                } else {
                    InputOutcome::Progress(Partial::Pumps(pumps))
                }
            }
            InputEvent::Key { key: Key::Enter, .. } => {
                InputOutcome::Resolve(Response::Banked { pumps })
            }
            _ => InputOutcome::Ignore,
        }
    }

    fn judge(&self, phase: Phase, _stimulus: &Stimulus, response: &Response) -> Verdict {
        match response {
            Response::Banked { pumps } => {
                let cents = u32::from(*pumps) * PUMP_CENTS;
                if phase.is_practice() {
                    // Practice balloons never credit the bank.
                    Verdict {
                        correct: true,
                        payout_cents: Some(0),
                        feedback: "Practice balloon finished. The real balloons start next."
                            .to_string(),
                    }
                } else {
                    Verdict {
                        correct: true,
                        payout_cents: Some(cents),
                        feedback: format!("You banked {} for this balloon.", format_cents(cents)),
                    }
                }
            }
            Response::Exploded { .. } => Verdict {
                correct: false,
                payout_cents: Some(0),
                feedback: if phase.is_practice() {
                    "The balloon popped, but this was just practice.".to_string()
                } else {
                    "The balloon popped! You earned $0.00 for this balloon.".to_string()
                },
            },
            _ => Verdict::new(false, "Incorrect."),
        }
    }

    fn feedback_ms(&self, verdict: &Verdict) -> u64 {
        if verdict.correct {
            BANK_FEEDBACK_MS
        } else {
            POP_FEEDBACK_MS
        }
    }
}
