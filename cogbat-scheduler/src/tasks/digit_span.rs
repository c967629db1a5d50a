use cogbat_core::{Frame, InputEvent, Phase, Response, Stimulus};
use rand::Rng;

use crate::config::TaskConfig;
use crate::task::{InputOutcome, Partial, Task, Verdict};
use crate::trial::PresentStep;

const FIXATION_MS: u64 = 800;
const DIGIT_MS: u64 = 900;

const PRACTICE_SEQUENCES: &[&[u8]] = &[&[3, 1, 7]];

const TASK_SEQUENCES: &[&[u8]] = &[
    &[4, 9, 2],
    &[1, 8, 6],
    &[7, 3, 5],
    &[9, 0, 4],
    &[2, 6, 1],
    &[5, 9, 3],
    &[8, 4, 7],
    &[0, 2, 9],
    &[6, 1, 8],
    &[3, 7, 0],
];

/// Digit span: memorize a digit sequence shown one digit at a time, then
/// type it back in order.
#[derive(Debug, Clone, Default)]
pub struct DigitSpan;

fn sequence_for(phase: Phase, index: usize) -> &'static [u8] {
    let table = if phase.is_practice() { PRACTICE_SEQUENCES } else { TASK_SEQUENCES };
    table[index % table.len()]
}

fn digits_string(digits: &[u8]) -> String {
    digits.iter().map(|d| char::from(b'0' + d)).collect()
}

impl Task for DigitSpan {
    fn name(&self) -> &'static str {
        "digit_span"
    }

    fn instructions(&self) -> &'static str {
        "You will see a short sequence of digits, one at a time.\n\
         Memorize them in order. When the sequence ends, type the digits\n\
         and press Enter. Press space to begin."
    }

    fn config(&self) -> TaskConfig {
        TaskConfig {
            practice_trials: 1,
            main_trials: 10,
            response_window_ms: None,
            feedback_ms: 1_300,
        }
    }

    fn next_stimulus<R: Rng>(&self, phase: Phase, index: usize, _rng: &mut R) -> Stimulus {
        Stimulus::DigitSequence {
            digits: sequence_for(phase, index).to_vec(),
        }
    }

    fn presentation(&self, stimulus: &Stimulus) -> Vec<PresentStep> {
        let Stimulus::DigitSequence { digits } = stimulus else {
            return Vec::new();
        };
        let mut plan = vec![PresentStep::new(Frame::Fixation, FIXATION_MS)];
        plan.extend(digits.iter().map(|d| PresentStep::new(Frame::Digit(*d), DIGIT_MS)));
        plan
    }

    fn response_frame(&self, _stimulus: &Stimulus, _partial: &Partial) -> Frame {
        Frame::Mask
    }

    fn accept(&self, _stimulus: &Stimulus, _partial: &Partial, input: &InputEvent) -> InputOutcome {
        match input {
            InputEvent::Submit(text) => {
                let text = text.trim();
                if text.is_empty() {
                    InputOutcome::Reject("Please type the digits you remember.".to_string())
                } else {
                    InputOutcome::Resolve(Response::Typed { text: text.to_string() })
                }
            }
            _ => InputOutcome::Ignore,
        }
    }

    fn judge(&self, phase: Phase, stimulus: &Stimulus, response: &Response) -> Verdict {
        let (Stimulus::DigitSequence { digits }, Response::Typed { text }) = (stimulus, response)
        else {
            return Verdict::new(false, "Incorrect.");
        };
        let expected = digits_string(digits);
        let correct = *text == expected;
        // Practice reveals the right answer either way.
        let feedback = if phase.is_practice() {
            if correct {
                format!("Correct! The digits were {expected}.")
            } else {
                format!("For practice, the correct order was {expected}.")
            }
        } else if correct {
            "Correct!".to_string()
        } else {
            "Incorrect.".to_string()
        };
        Verdict::new(correct, feedback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn practice_sequence_scores_exact_string() {
        let task = DigitSpan;
        let stim = Stimulus::DigitSequence { digits: vec![3, 1, 7] };
        let typed = |s: &str| Response::Typed { text: s.to_string() };
        assert!(task.judge(Phase::Practice, &stim, &typed("317")).correct);
        assert!(!task.judge(Phase::Practice, &stim, &typed("371")).correct);
    }

    #[test]
    fn empty_submission_is_rejected() {
        let task = DigitSpan;
        let stim = Stimulus::DigitSequence { digits: vec![4, 9, 2] };
        let outcome = task.accept(&stim, &Partial::None, &InputEvent::Submit("  ".to_string()));
        assert!(matches!(outcome, InputOutcome::Reject(_)));
    }

    #[test]
    fn presentation_reveals_one_digit_per_step() {
        let task = DigitSpan;
        let stim = Stimulus::DigitSequence { digits: vec![4, 9, 2] };
        let plan = task.presentation(&stim);
        assert_eq!(plan.len(), 4);
        assert_eq!(plan[0].frame, Frame::Fixation);
        assert_eq!(plan[1].frame, Frame::Digit(4));
        assert_eq!(plan[3].frame, Frame::Digit(2));
    }

    #[test]
    fn task_sequences_cycle_by_index() {
        assert_eq!(sequence_for(Phase::Main, 0), &[4, 9, 2]);
        assert_eq!(sequence_for(Phase::Main, 9), &[3, 7, 0]);
        assert_eq!(sequence_for(Phase::Main, 10), &[4, 9, 2]);
        assert_eq!(sequence_for(Phase::Practice, 0), &[3, 1, 7]);
    }
}
