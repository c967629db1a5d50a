use cogbat_core::{Frame, InputEvent, Phase, Response, Stimulus};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::TaskConfig;
use crate::task::{InputOutcome, Partial, Task, Verdict};
use crate::trial::PresentStep;

pub const GRID_BLOCKS: u8 = 9;
pub const SEQUENCE_LENGTH: usize = 4;

const FLASH_ON_MS: u64 = 600;
const FLASH_OFF_MS: u64 = 260;

/// Corsi block tapping: watch blocks light up in order, then tap the same
/// blocks in the same order.
#[derive(Debug, Clone, Default)]
pub struct Corsi;

impl Task for Corsi {
    fn name(&self) -> &'static str {
        "corsi"
    }

    fn instructions(&self) -> &'static str {
        "Blocks on a 3x3 grid will light up one after another.\n\
         Watch the order, then tap the same blocks in the same order.\n\
         Press space to begin."
    }

    fn config(&self) -> TaskConfig {
        TaskConfig {
            practice_trials: 1,
            main_trials: 10,
            response_window_ms: None,
            feedback_ms: 900,
        }
    }

    fn next_stimulus<R: Rng>(&self, _phase: Phase, _index: usize, rng: &mut R) -> Stimulus {
        let mut blocks: Vec<u8> = (0..GRID_BLOCKS).collect();
        blocks.shuffle(rng);
        blocks.truncate(SEQUENCE_LENGTH);
        Stimulus::BlockSequence { blocks }
    }

    fn presentation(&self, stimulus: &Stimulus) -> Vec<PresentStep> {
        let Stimulus::BlockSequence { blocks } = stimulus else {
            return Vec::new();
        };
        let mut plan = Vec::with_capacity(blocks.len() * 2);
        for block in blocks {
            plan.push(PresentStep::new(Frame::BlockFlash(*block), FLASH_ON_MS));
            plan.push(PresentStep::new(Frame::Blank, FLASH_OFF_MS));
        }
        plan
    }

    fn response_frame(&self, stimulus: &Stimulus, partial: &Partial) -> Frame {
        let expected = match stimulus {
            Stimulus::BlockSequence { blocks } => blocks.len(),
            _ => SEQUENCE_LENGTH,
        };
        let taps = match partial {
            Partial::Taps(taps) => taps.len(),
            _ => 0,
        };
        Frame::Grid { taps, expected }
    }

    fn accept(&self, stimulus: &Stimulus, partial: &Partial, input: &InputEvent) -> InputOutcome {
        let InputEvent::Tap(block) = input else {
            return InputOutcome::Ignore;
        };
        if *block >= GRID_BLOCKS {
            return InputOutcome::Ignore;
        }
        let Stimulus::BlockSequence { blocks } = stimulus else {
            return InputOutcome::Ignore;
        };
        let mut taps = match partial {
            Partial::Taps(taps) => taps.clone(),
            _ => Vec::new(),
        };
        taps.push(*block);
        if taps.len() >= blocks.len() {
            InputOutcome::Resolve(Response::Taps { taps })
        } else {
            InputOutcome::Progress(Partial::Taps(taps))
        }
    }

    fn judge(&self, _phase: Phase, stimulus: &Stimulus, response: &Response) -> Verdict {
        let correct = match (stimulus, response) {
            (Stimulus::BlockSequence { blocks }, Response::Taps { taps }) => taps == blocks,
            _ => false,
        };
        Verdict::new(
            correct,
            if correct {
                "Correct! You matched the sequence."
            } else {
                "That was not exactly the same sequence. Just try your best on the next one."
            },
        )
    }
}
