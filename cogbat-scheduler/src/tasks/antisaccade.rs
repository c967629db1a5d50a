use cogbat_core::{CueColor, Frame, InputEvent, Key, Phase, Response, Side, Stimulus};
use rand::Rng;

use crate::config::TaskConfig;
use crate::task::{InputOutcome, Partial, Task, Verdict};
use crate::trial::PresentStep;

/// Antisaccade task: a colored cue appears left or right. Green asks for
/// the arrow key on the same side, red for the opposite side.
#[derive(Debug, Clone, Default)]
pub struct Antisaccade;

/// The arrow key that scores as correct for a cue.
pub fn correct_key(side: Side, color: CueColor) -> Key {
    let target = match color {
        CueColor::Green => side,
        CueColor::Red => side.opposite(),
    };
    match target {
        Side::Left => Key::ArrowLeft,
        Side::Right => Key::ArrowRight,
    }
}

impl Task for Antisaccade {
    fn name(&self) -> &'static str {
        "antisaccade"
    }

    fn instructions(&self) -> &'static str {
        "A colored circle will appear on the left or right.\n\
         GREEN circle: press the arrow key on the SAME side.\n\
         RED circle: press the arrow key on the OPPOSITE side.\n\
         Respond as quickly as you can. Press space to begin."
    }

    fn config(&self) -> TaskConfig {
        TaskConfig {
            practice_trials: 3,
            main_trials: 10,
            response_window_ms: Some(2_500),
            feedback_ms: 700,
        }
    }

    fn next_stimulus<R: Rng>(&self, _phase: Phase, _index: usize, rng: &mut R) -> Stimulus {
        Stimulus::Cue {
            side: if rng.random_bool(0.5) { Side::Left } else { Side::Right },
            color: if rng.random_bool(0.5) { CueColor::Red } else { CueColor::Green },
        }
    }

    // The cue stays up for the whole response window.
    fn presentation(&self, _stimulus: &Stimulus) -> Vec<PresentStep> {
        Vec::new()
    }

    fn response_frame(&self, stimulus: &Stimulus, _partial: &Partial) -> Frame {
        match stimulus {
            Stimulus::Cue { side, color } => Frame::Cue { side: *side, color: *color },
            _ => Frame::Blank,
        }
    }

    fn accept(&self, _stimulus: &Stimulus, _partial: &Partial, input: &InputEvent) -> InputOutcome {
        match input {
            InputEvent::Key { key: key @ (Key::ArrowLeft | Key::ArrowRight), .. } => {
                InputOutcome::Resolve(Response::Key { key: *key })
            }
            _ => InputOutcome::Ignore,
        }
    }

    fn judge(&self, _phase: Phase, stimulus: &Stimulus, response: &Response) -> Verdict {
        let correct = match (stimulus, response) {
            (Stimulus::Cue { side, color }, Response::Key { key }) => {
                *key == correct_key(*side, *color)
            }
            _ => false,
        };
        Verdict::new(correct, if correct { "Correct." } else { "Incorrect." })
    }
}
