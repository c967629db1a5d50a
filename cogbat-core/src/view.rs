use crate::stimulus::{CueColor, InkColor, Side};

/// What a front end should show at this instant. The scheduler computes
/// frames; front ends only draw them.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    Blank,
    Instructions(String),
    /// Between-trial or between-phase message waiting for a start signal.
    PhaseBreak(String),
    Fixation,
    Cue { side: Side, color: CueColor },
    Digit(u8),
    /// Recall prompt after a digit sequence has been hidden.
    Mask,
    /// The Corsi grid with one block lit.
    BlockFlash(u8),
    /// The Corsi grid, idle, accepting taps.
    Grid { taps: usize, expected: usize },
    Balloon { pumps: u8, value_cents: u32 },
    SingleDigit(u8),
    WordColor { word: String, ink: InkColor },
    /// Transient input-rejection message; the trial stays open.
    Notice(String),
    Feedback { text: String, correct: bool },
    Thanks,
}
