use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(&self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CueColor {
    Red,
    Green,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InkColor {
    Red,
    Green,
    Blue,
    Yellow,
}

impl InkColor {
    /// The letter key that names this ink color.
    pub fn key(&self) -> char {
        match self {
            InkColor::Red => 'r',
            InkColor::Green => 'g',
            InkColor::Blue => 'b',
            InkColor::Yellow => 'y',
        }
    }
}

/// One stimulus, as a closed set of variants. Each variant carries exactly
/// the fields that are valid for it; consumers match instead of sniffing
/// optional fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Stimulus {
    /// Lateralized colored cue (antisaccade).
    Cue { side: Side, color: CueColor },
    /// Digit sequence to memorize and type back.
    DigitSequence { digits: Vec<u8> },
    /// Ordered block indices into a 9-block grid (Corsi).
    BlockSequence { blocks: Vec<u8> },
    /// Balloon with a hidden explosion pump count.
    Balloon { threshold: u8 },
    /// A lone digit (go/no-go style remote tasks).
    SingleDigit { digit: u8 },
    /// Color word drawn in an ink color (color naming).
    WordColor { word: String, ink: InkColor },
}

impl Stimulus {
    pub fn kind(&self) -> &'static str {
        match self {
            Stimulus::Cue { .. } => "cue",
            Stimulus::DigitSequence { .. } => "digit_sequence",
            Stimulus::BlockSequence { .. } => "block_sequence",
            Stimulus::Balloon { .. } => "balloon",
            Stimulus::SingleDigit { .. } => "single_digit",
            Stimulus::WordColor { .. } => "word_color",
        }
    }
}
