use serde::{Deserialize, Serialize};

/// Keys the tasks care about. Everything else is dropped at the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Space,
    Enter,
    Char(char),
}

/// One input event from the front end, already normalized.
///
/// `repeat` marks auto-repeated key-down events; the scheduler ignores
/// those so holding a key cannot resolve or progress a trial.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key { key: Key, repeat: bool },
    /// A typed string submitted with Enter.
    Submit(String),
    /// A pointer tap on a designated region (block index).
    Tap(u8),
}

impl InputEvent {
    pub fn key(key: Key) -> Self {
        InputEvent::Key { key, repeat: false }
    }
}

/// The recorded response value of a resolved trial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Response {
    Key { key: Key },
    Typed { text: String },
    Taps { taps: Vec<u8> },
    Banked { pumps: u8 },
    Exploded { pumps: u8 },
}
