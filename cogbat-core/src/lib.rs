pub mod phase;
pub mod response;
pub mod stimulus;
pub mod trial;
pub mod view;

pub use phase::Phase;
pub use response::{InputEvent, Key, Response};
pub use stimulus::{CueColor, InkColor, Side, Stimulus};
pub use trial::{Participant, TrialRecord, TrialState};
pub use view::Frame;
