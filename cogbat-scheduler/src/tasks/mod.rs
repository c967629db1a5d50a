pub mod antisaccade;
pub mod balloon;
pub mod corsi;
pub mod digit_span;

pub use antisaccade::Antisaccade;
pub use balloon::BalloonRisk;
pub use corsi::Corsi;
pub use digit_span::DigitSpan;
