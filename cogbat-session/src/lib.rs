pub mod client;
pub mod protocol;

pub use client::{ClientError, SessionClient};
pub use protocol::{
    NextReply, ResponsePayload, SessionId, StimulusPayload, TrialPayload,
};
