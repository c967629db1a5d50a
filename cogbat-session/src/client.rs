use std::time::Duration;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::protocol::{
    HelpReply, NextReply, RecordRequest, ResponsePayload, SessionId, SessionRequest, StartReply,
    StartRequest,
};

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport failure, non-success status or an undecodable reply.
    #[error("experiment service request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("experiment service returned an empty session id")]
    EmptySession,
}

/// Blocking client for the trial-serving API. Holds one session at a time
/// from the caller's point of view; a slow `record` simply delays the next
/// `next` call.
pub struct SessionClient {
    http: reqwest::blocking::Client,
    base_url: String,
    exp_type: String,
}

impl SessionClient {
    pub fn new(base_url: &str, exp_type: &str) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            exp_type: exp_type.to_string(),
        })
    }

    pub fn exp_type(&self) -> &str {
        &self.exp_type
    }

    fn url(&self, op: &str) -> String {
        format!("{}/api/{}/{}", self.base_url, self.exp_type, op)
    }

    /// Begin a session. Failure here is fatal to the run and surfaced to
    /// the caller.
    pub fn start(&self, config: Value) -> Result<SessionId> {
        let reply: StartReply = self
            .http
            .post(self.url("start"))
            .json(&StartRequest { config })
            .send()?
            .error_for_status()?
            .json()?;
        if reply.session_id.0.is_empty() {
            return Err(ClientError::EmptySession);
        }
        debug!(session = %reply.session_id, exp_type = %self.exp_type, "session started");
        Ok(reply.session_id)
    }

    /// Fetch the next trial or the completion signal.
    pub fn next(&self, session_id: &SessionId) -> Result<NextReply> {
        let reply = self
            .http
            .post(self.url("next"))
            .json(&SessionRequest { session_id })
            .send()?
            .error_for_status()?
            .json()?;
        Ok(reply)
    }

    /// Submit a response for scoring, fire-and-forget: the ack body is not
    /// used and a failure is logged rather than propagated — progression is
    /// driven by the next `next` call either way.
    pub fn record(&self, session_id: &SessionId, response: &ResponsePayload) {
        let result = self
            .http
            .post(self.url("record"))
            .json(&RecordRequest { session_id, response })
            .send()
            .and_then(|r| r.error_for_status());
        if let Err(err) = result {
            warn!(trial = response.trial_number, %err, "record submission failed");
        }
    }

    /// Static help text for display.
    pub fn help(&self) -> Result<String> {
        let reply: HelpReply = self
            .http
            .get(self.url("help"))
            .send()?
            .error_for_status()?
            .json()?;
        Ok(reply.help_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_follow_the_api_layout() {
        let client = SessionClient::new("http://localhost:5000/", "digit_span").unwrap();
        assert_eq!(client.url("start"), "http://localhost:5000/api/digit_span/start");
        assert_eq!(client.url("help"), "http://localhost:5000/api/digit_span/help");
    }
}
