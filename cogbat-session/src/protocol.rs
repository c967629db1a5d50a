//! Wire types for the trial-serving API:
//! `POST /api/{exp_type}/start|next|record`, `GET /api/{exp_type}/help`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque server-issued session handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct StartRequest {
    pub config: Value,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StartReply {
    pub session_id: SessionId,
}

#[derive(Debug, Serialize)]
pub(crate) struct SessionRequest<'a> {
    pub session_id: &'a SessionId,
}

/// Reply to `next`: either the next trial or a completion signal carrying
/// the aggregate results.
#[derive(Debug, Clone, Deserialize)]
pub struct NextReply {
    #[serde(default)]
    pub trial: Option<TrialPayload>,
    #[serde(default)]
    pub complete: bool,
    #[serde(default)]
    pub results: Option<Value>,
}

impl NextReply {
    /// The session is over when the server says so or stops sending trials.
    pub fn is_complete(&self) -> bool {
        self.complete || self.trial.is_none()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrialPayload {
    #[serde(default)]
    pub trial_number: u32,
    #[serde(default)]
    pub trial_type: Option<String>,
    pub stimulus_data: StimulusPayload,
    #[serde(default)]
    pub correct_response: Option<Value>,
    #[serde(default)]
    pub metadata: Option<Value>,
}

/// Stimulus shapes the service can send, as a closed set of variants. The
/// shape decides the input modality: digits + Enter for sequences, space
/// for a single digit, r/g/b/y for color naming.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum StimulusPayload {
    Sequence {
        #[serde(alias = "digits")]
        sequence: Vec<u8>,
    },
    WordColor {
        word: String,
        ink_color: String,
    },
    SingleDigit {
        digit: u8,
    },
}

/// One recorded response, submitted for server-side scoring.
#[derive(Debug, Clone, Serialize)]
pub struct ResponsePayload {
    pub trial_number: u32,
    pub response_value: String,
    pub response_time_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_response: Option<Value>,
    pub metadata: Value,
}

#[derive(Debug, Serialize)]
pub(crate) struct RecordRequest<'a> {
    pub session_id: &'a SessionId,
    pub response: &'a ResponsePayload,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HelpReply {
    #[serde(default)]
    pub help_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn next_reply_with_a_sequence_trial() {
        let reply: NextReply = serde_json::from_value(json!({
            "trial": {
                "trial_number": 4,
                "trial_type": "test",
                "stimulus_data": { "sequence": [4, 7, 2] },
                "correct_response": "472",
                "metadata": { "span_length": 3 }
            }
        }))
        .unwrap();
        assert!(!reply.is_complete());
        let trial = reply.trial.unwrap();
        assert_eq!(trial.trial_number, 4);
        assert_eq!(
            trial.stimulus_data,
            StimulusPayload::Sequence { sequence: vec![4, 7, 2] }
        );
    }

    #[test]
    fn sequence_accepts_the_digits_alias() {
        let stim: StimulusPayload =
            serde_json::from_value(json!({ "digits": [3, 1, 7], "length": 3 })).unwrap();
        assert_eq!(stim, StimulusPayload::Sequence { sequence: vec![3, 1, 7] });
    }

    #[test]
    fn word_color_and_single_digit_shapes_parse() {
        let stim: StimulusPayload =
            serde_json::from_value(json!({ "word": "RED", "ink_color": "green" })).unwrap();
        assert_eq!(
            stim,
            StimulusPayload::WordColor { word: "RED".to_string(), ink_color: "green".to_string() }
        );

        let stim: StimulusPayload = serde_json::from_value(json!({ "digit": 3 })).unwrap();
        assert_eq!(stim, StimulusPayload::SingleDigit { digit: 3 });
    }

    #[test]
    fn completion_reply_parses_without_a_trial() {
        let reply: NextReply = serde_json::from_value(json!({
            "complete": true,
            "results": { "max_span_achieved": 6 }
        }))
        .unwrap();
        assert!(reply.is_complete());
        assert!(reply.trial.is_none());
        assert_eq!(reply.results.unwrap()["max_span_achieved"], 6);
    }

    #[test]
    fn record_request_matches_the_wire_contract() {
        let session = SessionId("abc-123".to_string());
        let payload = ResponsePayload {
            trial_number: 2,
            response_value: "317".to_string(),
            response_time_ms: 1432.5,
            correct_response: Some(json!("317")),
            metadata: json!({}),
        };
        let body = serde_json::to_value(RecordRequest { session_id: &session, response: &payload })
            .unwrap();
        assert_eq!(body["session_id"], "abc-123");
        assert_eq!(body["response"]["trial_number"], 2);
        assert_eq!(body["response"]["response_value"], "317");
        assert_eq!(body["response"]["response_time_ms"], 1432.5);
        assert_eq!(body["response"]["metadata"], json!({}));
    }
}
