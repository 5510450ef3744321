//! services/api/src/web/protocol.rs
//!
//! Defines the WebSocket message protocol between dashboard/submitter clients
//! and the API server for the feedback pipeline.
//!
//! Every frame is a tagged JSON object discriminated by a `"type"` field with
//! fixed fields per event name.

use feedback_core::domain::{AggregateStats, ChartSet, DistributionChart, Sentiment, TrendChart};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

//=========================================================================================
// Messages Sent FROM the Client TO the Server
//=========================================================================================

/// Represents the structured text messages a client can send to the server.
#[derive(Deserialize, Debug)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// A new piece of customer feedback to run through the pipeline.
    NewFeedback { feedback: String },
}

//=========================================================================================
// Messages Sent FROM the Server TO the Client
//=========================================================================================

/// The per-submission detail of a processed piece of feedback.
#[derive(Serialize, Debug, Clone)]
pub struct FeedbackDetail {
    pub text: String,
    pub sentiment: Sentiment,
    pub timestamp: DateTime<Utc>,
    pub suggested_tip: String,
    pub cookie_message: String,
}

/// The two chart payloads; both `null` while the store is empty.
#[derive(Serialize, Debug, Clone)]
pub struct ChartsPayload {
    pub pie: Option<DistributionChart>,
    pub line: Option<TrendChart>,
}

impl From<Option<ChartSet>> for ChartsPayload {
    fn from(charts: Option<ChartSet>) -> Self {
        match charts {
            Some(set) => ChartsPayload {
                pie: Some(set.distribution),
                line: Some(set.trend),
            },
            None => ChartsPayload { pie: None, line: None },
        }
    }
}

/// The full outcome of one pipeline run: feedback detail, fresh aggregate
/// stats, and the rebuilt charts. Sent to the submitter as
/// `feedback_processed` and broadcast to everyone as `update_charts`.
#[derive(Serialize, Debug, Clone)]
pub struct FeedbackResponse {
    pub feedback: FeedbackDetail,
    pub stats: AggregateStats,
    pub charts: ChartsPayload,
}

/// Represents the structured text messages the server can send to the client.
#[derive(Serialize, Debug, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Greeting sent once, immediately after the connection is established.
    ConnectionResponse { data: String },

    /// The pipeline outcome, sent to the submitting connection.
    FeedbackProcessed(FeedbackResponse),

    /// The same outcome, broadcast so every dashboard stays consistent.
    UpdateCharts(FeedbackResponse),

    /// One-way actuation signal. Consumed by the servo relay; no reply ever
    /// comes back.
    RotateServo { timestamp: DateTime<Utc> },

    /// Reports a per-submission failure to the submitting connection only.
    FeedbackError { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn to_value(message: &ServerMessage) -> Value {
        serde_json::to_value(message).unwrap()
    }

    #[test]
    fn client_message_parses_new_feedback() {
        let msg: ClientMessage =
            serde_json::from_str(r#"{"type": "new_feedback", "feedback": "not good"}"#).unwrap();
        let ClientMessage::NewFeedback { feedback } = msg;
        assert_eq!(feedback, "not good");
    }

    #[test]
    fn client_message_rejects_unknown_type() {
        assert!(serde_json::from_str::<ClientMessage>(r#"{"type": "set_mood"}"#).is_err());
    }

    #[test]
    fn connection_response_shape() {
        let value = to_value(&ServerMessage::ConnectionResponse {
            data: "Connected to server".to_string(),
        });
        assert_eq!(
            value,
            json!({"type": "connection_response", "data": "Connected to server"})
        );
    }

    #[test]
    fn rotate_servo_carries_only_a_timestamp() {
        let value = to_value(&ServerMessage::RotateServo {
            timestamp: Utc::now(),
        });
        assert_eq!(value["type"], "rotate_servo");
        assert!(value["timestamp"].is_string());
        assert_eq!(value.as_object().unwrap().len(), 2);
    }

    #[test]
    fn feedback_processed_shape_with_empty_charts() {
        let response = FeedbackResponse {
            feedback: FeedbackDetail {
                text: "The food was okay".to_string(),
                sentiment: Sentiment::Neutral,
                timestamp: Utc::now(),
                suggested_tip: "🌿 Suggested Tip: 20%, 18%, or Custom".to_string(),
                cookie_message: "🍪 Fortune cookie has been dispensed!".to_string(),
            },
            stats: AggregateStats {
                total: 1,
                positive: 0,
                neutral: 1,
                negative: 0,
            },
            charts: ChartsPayload::from(None),
        };

        let value = to_value(&ServerMessage::FeedbackProcessed(response.clone()));
        assert_eq!(value["type"], "feedback_processed");
        assert_eq!(value["feedback"]["sentiment"], "Neutral");
        assert_eq!(value["feedback"]["text"], "The food was okay");
        assert_eq!(value["stats"]["total"], 1);
        assert_eq!(value["charts"]["pie"], Value::Null);
        assert_eq!(value["charts"]["line"], Value::Null);

        let broadcast = to_value(&ServerMessage::UpdateCharts(response));
        assert_eq!(broadcast["type"], "update_charts");
        assert_eq!(broadcast["stats"], value["stats"]);
    }

    #[test]
    fn feedback_error_shape() {
        let value = to_value(&ServerMessage::FeedbackError {
            message: "Feedback cannot be empty".to_string(),
        });
        assert_eq!(
            value,
            json!({"type": "feedback_error", "message": "Feedback cannot be empty"})
        );
    }
}
