//! services/api/src/web/feedback_task.rs
//!
//! This module contains the asynchronous "worker" function responsible for
//! one feedback submission: validate, classify, persist, re-aggregate,
//! rebuild charts, and emit the outcome.

use crate::web::{
    protocol::{ChartsPayload, FeedbackDetail, FeedbackResponse, ServerMessage},
    state::AppState,
    ws_handler::{send_message, WsSender},
};
use chrono::Utc;
use feedback_core::{aggregate, domain::NewFeedback, ports::PortResult, Sentiment};
use std::sync::Arc;
use tracing::{error, info, warn};

const TIP_POSITIVE: &str = "💖 Suggested Tip: 25%, 20%, or Custom";
const TIP_NEUTRAL: &str = "🌿 Suggested Tip: 20%, 18%, or Custom";
const TIP_NEGATIVE: &str = "💙 Suggested Tip: 15% or Custom";
const COOKIE_MESSAGE: &str = "🍪 Fortune cookie has been dispensed!";

const EMPTY_FEEDBACK_ERROR: &str = "Feedback cannot be empty";

/// Trims the submission; only non-empty text reaches the pipeline.
fn validated_text(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// The tip suggestion derives purely from the sentiment label.
fn suggested_tip(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => TIP_POSITIVE,
        Sentiment::Neutral => TIP_NEUTRAL,
        Sentiment::Negative => TIP_NEGATIVE,
    }
}

/// Runs one submission through the pipeline and emits the outcome.
///
/// A rejected or failed submission reports to the submitting connection
/// only; nothing partial is ever broadcast. A submitter that disconnects
/// mid-run keeps its committed record; only the reply becomes a no-op.
pub async fn handle_submission(app_state: Arc<AppState>, ws_sender: &WsSender, raw_feedback: String) {
    let Some(text) = validated_text(&raw_feedback) else {
        warn!("Rejected empty feedback submission");
        let message = ServerMessage::FeedbackError {
            message: EMPTY_FEEDBACK_ERROR.to_string(),
        };
        if send_message(ws_sender, &message).await.is_err() {
            info!("Submitter disconnected before the rejection was delivered");
        }
        return;
    };

    match process_feedback(&app_state, text).await {
        Ok(response) => {
            // The actuator relay listens on every connection and fires for
            // every processed submission, whatever the sentiment.
            let _ = app_state.events.send(ServerMessage::RotateServo {
                timestamp: Utc::now(),
            });

            let processed = ServerMessage::FeedbackProcessed(response.clone());
            if send_message(ws_sender, &processed).await.is_err() {
                info!("Submitter disconnected before the response was delivered");
            }

            let _ = app_state.events.send(ServerMessage::UpdateCharts(response));
        }
        Err(e) => {
            error!("Error processing feedback: {e}");
            let message = ServerMessage::FeedbackError {
                message: e.to_string(),
            };
            if send_message(ws_sender, &message).await.is_err() {
                info!("Submitter disconnected before the error was delivered");
            }
        }
    }
}

/// The pipeline proper: classify, stamp, persist, aggregate, rebuild charts,
/// compose the response. Classification cannot fail; everything after it
/// reports through `PortResult` and is caught by `handle_submission`.
pub async fn process_feedback(app_state: &AppState, text: &str) -> PortResult<FeedbackResponse> {
    let sentiment = app_state.classifier.classify(text).await;
    info!("Classified feedback as {sentiment}");

    // Stamped at processing time, not at store-write time.
    let timestamp = Utc::now();
    let record = app_state
        .store
        .append(NewFeedback {
            text: text.to_string(),
            sentiment,
            timestamp,
        })
        .await?;
    info!("Stored feedback record {}", record.id);

    let records = app_state.store.list_all().await?;
    let stats = aggregate(&records);
    let charts = ChartsPayload::from(app_state.charts.build_charts(&records));

    Ok(FeedbackResponse {
        feedback: FeedbackDetail {
            text: record.text,
            sentiment: record.sentiment,
            timestamp: record.timestamp,
            suggested_tip: suggested_tip(sentiment).to_string(),
            cookie_message: COOKIE_MESSAGE.to_string(),
        },
        stats,
        charts,
    })
}
