//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::classifier::SentimentClassifier;
use crate::config::Config;
use crate::web::protocol::ServerMessage;
use feedback_core::ports::{ChartDataService, FeedbackStore};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Capacity of the process-wide event channel. A dashboard that falls this
/// far behind skips ahead to the live stream instead of stalling the
/// pipeline.
pub const EVENT_CHANNEL_CAPACITY: usize = 256;

/// The shared application state, created once at startup and passed to all handlers.
///
/// Per-connection state reduces to a log id: every submission is an
/// independent pipeline run, so nothing session-shaped accumulates here.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn FeedbackStore>,
    pub classifier: SentimentClassifier,
    pub charts: Arc<dyn ChartDataService>,
    /// Fan-out to every connected client; each WebSocket connection holds a
    /// subscription and forwards what it receives.
    pub events: broadcast::Sender<ServerMessage>,
}

impl AppState {
    /// Creates the event channel for a new `AppState`.
    pub fn event_channel() -> broadcast::Sender<ServerMessage> {
        broadcast::channel(EVENT_CHANNEL_CAPACITY).0
    }
}
