//! crates/feedback_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of specific external implementations like databases or APIs.

use async_trait::async_trait;

use crate::domain::{ChartSet, FeedbackRecord, NewFeedback, Sentiment};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., database, network).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
    #[error("Unusable sentiment label: {0:?}")]
    InvalidLabel(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// Append-only persistence for feedback records.
///
/// `append` must be durable before it returns; concurrent appends must not
/// interleave or lose records. No update or delete surface exists.
#[async_trait]
pub trait FeedbackStore: Send + Sync {
    /// Persists a new record and returns it with its store-assigned id.
    async fn append(&self, feedback: NewFeedback) -> PortResult<FeedbackRecord>;

    /// Full scan of every record, timestamp-ascending.
    async fn list_all(&self) -> PortResult<Vec<FeedbackRecord>>;
}

/// The remote (primary) sentiment classification capability.
///
/// Implementations may fail; the never-fails contract lives one level up, in
/// the classifier that pairs this port with the deterministic fallback scorer.
#[async_trait]
pub trait SentimentAnalysisService: Send + Sync {
    /// Classifies a piece of feedback text into one of the three labels.
    async fn analyze_sentiment(&self, text: &str) -> PortResult<Sentiment>;
}

/// The chart data builder consumed by the pipeline.
///
/// A pure function boundary: given the ordered record set, produce the chart
/// payloads or nothing when there are no records. The pipeline forwards the
/// result unmodified.
pub trait ChartDataService: Send + Sync {
    fn build_charts(&self, records: &[FeedbackRecord]) -> Option<ChartSet>;
}
