//! crates/feedback_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any database or transport concern; the
//! serde derives exist because the sentiment labels and payloads cross the
//! wire verbatim.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A sentiment label. Serializes to exactly `"Positive"`, `"Neutral"` or
/// `"Negative"`. Case and spelling are load-bearing for downstream stat
/// counting, so parsing is exact-match only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// The wire form of the label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
        }
    }

    /// Parses a label, accepting only the three exact wire strings.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Positive" => Some(Sentiment::Positive),
            "Neutral" => Some(Sentiment::Neutral),
            "Negative" => Some(Sentiment::Negative),
            _ => None,
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single piece of customer feedback, as persisted.
///
/// Records are append-only: once created they are never updated or deleted,
/// only re-read for statistics and charts.
#[derive(Debug, Clone)]
pub struct FeedbackRecord {
    /// Assigned monotonically by the store; unique and immutable.
    pub id: i64,
    pub text: String,
    pub sentiment: Sentiment,
    /// Assigned by the event handler at processing time, not at store-write
    /// time. Orders the trend chart.
    pub timestamp: DateTime<Utc>,
}

/// The insert shape for a new feedback record. The store assigns the id and
/// returns the full [`FeedbackRecord`].
#[derive(Debug, Clone)]
pub struct NewFeedback {
    pub text: String,
    pub sentiment: Sentiment,
    pub timestamp: DateTime<Utc>,
}

/// Aggregate counts over the full record set. Derived fresh on every
/// submission, never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AggregateStats {
    pub total: u64,
    pub positive: u64,
    pub neutral: u64,
    pub negative: u64,
}

//=========================================================================================
// Chart Payloads
//=========================================================================================
// The pipeline forwards these to connected dashboards unmodified; it never
// inspects their internals.

/// Per-sentiment share of all feedback so far. Only sentiments that actually
/// occur are present.
#[derive(Debug, Clone, Serialize)]
pub struct DistributionChart {
    pub labels: Vec<String>,
    pub values: Vec<u64>,
    pub colors: Vec<String>,
}

/// One point of a trend series.
#[derive(Debug, Clone, Serialize)]
pub struct TrendPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
    /// The original feedback text for marker points; absent on the rolling
    /// trend line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// A named, colored series of the trend chart.
#[derive(Debug, Clone, Serialize)]
pub struct TrendSeries {
    pub name: String,
    pub color: String,
    pub points: Vec<TrendPoint>,
}

/// Sentiment over time: one marker series per present sentiment plus a
/// rolling-mean "Trend" series, all timestamp-ascending.
#[derive(Debug, Clone, Serialize)]
pub struct TrendChart {
    pub series: Vec<TrendSeries>,
}

/// The pair of chart payloads rebuilt after every insert.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSet {
    pub distribution: DistributionChart,
    pub trend: TrendChart,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentiment_labels_are_exact() {
        assert_eq!(Sentiment::Positive.as_str(), "Positive");
        assert_eq!(Sentiment::Neutral.as_str(), "Neutral");
        assert_eq!(Sentiment::Negative.as_str(), "Negative");

        assert_eq!(Sentiment::from_label("Negative"), Some(Sentiment::Negative));
        assert_eq!(Sentiment::from_label("negative"), None);
        assert_eq!(Sentiment::from_label("POSITIVE"), None);
        assert_eq!(Sentiment::from_label(" Neutral"), None);
        assert_eq!(Sentiment::from_label(""), None);
    }

    #[test]
    fn sentiment_serializes_as_bare_label() {
        let json = serde_json::to_string(&Sentiment::Neutral).unwrap();
        assert_eq!(json, "\"Neutral\"");
    }
}
