//! crates/feedback_core/src/stats.rs
//!
//! Aggregate statistics over the feedback record set.

use crate::domain::{AggregateStats, FeedbackRecord, Sentiment};

/// Recomputes the aggregate counts from the full record set.
///
/// Pure and O(n); no counters are persisted anywhere, so correctness never
/// depends on counter drift. An empty record set yields all zeros.
pub fn aggregate(records: &[FeedbackRecord]) -> AggregateStats {
    let mut stats = AggregateStats::default();
    for record in records {
        stats.total += 1;
        match record.sentiment {
            Sentiment::Positive => stats.positive += 1,
            Sentiment::Neutral => stats.neutral += 1,
            Sentiment::Negative => stats.negative += 1,
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(id: i64, sentiment: Sentiment) -> FeedbackRecord {
        FeedbackRecord {
            id,
            text: format!("feedback {id}"),
            sentiment,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn empty_set_yields_zeros() {
        assert_eq!(aggregate(&[]), AggregateStats::default());
    }

    #[test]
    fn counts_partition_the_total() {
        let records = vec![
            record(1, Sentiment::Positive),
            record(2, Sentiment::Negative),
            record(3, Sentiment::Neutral),
            record(4, Sentiment::Negative),
            record(5, Sentiment::Positive),
        ];
        let stats = aggregate(&records);
        assert_eq!(stats.total, 5);
        assert_eq!(stats.positive, 2);
        assert_eq!(stats.neutral, 1);
        assert_eq!(stats.negative, 2);
        assert_eq!(stats.positive + stats.neutral + stats.negative, stats.total);
    }

    #[test]
    fn aggregation_is_idempotent() {
        let records = vec![
            record(1, Sentiment::Neutral),
            record(2, Sentiment::Negative),
        ];
        assert_eq!(aggregate(&records), aggregate(&records));
    }
}
