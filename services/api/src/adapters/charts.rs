//! services/api/src/adapters/charts.rs
//!
//! This module contains the chart data builder, the concrete implementation
//! of the `ChartDataService` port. It turns the full record set into the two
//! payloads the dashboards render: a sentiment distribution and a
//! trend-over-time with a rolling mean.

use feedback_core::domain::{
    ChartSet, DistributionChart, FeedbackRecord, Sentiment, TrendChart, TrendPoint, TrendSeries,
};
use feedback_core::ports::ChartDataService;

const COLOR_POSITIVE: &str = "#52c41a";
const COLOR_NEUTRAL: &str = "#1890ff";
const COLOR_NEGATIVE: &str = "#f5222d";
const COLOR_TREND: &str = "#722ed1";

/// Rolling mean window for the trend line; shrinks when there are fewer
/// records than the window.
const TREND_WINDOW: usize = 3;

const SENTIMENT_COLORS: &[(Sentiment, &str)] = &[
    (Sentiment::Positive, COLOR_POSITIVE),
    (Sentiment::Neutral, COLOR_NEUTRAL),
    (Sentiment::Negative, COLOR_NEGATIVE),
];

/// Positive feedback plots at 1, neutral at 0, negative at -1.
fn sentiment_value(sentiment: Sentiment) -> f64 {
    match sentiment {
        Sentiment::Positive => 1.0,
        Sentiment::Neutral => 0.0,
        Sentiment::Negative => -1.0,
    }
}

//=========================================================================================
// The Main Builder Struct
//=========================================================================================

/// Builds the distribution and trend chart payloads from the record set.
#[derive(Clone, Default)]
pub struct SentimentChartBuilder;

impl SentimentChartBuilder {
    pub fn new() -> Self {
        Self
    }
}

impl ChartDataService for SentimentChartBuilder {
    fn build_charts(&self, records: &[FeedbackRecord]) -> Option<ChartSet> {
        if records.is_empty() {
            return None;
        }

        let mut ordered: Vec<&FeedbackRecord> = records.iter().collect();
        ordered.sort_by_key(|record| record.timestamp);

        // Distribution: only sentiments that actually occur appear.
        let mut labels = Vec::new();
        let mut values = Vec::new();
        let mut colors = Vec::new();
        for (sentiment, color) in SENTIMENT_COLORS {
            let count = ordered
                .iter()
                .filter(|record| record.sentiment == *sentiment)
                .count() as u64;
            if count > 0 {
                labels.push(sentiment.as_str().to_string());
                values.push(count);
                colors.push(color.to_string());
            }
        }

        // One marker series per present sentiment.
        let mut series = Vec::new();
        for (sentiment, color) in SENTIMENT_COLORS {
            let points: Vec<TrendPoint> = ordered
                .iter()
                .filter(|record| record.sentiment == *sentiment)
                .map(|record| TrendPoint {
                    timestamp: record.timestamp,
                    value: sentiment_value(record.sentiment),
                    text: Some(record.text.clone()),
                })
                .collect();
            if !points.is_empty() {
                series.push(TrendSeries {
                    name: sentiment.as_str().to_string(),
                    color: color.to_string(),
                    points,
                });
            }
        }

        // Rolling mean over the full value sequence; partial windows at the
        // head average whatever is available.
        let sequence: Vec<f64> = ordered
            .iter()
            .map(|record| sentiment_value(record.sentiment))
            .collect();
        let window = sequence.len().min(TREND_WINDOW);
        let trend_points: Vec<TrendPoint> = sequence
            .iter()
            .enumerate()
            .map(|(i, _)| {
                let start = (i + 1).saturating_sub(window);
                let slice = &sequence[start..=i];
                TrendPoint {
                    timestamp: ordered[i].timestamp,
                    value: slice.iter().sum::<f64>() / slice.len() as f64,
                    text: None,
                }
            })
            .collect();
        series.push(TrendSeries {
            name: "Trend".to_string(),
            color: COLOR_TREND.to_string(),
            points: trend_points,
        });

        Some(ChartSet {
            distribution: DistributionChart {
                labels,
                values,
                colors,
            },
            trend: TrendChart { series },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn records(sentiments: &[Sentiment]) -> Vec<FeedbackRecord> {
        let base = Utc::now();
        sentiments
            .iter()
            .enumerate()
            .map(|(i, sentiment)| FeedbackRecord {
                id: i as i64 + 1,
                text: format!("feedback {}", i + 1),
                sentiment: *sentiment,
                timestamp: base + Duration::seconds(i as i64),
            })
            .collect()
    }

    #[test]
    fn empty_record_set_builds_nothing() {
        assert!(SentimentChartBuilder::new().build_charts(&[]).is_none());
    }

    #[test]
    fn distribution_lists_only_present_sentiments() {
        let set = SentimentChartBuilder::new()
            .build_charts(&records(&[Sentiment::Negative, Sentiment::Negative]))
            .unwrap();
        assert_eq!(set.distribution.labels, vec!["Negative"]);
        assert_eq!(set.distribution.values, vec![2]);
        assert_eq!(set.distribution.colors, vec![COLOR_NEGATIVE]);
    }

    #[test]
    fn distribution_counts_per_sentiment() {
        let set = SentimentChartBuilder::new()
            .build_charts(&records(&[
                Sentiment::Positive,
                Sentiment::Neutral,
                Sentiment::Positive,
                Sentiment::Negative,
            ]))
            .unwrap();
        assert_eq!(set.distribution.labels, vec!["Positive", "Neutral", "Negative"]);
        assert_eq!(set.distribution.values, vec![2, 1, 1]);
    }

    #[test]
    fn trend_ends_with_rolling_mean_series() {
        let set = SentimentChartBuilder::new()
            .build_charts(&records(&[
                Sentiment::Positive,
                Sentiment::Negative,
                Sentiment::Positive,
                Sentiment::Positive,
            ]))
            .unwrap();

        let trend = set.trend.series.last().unwrap();
        assert_eq!(trend.name, "Trend");
        assert_eq!(trend.color, COLOR_TREND);

        // Values 1, -1, 1, 1 with a window of 3 and partial head windows.
        let means: Vec<f64> = trend.points.iter().map(|p| p.value).collect();
        assert_eq!(means.len(), 4);
        assert!((means[0] - 1.0).abs() < 1e-9);
        assert!((means[1] - 0.0).abs() < 1e-9);
        assert!((means[2] - 1.0 / 3.0).abs() < 1e-9);
        assert!((means[3] - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn marker_series_carry_the_feedback_text() {
        let set = SentimentChartBuilder::new()
            .build_charts(&records(&[Sentiment::Neutral]))
            .unwrap();
        let markers = &set.trend.series[0];
        assert_eq!(markers.name, "Neutral");
        assert_eq!(markers.points[0].text.as_deref(), Some("feedback 1"));
        assert_eq!(markers.points[0].value, 0.0);
    }

    #[test]
    fn single_record_trend_uses_window_of_one() {
        let set = SentimentChartBuilder::new()
            .build_charts(&records(&[Sentiment::Negative]))
            .unwrap();
        let trend = set.trend.series.last().unwrap();
        assert_eq!(trend.points.len(), 1);
        assert_eq!(trend.points[0].value, -1.0);
    }
}
