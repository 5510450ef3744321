pub mod domain;
pub mod ports;
pub mod scoring;
pub mod stats;

pub use domain::{
    AggregateStats, ChartSet, DistributionChart, FeedbackRecord, NewFeedback, Sentiment,
    TrendChart, TrendPoint, TrendSeries,
};
pub use ports::{ChartDataService, FeedbackStore, PortError, PortResult, SentimentAnalysisService};
pub use scoring::score_sentiment;
pub use stats::aggregate;
