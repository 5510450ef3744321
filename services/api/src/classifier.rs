//! services/api/src/classifier.rs
//!
//! Pairs the remote sentiment service with the deterministic keyword scorer.
//! The pipeline leans on the resulting contract: `classify` always returns a
//! label and never fails, no matter what the remote side does.

use feedback_core::{score_sentiment, ports::SentimentAnalysisService, Sentiment};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

/// The sentiment classifier used by the feedback pipeline.
///
/// Tries the remote classification service first (when one is configured),
/// under a bounded wait. Any remote failure (transport error, unusable
/// label, timeout) falls through to the keyword scorer, which always
/// produces one of the three labels.
#[derive(Clone)]
pub struct SentimentClassifier {
    remote: Option<Arc<dyn SentimentAnalysisService>>,
    remote_timeout: Duration,
}

impl SentimentClassifier {
    /// Creates a classifier. Pass `None` to run on the keyword scorer alone.
    pub fn new(remote: Option<Arc<dyn SentimentAnalysisService>>, remote_timeout: Duration) -> Self {
        Self {
            remote,
            remote_timeout,
        }
    }

    /// Classifies feedback text into one of the three sentiment labels.
    pub async fn classify(&self, text: &str) -> Sentiment {
        if let Some(remote) = &self.remote {
            match timeout(self.remote_timeout, remote.analyze_sentiment(text)).await {
                Ok(Ok(sentiment)) => {
                    debug!("Remote classifier returned {sentiment}");
                    return sentiment;
                }
                Ok(Err(e)) => {
                    warn!("Remote classifier failed ({e}); using the keyword scorer");
                }
                Err(_) => {
                    warn!(
                        "Remote classifier timed out after {:?}; using the keyword scorer",
                        self.remote_timeout
                    );
                }
            }
        }

        score_sentiment(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use feedback_core::ports::{PortError, PortResult};

    struct FixedRemote(Sentiment);

    #[async_trait]
    impl SentimentAnalysisService for FixedRemote {
        async fn analyze_sentiment(&self, _text: &str) -> PortResult<Sentiment> {
            Ok(self.0)
        }
    }

    struct FailingRemote;

    #[async_trait]
    impl SentimentAnalysisService for FailingRemote {
        async fn analyze_sentiment(&self, _text: &str) -> PortResult<Sentiment> {
            Err(PortError::Unexpected("connection refused".to_string()))
        }
    }

    struct InvalidLabelRemote;

    #[async_trait]
    impl SentimentAnalysisService for InvalidLabelRemote {
        async fn analyze_sentiment(&self, _text: &str) -> PortResult<Sentiment> {
            Err(PortError::InvalidLabel("Somewhat positive".to_string()))
        }
    }

    struct StalledRemote;

    #[async_trait]
    impl SentimentAnalysisService for StalledRemote {
        async fn analyze_sentiment(&self, _text: &str) -> PortResult<Sentiment> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(Sentiment::Positive)
        }
    }

    #[tokio::test]
    async fn remote_answer_wins_when_available() {
        let classifier = SentimentClassifier::new(
            Some(Arc::new(FixedRemote(Sentiment::Negative))),
            Duration::from_secs(1),
        );
        // The remote verdict is taken as-is, even against the scorer's read.
        assert_eq!(
            classifier.classify("Food was delicious and service was great").await,
            Sentiment::Negative
        );
    }

    #[tokio::test]
    async fn remote_failure_falls_back_to_scorer() {
        let classifier =
            SentimentClassifier::new(Some(Arc::new(FailingRemote)), Duration::from_secs(1));
        assert_eq!(
            classifier.classify("Terrible service, cold food").await,
            Sentiment::Negative
        );
    }

    #[tokio::test]
    async fn invalid_label_falls_back_to_scorer() {
        let classifier =
            SentimentClassifier::new(Some(Arc::new(InvalidLabelRemote)), Duration::from_secs(1));
        assert_eq!(
            classifier.classify("Food was delicious and service was great").await,
            Sentiment::Positive
        );
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_remote_times_out_into_scorer() {
        let classifier =
            SentimentClassifier::new(Some(Arc::new(StalledRemote)), Duration::from_millis(50));
        assert_eq!(
            classifier.classify("The food was okay").await,
            Sentiment::Neutral
        );
    }

    #[tokio::test]
    async fn no_remote_means_scorer_only() {
        let classifier = SentimentClassifier::new(None, Duration::from_secs(1));
        assert_eq!(classifier.classify("not good").await, Sentiment::Negative);
    }
}
