pub mod charts;
pub mod db;
pub mod sentiment_llm;

pub use charts::SentimentChartBuilder;
pub use db::DbAdapter;
pub use sentiment_llm::OpenAiSentimentAdapter;
