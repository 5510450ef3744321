//! services/api/src/adapters/sentiment_llm.rs
//!
//! This module contains the adapter for the remote sentiment classifier.
//! It implements the `SentimentAnalysisService` port from the `core` crate.

const SYSTEM_INSTRUCTIONS: &str = "You are a restaurant feedback analyzer. Your task is to classify feedback as Positive, Negative, or Neutral based on the emotional tone and specific comments. Be decisive - classify mild complaints and suggestions as Negative, and only use Neutral when there is truly no clear sentiment.";

const USER_PROMPT_TEMPLATE: &str = r#"Analyze the sentiment of this restaurant feedback. Consider the emotional tone, specific comments about food, service, and overall experience.

Respond with EXACTLY one word: 'Positive', 'Neutral', or 'Negative'.

Guidelines for sentiment classification:

POSITIVE - Use when feedback expresses:
- Clear satisfaction or enjoyment ("delicious", "great", "love", "enjoyed")
- Strong positive emotions ("happy", "pleased", "impressed")
- Explicit praise ("service was excellent", "food was amazing")
- Clear intent to return ("will come back", "recommend")

NEGATIVE - Use when feedback expresses:
- Any form of dissatisfaction or disappointment
- Specific complaints ("too salty", "cold food", "slow service")
- Negative emotions ("unhappy", "frustrated", "annoyed")
- Price/value issues ("expensive", "not worth it")
- Mild complaints or suggestions ("I wish...", "could be better", "should be...")
- Service-related issues ("more patient", "faster service", "better attention")

NEUTRAL - Use ONLY when:
- Feedback is purely factual or observational
- No clear emotional tone
- Mixed feedback with equal positive and negative points
- General statements without clear sentiment

Examples:
Positive: "The food was delicious and service was excellent"
Positive: "I love the atmosphere here"
Negative: "The food was too salty"
Negative: "Not worth the price"
Negative: "I wish the server was more patient" (mild complaint)
Negative: "Could be better" (suggestion implying dissatisfaction)
Neutral: "The food was okay"
Neutral: "Nice place but a bit expensive"

Feedback: {feedback}

Sentiment:"#;

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use feedback_core::ports::{PortError, PortResult, SentimentAnalysisService};
use feedback_core::Sentiment;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `SentimentAnalysisService` using an
/// OpenAI-compatible chat model.
#[derive(Clone)]
pub struct OpenAiSentimentAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiSentimentAdapter {
    /// Creates a new `OpenAiSentimentAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }
}

//=========================================================================================
// `SentimentAnalysisService` Trait Implementation
//=========================================================================================

#[async_trait]
impl SentimentAnalysisService for OpenAiSentimentAdapter {
    /// Classifies a piece of feedback text into one of the three labels.
    ///
    /// The model is instructed to answer with exactly one label. Anything
    /// else is an `InvalidLabel` error, which sends the caller to the
    /// deterministic fallback scorer instead of a guessed label.
    async fn analyze_sentiment(&self, text: &str) -> PortResult<Sentiment> {
        let user_input = USER_PROMPT_TEMPLATE.replace("{feedback}", text);

        let messages = vec![
            ChatCompletionRequestMessage::System(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(SYSTEM_INSTRUCTIONS)
                    .build()
                    .map_err(|e| PortError::Unexpected(e.to_string()))?,
            ),
            ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessageArgs::default()
                    .content(user_input)
                    .build()
                    .map_err(|e| PortError::Unexpected(e.to_string()))?,
            ),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .max_tokens(10u32)
            .temperature(0.7)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e: OpenAIError| PortError::Unexpected(e.to_string()))?;

        let raw_label = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| PortError::Unexpected("No classification returned".to_string()))?;

        let trimmed = raw_label.trim();
        Sentiment::from_label(trimmed)
            .ok_or_else(|| PortError::InvalidLabel(trimmed.to_string()))
    }
}
