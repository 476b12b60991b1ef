use aiengine_common::{AiEngineError, Result};
use aiengine_nlp::{SummaryLength, SummaryModel};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::llm_trait::LlmClient;
use crate::prompts::summary_prompt;
use crate::types::GenerateRequest;

/// Generation budget per summary word
const TOKENS_PER_WORD: usize = 2;

/// Summary model backed by an Ollama generation model
pub struct OllamaSummaryModel {
    client: Arc<dyn LlmClient>,
    model: String,
}

impl OllamaSummaryModel {
    /// Create new summary model
    pub fn new(client: Arc<dyn LlmClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl SummaryModel for OllamaSummaryModel {
    async fn summarize(&self, text: &str, length: SummaryLength) -> Result<String> {
        if text.trim().is_empty() {
            return Err(AiEngineError::model("Cannot summarize empty text"));
        }

        let min_length = if length.max_length < length.min_length {
            warn!(
                "Unfeasible length constraints: min_length ({}) is larger than max_length ({}), generation will stop at max_length",
                length.min_length, length.max_length
            );
            length.max_length
        } else {
            length.min_length
        };

        let num_predict = i32::try_from(length.max_length * TOKENS_PER_WORD).unwrap_or(i32::MAX);
        let request = GenerateRequest::deterministic(
            self.model.clone(),
            summary_prompt(text, min_length, length.max_length),
        )
        .with_num_predict(num_predict);

        let response = self.client.generate(request).await?;
        let summary = clamp_tokens(response.trim(), length.max_length);

        debug!(
            "Summary from {} - {} tokens (max {})",
            self.model,
            summary.split_whitespace().count(),
            length.max_length
        );

        if summary.is_empty() {
            return Err(AiEngineError::model("Summary model returned no text"));
        }

        Ok(summary)
    }

    fn name(&self) -> &str {
        &self.model
    }
}

/// Keep at most `max_tokens` whitespace-delimited tokens
fn clamp_tokens(text: &str, max_tokens: usize) -> String {
    if text.split_whitespace().count() <= max_tokens {
        return text.to_string();
    }
    text.split_whitespace()
        .take(max_tokens)
        .collect::<Vec<_>>()
        .join(" ")
}
