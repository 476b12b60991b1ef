use aiengine_common::{AiEngineError, Result};
use aiengine_nlp::{EntityRecognizer, EntitySpan};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use crate::llm_trait::LlmClient;
use crate::prompts::entity_prompt;
use crate::types::GenerateRequest;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EntityReply {
    Wrapped { entities: Vec<EntitySpan> },
    Bare(Vec<EntitySpan>),
}

/// Entity recognizer backed by an Ollama model in JSON mode
pub struct OllamaEntityRecognizer {
    client: Arc<dyn LlmClient>,
    model: String,
}

impl OllamaEntityRecognizer {
    pub fn new(client: Arc<dyn LlmClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl EntityRecognizer for OllamaEntityRecognizer {
    async fn recognize(&self, text: &str) -> Result<Vec<EntitySpan>> {
        let request =
            GenerateRequest::deterministic(self.model.clone(), entity_prompt(text)).with_json_format();
        let response = self.client.generate(request).await?;

        let spans = parse_entity_reply(&response)?;
        let total = spans.len();

        // The model may paraphrase; keep only spans that occur in the input
        let lowered = text.to_lowercase();
        let spans: Vec<EntitySpan> = spans
            .into_iter()
            .filter(|s| lowered.contains(&s.text.trim().to_lowercase()))
            .collect();

        debug!("{} of {} spans from {} found in input", spans.len(), total, self.model);
        Ok(spans)
    }

    fn name(&self) -> &str {
        "llm"
    }
}

fn parse_entity_reply(raw: &str) -> Result<Vec<EntitySpan>> {
    let reply: EntityReply = serde_json::from_str(raw.trim()).map_err(|e| {
        AiEngineError::model(format!("Entity model returned malformed JSON: {}", e))
    })?;

    Ok(match reply {
        EntityReply::Wrapped { entities } => entities,
        EntityReply::Bare(entities) => entities,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use aiengine_nlp::EntityLabel;

    struct ScriptedClient(String);

    #[async_trait]
    impl LlmClient for ScriptedClient {
        async fn generate(&self, request: GenerateRequest) -> Result<String> {
            assert_eq!(request.format.as_deref(), Some("json"));
            Ok(self.0.clone())
        }

        async fn test_connection(&self) -> Result<bool> {
            Ok(true)
        }
    }

    fn recognizer(reply: &str) -> OllamaEntityRecognizer {
        OllamaEntityRecognizer::new(Arc::new(ScriptedClient(reply.to_string())), "llama3.2")
    }

    #[tokio::test]
    async fn test_parses_wrapped_reply_and_drops_hallucinations() {
        let reply = r#"{"entities": [
            {"text": "Apple Inc.", "label": "ORG"},
            {"text": "Steve Jobs", "label": "PERSON"},
            {"text": "Cupertino", "label": "GPE"},
            {"text": "California", "label": "GPE"}
        ]}"#;

        let spans = recognizer(reply)
            .recognize("Apple Inc. was founded by Steve Jobs in California.")
            .await
            .unwrap();

        assert_eq!(
            spans,
            vec![
                EntitySpan::new("Apple Inc.", EntityLabel::Org),
                EntitySpan::new("Steve Jobs", EntityLabel::Person),
                EntitySpan::new("California", EntityLabel::Gpe),
            ]
        );
    }

    #[tokio::test]
    async fn test_parses_bare_array() {
        let spans = recognizer(r#"[{"text": "1999", "label": "DATE"}]"#)
            .recognize("Back in 1999.")
            .await
            .unwrap();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].label, EntityLabel::Date);
    }

    #[tokio::test]
    async fn test_malformed_reply_is_an_error() {
        let err = recognizer("not json").recognize("Some text").await.unwrap_err();
        assert_eq!(err.status_code(), 500);
        assert!(err.to_string().contains("malformed JSON"));
    }
}
