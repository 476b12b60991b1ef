use aiengine_common::{AppConfig, NerBackend, Result};
use aiengine_llm::{LlmClient, OllamaClient, OllamaEntityRecognizer, OllamaSummaryModel};
use aiengine_nlp::{
    EntityExtractor, EntityRecognizer, KeywordExtractor, RuleBasedRecognizer, Summarizer,
    SummaryModel, TermScorer, TfidfScorer,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Shared application state
///
/// Built once at startup; handlers only read from it.
pub struct AppState {
    /// Entity extraction handler
    pub entities: EntityExtractor,

    /// Keyword extraction handler
    pub keywords: KeywordExtractor,

    /// Summarization handler
    pub summarizer: Summarizer,

    /// LLM client, if any backend uses one
    pub llm: Option<Arc<dyn LlmClient>>,

    /// Startup timestamp
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Create state from explicit model backends
    pub fn new(
        recognizer: Arc<dyn EntityRecognizer>,
        scorer: Arc<dyn TermScorer>,
        summary_model: Arc<dyn SummaryModel>,
    ) -> Self {
        Self {
            entities: EntityExtractor::new(recognizer),
            keywords: KeywordExtractor::new(scorer),
            summarizer: Summarizer::new(summary_model),
            llm: None,
            started_at: Utc::now(),
        }
    }

    /// Load the model backends named by the configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let client: Arc<dyn LlmClient> = Arc::new(OllamaClient::new(
            &config.ollama_base_url,
            Duration::from_secs(config.llm_timeout_secs),
        )?);

        let recognizer: Arc<dyn EntityRecognizer> = match config.ner_backend {
            NerBackend::Rules => Arc::new(RuleBasedRecognizer::new()),
            NerBackend::Llm => Arc::new(OllamaEntityRecognizer::new(client.clone(), &config.ner_model)),
        };
        let summary_model: Arc<dyn SummaryModel> =
            Arc::new(OllamaSummaryModel::new(client.clone(), &config.summary_model));

        info!(
            "Models loaded - NER: {} | Keywords: tf-idf | Summary: {}",
            config.ner_backend.as_str(),
            config.summary_model
        );

        let mut state = Self::new(recognizer, Arc::new(TfidfScorer::new()), summary_model);
        state.llm = Some(client);
        Ok(state)
    }

    /// Log whether the model server answers; never fails startup
    pub async fn probe_models(&self) {
        let Some(client) = &self.llm else {
            return;
        };

        match client.test_connection().await {
            Ok(true) => info!("Model server reachable"),
            Ok(false) => warn!("Model server answered with an error status"),
            Err(e) => warn!("Model server unreachable, requests will fail until it is up: {}", e),
        }
    }
}
