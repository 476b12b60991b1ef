use aiengine_nlp::{EntityFormat, DEFAULT_TOP_K};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Entity extraction request
#[derive(Debug, Deserialize)]
pub struct EntityRequest {
    /// Input text
    pub text: String,

    /// Category codes to keep
    #[serde(default)]
    pub labels: Option<Vec<String>>,

    /// Drop repeated entities
    #[serde(default)]
    pub unique: Option<bool>,
}

/// Entity extraction query parameters
#[derive(Debug, Deserialize)]
pub struct EntityQuery {
    #[serde(default)]
    pub format: EntityFormat,
}

/// Keyword extraction request
#[derive(Debug, Deserialize)]
pub struct KeywordRequest {
    /// Input text
    pub text: String,

    /// Number of keywords to return
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

/// Summarization request
#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    /// Input text
    pub text: String,
}

/// Optional `export` query parameter
#[derive(Debug, Default, Deserialize)]
pub struct ExportQuery {
    pub export: Option<String>,
}

/// Error body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub started_at: DateTime<Utc>,
    pub ner_backend: String,
    pub summary_model: String,
}
