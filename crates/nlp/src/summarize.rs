//! Abstractive summarization with input-adaptive length bounds

use aiengine_common::{AiEngineError, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

use crate::export::Export;

/// Lower bound passed to the summary model
pub const MIN_SUMMARY_LENGTH: usize = 5;

/// Inputs shorter than this are never asked to grow
const SHORT_INPUT_TOKENS: usize = 10;

/// Floor for `max_length` on regular inputs
const MIN_MAX_LENGTH: usize = 10;

/// Token length bounds for one summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryLength {
    pub max_length: usize,
    pub min_length: usize,
}

impl SummaryLength {
    /// Bounds for an input of `input_length` whitespace tokens
    pub fn for_input_length(input_length: usize) -> Self {
        let max_length = if input_length < SHORT_INPUT_TOKENS {
            input_length
        } else {
            MIN_MAX_LENGTH.max((input_length as f64 * 0.6).floor() as usize)
        };

        Self {
            max_length,
            min_length: MIN_SUMMARY_LENGTH,
        }
    }

    /// Bounds for a text
    pub fn for_text(text: &str) -> Self {
        Self::for_input_length(count_tokens(text))
    }
}

/// Number of whitespace-delimited tokens
pub fn count_tokens(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Summarization model
#[async_trait]
pub trait SummaryModel: Send + Sync {
    /// Produce one summary within `length`, decoding deterministically
    async fn summarize(&self, text: &str, length: SummaryLength) -> Result<String>;

    /// Model name for logs and health output
    fn name(&self) -> &str;
}

/// Summarization result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryResult {
    pub summary: String,
}

/// Export format for summaries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SummaryExport {
    #[default]
    Json,
    Txt,
    Csv,
}

impl SummaryExport {
    /// Map the `export` query value; unknown values fall back to JSON
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("txt") => Self::Txt,
            Some("csv") => Self::Csv,
            _ => Self::Json,
        }
    }
}

/// Summarization handler
#[derive(Clone)]
pub struct Summarizer {
    model: Arc<dyn SummaryModel>,
}

impl Summarizer {
    pub fn new(model: Arc<dyn SummaryModel>) -> Self {
        Self { model }
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Compute bounds and invoke the model
    pub async fn summarize(&self, text: &str) -> Result<SummaryResult> {
        let length = SummaryLength::for_text(text);
        debug!(
            "Summarization - Text length: {} chars | max_length: {} | min_length: {}",
            text.len(),
            length.max_length,
            length.min_length
        );

        let summary = self
            .model
            .summarize(text, length)
            .await
            .map_err(|e| match e {
                AiEngineError::InvalidInput(msg) => AiEngineError::internal(msg),
                other => other,
            })?;

        info!("Summary generated successfully ({} chars)", summary.len());
        Ok(SummaryResult { summary })
    }

    /// Render a summary as JSON, plain text or CSV
    pub fn render(result: &SummaryResult, format: SummaryExport) -> Result<Export> {
        match format {
            SummaryExport::Json => Export::json(result),
            SummaryExport::Txt => Ok(Export::Text(result.summary.clone())),
            SummaryExport::Csv => {
                Export::csv("summary.csv", &["summary"], [[result.summary.as_str()]])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records the bounds it was called with and echoes a fixed summary
    struct RecordingModel {
        calls: Mutex<Vec<SummaryLength>>,
        reply: std::result::Result<String, String>,
    }

    impl RecordingModel {
        fn ok(reply: &str) -> Self {
            Self { calls: Mutex::new(Vec::new()), reply: Ok(reply.to_string()) }
        }

        fn failing(msg: &str) -> Self {
            Self { calls: Mutex::new(Vec::new()), reply: Err(msg.to_string()) }
        }
    }

    #[async_trait]
    impl SummaryModel for RecordingModel {
        async fn summarize(&self, _text: &str, length: SummaryLength) -> Result<String> {
            self.calls.lock().unwrap().push(length);
            self.reply.clone().map_err(AiEngineError::model)
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    #[test]
    fn test_short_inputs_use_their_own_length() {
        for n in 0..10 {
            assert_eq!(SummaryLength::for_input_length(n).max_length, n);
        }
        assert_eq!(SummaryLength::for_input_length(5).max_length, 5);
    }

    #[test]
    fn test_regular_inputs_use_sixty_percent() {
        assert_eq!(SummaryLength::for_input_length(10).max_length, 10);
        assert_eq!(SummaryLength::for_input_length(16).max_length, 10);
        assert_eq!(SummaryLength::for_input_length(17).max_length, 10);
        assert_eq!(SummaryLength::for_input_length(18).max_length, 10);
        assert_eq!(SummaryLength::for_input_length(19).max_length, 11);
        assert_eq!(SummaryLength::for_input_length(100).max_length, 60);
        assert_eq!(SummaryLength::for_input_length(101).max_length, 60);
        for n in 10..500 {
            let expected = 10.max((n as f64 * 0.6).floor() as usize);
            assert_eq!(SummaryLength::for_input_length(n).max_length, expected);
            assert_eq!(SummaryLength::for_input_length(n).min_length, 5);
        }
    }

    #[test]
    fn test_count_tokens() {
        assert_eq!(count_tokens("  one two\tthree\nfour  "), 4);
        assert_eq!(count_tokens(""), 0);
    }

    #[tokio::test]
    async fn test_summarize_passes_bounds_to_model() {
        let model = Arc::new(RecordingModel::ok("A short summary."));
        let summarizer = Summarizer::new(model.clone());

        let text = vec!["word"; 100].join(" ");
        let result = summarizer.summarize(&text).await.unwrap();

        assert_eq!(result.summary, "A short summary.");
        assert_eq!(
            model.calls.lock().unwrap().as_slice(),
            &[SummaryLength { max_length: 60, min_length: 5 }]
        );
    }

    #[tokio::test]
    async fn test_model_failure_surfaces_message() {
        let summarizer = Summarizer::new(Arc::new(RecordingModel::failing("model not loaded")));
        let err = summarizer.summarize("some text to summarize").await.unwrap_err();
        assert_eq!(err.status_code(), 500);
        assert!(err.to_string().contains("model not loaded"));
    }

    #[test]
    fn test_render_formats() {
        let result = SummaryResult { summary: "Rust is fast, safe.".to_string() };

        assert_eq!(
            Summarizer::render(&result, SummaryExport::Json).unwrap(),
            Export::Json(serde_json::json!({"summary": "Rust is fast, safe."}))
        );
        assert_eq!(
            Summarizer::render(&result, SummaryExport::Txt).unwrap(),
            Export::Text("Rust is fast, safe.".to_string())
        );

        let Export::Attachment { filename, body, .. } =
            Summarizer::render(&result, SummaryExport::Csv).unwrap()
        else {
            panic!("expected attachment");
        };
        assert_eq!(filename, "summary.csv");
        assert_eq!(body, "summary\r\n\"Rust is fast, safe.\"\r\n");
    }

    #[test]
    fn test_export_from_query() {
        assert_eq!(SummaryExport::from_query(None), SummaryExport::Json);
        assert_eq!(SummaryExport::from_query(Some("txt")), SummaryExport::Txt);
        assert_eq!(SummaryExport::from_query(Some("csv")), SummaryExport::Csv);
        assert_eq!(SummaryExport::from_query(Some("pdf")), SummaryExport::Json);
    }
}
