use serde::{Deserialize, Serialize};

/// Ollama generate request
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    /// Model name (e.g., "llama3.2", "gemma2")
    pub model: String,

    /// Prompt text
    pub prompt: String,

    /// Disable streaming
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,

    /// Constrain output format ("json")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Generation options
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<GenerateOptions>,
}

impl GenerateRequest {
    /// Non-streaming request with greedy decoding
    pub fn deterministic(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            stream: Some(false),
            format: None,
            options: Some(GenerateOptions {
                temperature: Some(0.0),
                num_predict: None,
                seed: Some(0),
            }),
        }
    }

    pub fn with_num_predict(mut self, num_predict: i32) -> Self {
        self.options.get_or_insert_with(GenerateOptions::default).num_predict = Some(num_predict);
        self
    }

    pub fn with_json_format(mut self) -> Self {
        self.format = Some("json".to_string());
        self
    }
}

/// Generation options
#[derive(Debug, Clone, Serialize, Default)]
pub struct GenerateOptions {
    /// Temperature (0.0 - 1.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Maximum tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_predict: Option<i32>,

    /// Fixed sampling seed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
}

/// Ollama generate response
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    /// Model name
    pub model: String,

    /// Generated text
    pub response: String,

    /// Whether generation is complete
    pub done: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_request_serialization() {
        let request = GenerateRequest::deterministic("llama3.2", "Summarize")
            .with_num_predict(60)
            .with_json_format();
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "model": "llama3.2",
                "prompt": "Summarize",
                "stream": false,
                "format": "json",
                "options": {"temperature": 0.0, "num_predict": 60, "seed": 0}
            })
        );
    }

    #[test]
    fn test_default_options_serialize_empty() {
        let value = serde_json::to_value(GenerateOptions::default()).unwrap();
        assert_eq!(value, serde_json::json!({}));
    }
}
