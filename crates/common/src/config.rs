use crate::error::AiEngineError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// Front-end origins allowed by default (React dev server, Spring backend)
pub const DEFAULT_CORS_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://localhost:8080"];

/// Entity recognition backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NerBackend {
    /// Offline pattern and gazetteer recognizer
    Rules,
    /// Entity spans produced by an Ollama model
    Llm,
}

impl NerBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rules => "rules",
            Self::Llm => "llm",
        }
    }
}

impl FromStr for NerBackend {
    type Err = AiEngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rules" | "rule" => Ok(Self::Rules),
            "llm" | "ollama" => Ok(Self::Llm),
            other => Err(AiEngineError::config(format!(
                "Unknown NER backend '{}' (expected 'rules' or 'llm')",
                other
            ))),
        }
    }
}

/// AI engine application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server bind address
    pub server_host: String,

    /// Server port
    pub server_port: u16,

    /// Log directory
    pub log_dir: PathBuf,

    /// Log level
    pub log_level: String,

    /// Ollama API base URL
    pub ollama_base_url: String,

    /// Summarization model name
    pub summary_model: String,

    /// Entity recognition backend
    pub ner_backend: NerBackend,

    /// Model used when `ner_backend` is `llm`
    pub ner_model: String,

    /// Allowed CORS origins
    pub cors_origins: Vec<String>,

    /// HTTP timeout for model calls, in seconds
    pub llm_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_host: "127.0.0.1".to_string(),
            server_port: 8000,
            log_dir: PathBuf::from("./log"),
            log_level: "info".to_string(),
            ollama_base_url: "http://localhost:11434".to_string(),
            summary_model: "llama3.2:latest".to_string(),
            ner_backend: NerBackend::Rules,
            ner_model: "llama3.2:latest".to_string(),
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
            llm_timeout_secs: 300,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and .env file
    pub fn from_env() -> Result<Self, AiEngineError> {
        // Load .env file (ignore if not exists)
        let _ = dotenv::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AiEngineError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let server_port = match lookup("SERVER_PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                AiEngineError::config(format!("SERVER_PORT is not a valid port: {}", raw))
            })?,
            None => defaults.server_port,
        };

        let ner_backend = match lookup("NER_BACKEND") {
            Some(raw) => raw.parse()?,
            None => defaults.ner_backend,
        };

        let cors_origins = lookup("CORS_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or(defaults.cors_origins);

        let llm_timeout_secs = lookup("LLM_TIMEOUT_SECS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.llm_timeout_secs);

        Ok(Self {
            server_host: lookup("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port,
            log_dir: lookup("LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
            ollama_base_url: lookup("OLLAMA_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.ollama_base_url),
            summary_model: lookup("SUMMARY_MODEL").unwrap_or(defaults.summary_model),
            ner_backend,
            ner_model: lookup("NER_MODEL").unwrap_or(defaults.ner_model),
            cors_origins,
            llm_timeout_secs,
        })
    }

    /// Get server bind address (host:port)
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), AiEngineError> {
        if self.summary_model.trim().is_empty() {
            return Err(AiEngineError::config("Summary model name cannot be empty"));
        }

        if self.ner_backend == NerBackend::Llm && self.ner_model.trim().is_empty() {
            return Err(AiEngineError::config(
                "NER model name cannot be empty when NER_BACKEND=llm",
            ));
        }

        // Validate Ollama URL
        if !self.ollama_base_url.starts_with("http://")
            && !self.ollama_base_url.starts_with("https://") {
            return Err(AiEngineError::config(
                "Ollama base URL must start with http:// or https://"
            ));
        }

        // Validate port range
        if self.server_port == 0 {
            return Err(AiEngineError::config("Server port cannot be 0"));
        }

        if self.cors_origins.is_empty() {
            return Err(AiEngineError::config("At least one CORS origin is required"));
        }

        Ok(())
    }
}

/// Split a comma separated origin list
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().trim_end_matches('/'))
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server_port, 8000);
        assert_eq!(config.ner_backend, NerBackend::Rules);
        assert_eq!(
            config.cors_origins,
            vec!["http://localhost:5173", "http://localhost:8080"]
        );
    }

    #[test]
    fn test_server_bind_address() {
        let config = AppConfig::default();
        assert_eq!(config.server_bind_address(), "127.0.0.1:8000");
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("SERVER_PORT", "9001"),
            ("NER_BACKEND", "LLM"),
            ("OLLAMA_BASE_URL", "http://ollama:11434/"),
            ("CORS_ORIGINS", "http://a.test, http://b.test/ ,"),
        ]))
        .unwrap();

        assert_eq!(config.server_port, 9001);
        assert_eq!(config.ner_backend, NerBackend::Llm);
        assert_eq!(config.ollama_base_url, "http://ollama:11434");
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
        assert_eq!(config.summary_model, "llama3.2:latest");
    }

    #[test]
    fn test_from_lookup_rejects_bad_values() {
        assert!(AppConfig::from_lookup(lookup_from(&[("SERVER_PORT", "eighty")])).is_err());
        assert!(AppConfig::from_lookup(lookup_from(&[("NER_BACKEND", "spacy")])).is_err());
    }

    #[test]
    fn test_validate() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());

        let mut invalid_config = AppConfig::default();
        invalid_config.summary_model = String::new();
        assert!(invalid_config.validate().is_err());

        let mut invalid_config = AppConfig::default();
        invalid_config.ollama_base_url = "localhost:11434".to_string();
        assert!(invalid_config.validate().is_err());

        let mut invalid_config = AppConfig::default();
        invalid_config.cors_origins.clear();
        assert!(invalid_config.validate().is_err());
    }
}
