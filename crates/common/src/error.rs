/// AI engine error types
#[derive(Debug, thiserror::Error)]
pub enum AiEngineError {
    /// Model backend (LLM / recognizer) error
    #[error("Model error: {0}")]
    Model(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network/HTTP error
    #[error("Network error: {0}")]
    Network(String),

    /// Serialization/export error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Caller-correctable request defect
    #[error("{0}")]
    InvalidInput(String),

    /// Internal error
    #[error("{0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General error (anyhow integration)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AiEngineError {
    /// Create model error
    pub fn model<S: Into<String>>(msg: S) -> Self {
        Self::Model(msg.into())
    }

    /// Create config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create network error
    pub fn network<S: Into<String>>(msg: S) -> Self {
        Self::Network(msg.into())
    }

    /// Create serialization error
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        Self::Serialization(msg.into())
    }

    /// Create invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create internal error
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether the caller can fix the request and try again
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

impl AiEngineError {
    /// Get HTTP status code
    ///
    /// Only `InvalidInput` is reported as a client error; every failure inside
    /// a model, the scorer or an exporter surfaces as 500.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            Self::Model(_) => 500,
            Self::Config(_) => 500,
            Self::Network(_) => 500,
            Self::Serialization(_) => 500,
            Self::Internal(_) => 500,
            Self::Io(_) => 500,
            Self::Json(_) => 500,
            Self::Other(_) => 500,
        }
    }
}

impl From<csv::Error> for AiEngineError {
    fn from(e: csv::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}
