pub mod config;
pub mod error;
pub mod logger;

// Re-export commonly used types
pub use config::{AppConfig, NerBackend};
pub use error::AiEngineError;
pub type Result<T> = std::result::Result<T, AiEngineError>;
