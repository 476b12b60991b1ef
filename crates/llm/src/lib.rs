//! AI Engine LLM Integration
//!
//! Ollama API client and the model backends built on it

mod client;
mod llm_trait;
mod ner;
mod prompts;
mod summary;
mod types;

pub use client::OllamaClient;
pub use llm_trait::LlmClient;
pub use ner::OllamaEntityRecognizer;
pub use prompts::{entity_prompt, summary_prompt};
pub use summary::OllamaSummaryModel;
pub use types::{GenerateOptions, GenerateRequest, GenerateResponse};
