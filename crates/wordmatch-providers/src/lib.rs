//! wordmatch-providers: word generation back ends.
//!
//! Implements the `LlmProvider` trait for Gemini, OpenAI-compatible servers
//! and Ollama, plus the configuration file that selects between them.

use std::time::Duration;

pub mod config;
pub mod error;
pub mod gemini;
pub mod mock;
pub mod ollama;
pub mod openai;

pub use config::{create_provider, load_config_from, ProviderConfig, WordmatchConfig};
pub use error::ProviderError;

/// Build the shared HTTP client with a request timeout.
pub(crate) fn http_client(timeout_secs: u64) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!("falling back to default HTTP client: {e}");
            reqwest::Client::new()
        })
}
