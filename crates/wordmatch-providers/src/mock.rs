//! Mock provider for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use wordmatch_core::traits::{GenerateRequest, GenerateResponse, LlmProvider, ModelInfo};
use wordmatch_core::WordPair;

/// A mock LLM provider for exercising the word source without real API calls.
///
/// Returns a fixed response, or fails every request.
pub struct MockProvider {
    /// Text returned for every request; `None` fails instead.
    response: Option<String>,
    /// Number of calls made.
    call_count: AtomicU32,
    /// Last request received.
    last_request: Mutex<Option<GenerateRequest>>,
}

impl MockProvider {
    /// Create a mock that always returns the same response.
    pub fn with_fixed_response(response: &str) -> Self {
        Self {
            response: Some(response.to_string()),
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Create a mock that answers with `pairs` encoded as a JSON array.
    pub fn with_pairs(pairs: &[WordPair]) -> Self {
        let response = serde_json::to_string(pairs).unwrap_or_else(|_| "[]".to_string());
        Self::with_fixed_response(&response)
    }

    /// Create a mock whose every request fails.
    pub fn failing() -> Self {
        Self {
            response: None,
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Get the number of calls made to this provider.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Get the last request made to this provider.
    pub fn last_request(&self) -> Option<GenerateRequest> {
        self.last_request
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or(None)
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, request: &GenerateRequest) -> anyhow::Result<GenerateResponse> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request.clone());
        }

        let Some(content) = self.response.clone() else {
            anyhow::bail!("mock provider configured to fail");
        };

        Ok(GenerateResponse {
            content,
            model: request.model.clone(),
            latency_ms: 1,
        })
    }

    fn available_models(&self) -> Vec<ModelInfo> {
        vec![ModelInfo {
            id: "mock-model".into(),
            name: "Mock Model".into(),
            provider: "mock".into(),
            structured_output: true,
        }]
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use wordmatch_core::words::{fallback_pairs, WordSource, WordSourceConfig};

    fn config(pair_count: usize) -> WordSourceConfig {
        WordSourceConfig {
            model: "mock-model".into(),
            pair_count,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn fixed_pairs_flow_through_word_source() {
        let pairs = vec![
            WordPair::new("Red", "Rojo"),
            WordPair::new("Cat", "Gato"),
            WordPair::new("House", "Casa"),
        ];
        let provider = Arc::new(MockProvider::with_pairs(&pairs));
        let source = WordSource::new(provider.clone(), config(3));

        assert_eq!(source.fetch_word_pairs(1).await.unwrap(), pairs);
        assert_eq!(provider.call_count(), 1);

        let request = provider.last_request().unwrap();
        assert_eq!(request.model, "mock-model");
        assert!(request.prompt.contains("Generate a list of 3 "));
    }

    #[tokio::test]
    async fn failing_mock_triggers_fallback() {
        let provider = Arc::new(MockProvider::failing());
        let source = WordSource::new(provider.clone(), config(10));

        assert_eq!(source.fetch_word_pairs(2).await.unwrap(), fallback_pairs());
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn short_list_triggers_fallback() {
        let provider = Arc::new(MockProvider::with_pairs(&[WordPair::new("Red", "Rojo")]));
        let source = WordSource::new(provider, config(10));
        assert_eq!(source.fetch_word_pairs(1).await.unwrap(), fallback_pairs());
    }
}
