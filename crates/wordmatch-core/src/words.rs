//! Word source: asks a generation back end for English/Spanish pairs.
//!
//! One request per round. Any failure (transport, empty text, unparsable or
//! unusable list) is replaced by a fixed fallback list unless fallback has been
//! switched off.

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::{json, Value};
use tracing::instrument;

use crate::error::WordSourceError;
use crate::model::{Difficulty, WordPair};
use crate::traits::{strip_code_fence, GenerateRequest, LlmProvider};

/// Pairs dealt per round (20 cards).
pub const DEFAULT_PAIR_COUNT: usize = 10;

/// Default generation model.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

const SYSTEM_PROMPT: &str = "You create vocabulary for a children's English/Spanish memory game. Respond ONLY with JSON.";

const FALLBACK: [(&str, &str); 10] = [
    ("Dog", "Perro"),
    ("Sun", "Sol"),
    ("Water", "Agua"),
    ("Book", "Libro"),
    ("Green", "Verde"),
    ("Milk", "Leche"),
    ("Bread", "Pan"),
    ("Moon", "Luna"),
    ("Shoe", "Zapato"),
    ("Fish", "Pez"),
];

/// The static list used whenever generation fails.
pub fn fallback_pairs() -> Vec<WordPair> {
    FALLBACK
        .iter()
        .map(|(english, spanish)| WordPair::new(*english, *spanish))
        .collect()
}

/// JSON Schema for the generated list: an array of `{english, spanish}`.
pub fn word_pair_schema() -> Value {
    json!({
        "type": "array",
        "items": {
            "type": "object",
            "properties": {
                "english": { "type": "string" },
                "spanish": { "type": "string" }
            },
            "required": ["english", "spanish"]
        }
    })
}

/// Build the generation prompt for a level.
pub fn build_prompt(level: u32, pair_count: usize) -> String {
    let difficulty = Difficulty::for_level(level);
    format!(
        "Generate a list of {pair_count} {} and their Spanish translations. \
         Avoid cognates if possible to make it a fun challenge \
         (e.g., avoid \"Elephant/Elefante\", prefer \"Red/Rojo\"). \
         Ensure all words are distinct from each other.",
        difficulty.description()
    )
}

/// Parse generated text into exactly `pair_count` pairs.
///
/// Accepts a bare JSON array, or an object whose first array-valued field
/// holds the list, optionally inside a Markdown code fence. Longer lists are
/// truncated; shorter lists, blank words and repeated words are rejected.
pub fn parse_word_pairs(text: &str, pair_count: usize) -> Result<Vec<WordPair>, WordSourceError> {
    let payload = strip_code_fence(text);
    if payload.is_empty() {
        return Err(WordSourceError::EmptyResponse);
    }

    let value: Value = serde_json::from_str(payload)
        .map_err(|e| WordSourceError::Malformed(format!("invalid JSON: {e}")))?;

    let items = match value {
        Value::Array(items) => items,
        Value::Object(fields) => fields
            .into_iter()
            .find_map(|(_, v)| match v {
                Value::Array(items) => Some(items),
                _ => None,
            })
            .ok_or_else(|| WordSourceError::Malformed("object holds no list".into()))?,
        other => {
            return Err(WordSourceError::Malformed(format!(
                "expected a list, got {other}"
            )))
        }
    };

    if items.is_empty() {
        return Err(WordSourceError::EmptyResponse);
    }

    let mut pairs = Vec::with_capacity(pair_count);
    let mut seen = HashSet::new();

    for item in items.into_iter().take(pair_count) {
        let pair: WordPair = serde_json::from_value(item)
            .map_err(|e| WordSourceError::Malformed(format!("bad pair: {e}")))?;
        let pair = WordPair::new(pair.english.trim(), pair.spanish.trim());

        if pair.english.is_empty() || pair.spanish.is_empty() {
            return Err(WordSourceError::Malformed("blank word in list".into()));
        }
        for word in [&pair.english, &pair.spanish] {
            if !seen.insert(word.to_lowercase()) {
                return Err(WordSourceError::Malformed(format!("repeated word: {word}")));
            }
        }
        pairs.push(pair);
    }

    if pairs.len() < pair_count {
        return Err(WordSourceError::Malformed(format!(
            "expected {pair_count} pairs, got {}",
            pairs.len()
        )));
    }

    Ok(pairs)
}

/// Settings for a [`WordSource`].
#[derive(Debug, Clone)]
pub struct WordSourceConfig {
    /// Model identifier passed to the provider.
    pub model: String,
    /// Pairs requested per round.
    pub pair_count: usize,
    /// Sampling temperature.
    pub temperature: f64,
    /// Max tokens for the generated list.
    pub max_tokens: u32,
    /// Substitute the static list on failure instead of returning an error.
    pub use_fallback: bool,
}

impl Default for WordSourceConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            pair_count: DEFAULT_PAIR_COUNT,
            temperature: 1.0,
            max_tokens: 4096,
            use_fallback: true,
        }
    }
}

/// Produces the word pairs for each round.
pub struct WordSource {
    provider: Option<Arc<dyn LlmProvider>>,
    config: WordSourceConfig,
}

impl WordSource {
    pub fn new(provider: Arc<dyn LlmProvider>, config: WordSourceConfig) -> Self {
        Self {
            provider: Some(provider),
            config,
        }
    }

    /// A source with no back end: every round uses the fallback list.
    pub fn offline(config: WordSourceConfig) -> Self {
        Self {
            provider: None,
            config,
        }
    }

    pub fn config(&self) -> &WordSourceConfig {
        &self.config
    }

    /// Name of the configured provider, or "offline".
    pub fn provider_name(&self) -> &str {
        self.provider.as_ref().map(|p| p.name()).unwrap_or("offline")
    }

    /// Build the structured generation request for a level.
    pub fn build_request(&self, level: u32) -> GenerateRequest {
        GenerateRequest {
            model: self.config.model.clone(),
            prompt: build_prompt(level, self.config.pair_count),
            system_prompt: Some(SYSTEM_PROMPT.to_string()),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            response_schema: word_pair_schema(),
        }
    }

    /// Pairs for a level, substituting the fallback list on any failure when
    /// fallback is enabled.
    #[instrument(skip(self), fields(provider = %self.provider_name()))]
    pub async fn fetch_word_pairs(&self, level: u32) -> Result<Vec<WordPair>, WordSourceError> {
        match self.try_fetch(level).await {
            Ok(pairs) => Ok(pairs),
            Err(e) if self.config.use_fallback => {
                tracing::warn!("using fallback word list: {e}");
                let mut pairs = fallback_pairs();
                pairs.truncate(self.config.pair_count.max(1));
                Ok(pairs)
            }
            Err(e) => Err(e),
        }
    }

    /// One generation attempt, without fallback.
    pub async fn try_fetch(&self, level: u32) -> Result<Vec<WordPair>, WordSourceError> {
        let provider = self
            .provider
            .as_ref()
            .ok_or_else(|| WordSourceError::Provider(anyhow::anyhow!("no provider configured")))?;

        let request = self.build_request(level);
        let response = provider
            .generate(&request)
            .await
            .map_err(WordSourceError::Provider)?;

        tracing::debug!(
            model = %response.model,
            latency_ms = response.latency_ms,
            "word list generated"
        );

        parse_word_pairs(&response.content, self.config.pair_count)
    }
}
