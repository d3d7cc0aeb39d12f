//! Configuration file loading and provider factory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use wordmatch_core::game::{Timings, MISMATCH_DELAY, WIN_DELAY};
use wordmatch_core::traits::LlmProvider;
use wordmatch_core::words::{WordSourceConfig, DEFAULT_MODEL, DEFAULT_PAIR_COUNT};

use crate::gemini::GeminiProvider;
use crate::mock::MockProvider;
use crate::ollama::OllamaProvider;
use crate::openai::OpenAiProvider;

/// Configuration for a single word generation back end.
///
/// Note: Custom Debug impl masks API keys to prevent accidental exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProviderConfig {
    Gemini {
        api_key: String,
        #[serde(default)]
        base_url: Option<String>,
    },
    OpenAI {
        api_key: String,
        #[serde(default)]
        base_url: Option<String>,
        #[serde(default)]
        org_id: Option<String>,
    },
    Ollama {
        #[serde(default = "default_ollama_url")]
        base_url: String,
    },
    /// Canned response, for demos and tests. Without a response every request fails.
    Mock {
        #[serde(default)]
        response: Option<String>,
    },
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderConfig::Gemini {
                api_key: _,
                base_url,
            } => f
                .debug_struct("Gemini")
                .field("api_key", &"***")
                .field("base_url", base_url)
                .finish(),
            ProviderConfig::OpenAI {
                api_key: _,
                base_url,
                org_id,
            } => f
                .debug_struct("OpenAI")
                .field("api_key", &"***")
                .field("base_url", base_url)
                .field("org_id", org_id)
                .finish(),
            ProviderConfig::Ollama { base_url } => f
                .debug_struct("Ollama")
                .field("base_url", base_url)
                .finish(),
            ProviderConfig::Mock { response } => f
                .debug_struct("Mock")
                .field("response", response)
                .finish(),
        }
    }
}

impl ProviderConfig {
    /// Whether the back end has what it needs to authenticate.
    pub fn has_credentials(&self) -> bool {
        match self {
            ProviderConfig::Gemini { api_key, .. } | ProviderConfig::OpenAI { api_key, .. } => {
                !api_key.trim().is_empty()
            }
            ProviderConfig::Ollama { .. } | ProviderConfig::Mock { .. } => true,
        }
    }
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

/// Top-level wordmatch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordmatchConfig {
    /// Provider configurations keyed by name.
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    /// Provider used when none is given on the command line.
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Model used when none is given on the command line.
    #[serde(default = "default_model")]
    pub default_model: String,
    /// Sampling temperature for word generation.
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Max tokens for one generated word list.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Word pairs per round.
    #[serde(default = "default_pair_count")]
    pub pair_count: usize,
    /// Substitute the built-in word list when generation fails.
    #[serde(default = "default_true")]
    pub use_fallback: bool,
    /// How long a mismatched pair stays face-up.
    #[serde(default = "default_mismatch_delay")]
    pub mismatch_delay_ms: u64,
    /// Pause between the final match and the win screen.
    #[serde(default = "default_win_delay")]
    pub win_delay_ms: u64,
}

fn default_provider() -> String {
    "gemini".to_string()
}
fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}
fn default_temperature() -> f64 {
    1.0
}
fn default_max_tokens() -> u32 {
    4096
}
fn default_pair_count() -> usize {
    DEFAULT_PAIR_COUNT
}
fn default_true() -> bool {
    true
}
fn default_mismatch_delay() -> u64 {
    MISMATCH_DELAY.as_millis() as u64
}
fn default_win_delay() -> u64 {
    WIN_DELAY.as_millis() as u64
}

impl Default for WordmatchConfig {
    fn default() -> Self {
        Self {
            providers: HashMap::new(),
            default_provider: default_provider(),
            default_model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            pair_count: default_pair_count(),
            use_fallback: true,
            mismatch_delay_ms: default_mismatch_delay(),
            win_delay_ms: default_win_delay(),
        }
    }
}

impl WordmatchConfig {
    /// Word source settings, with an optional model override.
    pub fn word_source_config(&self, model: Option<&str>) -> WordSourceConfig {
        WordSourceConfig {
            model: model.unwrap_or(&self.default_model).to_string(),
            pair_count: self.pair_count,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            use_fallback: self.use_fallback,
        }
    }

    pub fn timings(&self) -> Timings {
        Timings {
            mismatch_delay: Duration::from_millis(self.mismatch_delay_ms),
            win_delay: Duration::from_millis(self.win_delay_ms),
        }
    }

    /// Reject values the game cannot run with.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.pair_count >= 1, "pair_count must be at least 1");
        anyhow::ensure!(
            (0.0..=2.0).contains(&self.temperature),
            "temperature must be between 0.0 and 2.0"
        );
        Ok(())
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Resolve env vars in a provider config.
fn resolve_provider_config(config: &ProviderConfig) -> ProviderConfig {
    match config {
        ProviderConfig::Gemini { api_key, base_url } => ProviderConfig::Gemini {
            api_key: resolve_env_vars(api_key),
            base_url: base_url.as_ref().map(|u| resolve_env_vars(u)),
        },
        ProviderConfig::OpenAI {
            api_key,
            base_url,
            org_id,
        } => ProviderConfig::OpenAI {
            api_key: resolve_env_vars(api_key),
            base_url: base_url.as_ref().map(|u| resolve_env_vars(u)),
            org_id: org_id.as_ref().map(|o| resolve_env_vars(o)),
        },
        ProviderConfig::Ollama { base_url } => ProviderConfig::Ollama {
            base_url: resolve_env_vars(base_url),
        },
        ProviderConfig::Mock { response } => ProviderConfig::Mock {
            response: response.clone(),
        },
    }
}

/// Apply API keys from the environment, creating provider entries as needed.
///
/// `WORDMATCH_GEMINI_KEY` (or `GEMINI_API_KEY`) and `WORDMATCH_OPENAI_KEY`.
fn apply_env_overrides(config: &mut WordmatchConfig, lookup: impl Fn(&str) -> Option<String>) {
    let gemini_key = lookup("WORDMATCH_GEMINI_KEY").or_else(|| lookup("GEMINI_API_KEY"));
    if let Some(key) = gemini_key {
        config
            .providers
            .entry("gemini".into())
            .or_insert(ProviderConfig::Gemini {
                api_key: String::new(),
                base_url: None,
            });
        if let Some(ProviderConfig::Gemini { api_key, .. }) = config.providers.get_mut("gemini") {
            *api_key = key;
        }
    }

    if let Some(key) = lookup("WORDMATCH_OPENAI_KEY") {
        config
            .providers
            .entry("openai".into())
            .or_insert(ProviderConfig::OpenAI {
                api_key: String::new(),
                base_url: None,
                org_id: None,
            });
        if let Some(ProviderConfig::OpenAI { api_key, .. }) = config.providers.get_mut("openai") {
            *api_key = key;
        }
    }
}

/// Load config from an explicit path, or search the well-known paths.
///
/// Search order without a path:
/// 1. `wordmatch.toml` in the current directory
/// 2. `~/.config/wordmatch/config.toml`
///
/// Environment variable overrides: `WORDMATCH_GEMINI_KEY` (or `GEMINI_API_KEY`),
/// `WORDMATCH_OPENAI_KEY`.
pub fn load_config_from(path: Option<&Path>) -> Result<WordmatchConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("wordmatch.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<WordmatchConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => WordmatchConfig::default(),
    };

    apply_env_overrides(&mut config, |name| std::env::var(name).ok());

    // Resolve env vars in all provider configs
    config.providers = config
        .providers
        .iter()
        .map(|(k, v)| (k.clone(), resolve_provider_config(v)))
        .collect();

    config.validate()?;
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("wordmatch"))
}

/// Create a provider instance from its configuration.
pub fn create_provider(config: &ProviderConfig) -> Result<Box<dyn LlmProvider>> {
    match config {
        ProviderConfig::Gemini { api_key, base_url } => {
            anyhow::ensure!(
                config.has_credentials(),
                "gemini API key is empty; set GEMINI_API_KEY or WORDMATCH_GEMINI_KEY"
            );
            Ok(Box::new(GeminiProvider::new(api_key, base_url.clone())))
        }
        ProviderConfig::OpenAI {
            api_key,
            base_url,
            org_id,
        } => {
            anyhow::ensure!(
                config.has_credentials(),
                "openai API key is empty; set WORDMATCH_OPENAI_KEY"
            );
            Ok(Box::new(OpenAiProvider::new(
                api_key,
                base_url.clone(),
                org_id.clone(),
            )))
        }
        ProviderConfig::Ollama { base_url } => Ok(Box::new(OllamaProvider::new(base_url))),
        ProviderConfig::Mock { response } => Ok(Box::new(match response {
            Some(text) => MockProvider::with_fixed_response(text),
            None => MockProvider::failing(),
        })),
    }
}
