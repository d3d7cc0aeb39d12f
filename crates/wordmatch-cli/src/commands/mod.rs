pub mod init;
pub mod list_models;
pub mod play;
pub mod words;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use wordmatch_core::WordSource;
use wordmatch_providers::config::load_config_from;
use wordmatch_providers::{create_provider, WordmatchConfig};

/// Where word pairs come from, as chosen on the command line.
pub struct SourceOptions {
    pub provider: Option<String>,
    pub model: Option<String>,
    pub offline: bool,
    pub config: Option<PathBuf>,
}

impl SourceOptions {
    pub fn load(&self) -> Result<(WordmatchConfig, WordSource)> {
        let config = load_config_from(self.config.as_deref())?;
        let source = self.word_source(&config)?;
        Ok((config, source))
    }

    /// Build the word source. A missing default provider, or one without an API
    /// key, plays with the built-in list; a provider named explicitly must exist.
    fn word_source(&self, config: &WordmatchConfig) -> Result<WordSource> {
        let settings = config.word_source_config(self.model.as_deref());
        if self.offline {
            return Ok(WordSource::offline(settings));
        }

        let name = self.provider.as_deref().unwrap_or(&config.default_provider);
        match config.providers.get(name) {
            Some(provider_config) if provider_config.has_credentials() => {
                let provider = create_provider(provider_config)
                    .with_context(|| format!("failed to create provider '{name}'"))?;
                Ok(WordSource::new(Arc::from(provider), settings))
            }
            Some(_) => {
                tracing::warn!(provider = name, "no API key configured, using the built-in word list");
                Ok(WordSource::offline(settings))
            }
            None if self.provider.is_some() => {
                let mut available: Vec<&str> =
                    config.providers.keys().map(String::as_str).collect();
                available.sort_unstable();
                anyhow::bail!(
                    "provider '{name}' not found in config. Available: {}",
                    if available.is_empty() {
                        "none (run `wordmatch init`)".to_string()
                    } else {
                        available.join(", ")
                    }
                )
            }
            None => {
                tracing::warn!(provider = name, "provider not configured, using the built-in word list");
                Ok(WordSource::offline(settings))
            }
        }
    }
}
