//! The `wordmatch list-models` command.

use std::path::PathBuf;

use anyhow::Result;

use wordmatch_core::traits::ModelInfo;
use wordmatch_providers::config::load_config_from;
use wordmatch_providers::ollama::OllamaProvider;
use wordmatch_providers::{create_provider, ProviderConfig};

pub async fn execute(provider_filter: Option<String>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    if config.providers.is_empty() {
        println!("No providers configured. Run `wordmatch init` to create a config file.");
        return Ok(());
    }

    let mut names: Vec<&String> = config.providers.keys().collect();
    names.sort();

    for name in names {
        if provider_filter.as_ref().is_some_and(|filter| filter != name) {
            continue;
        }
        let provider_config = &config.providers[name];

        let models = match provider_config {
            // Local models are only known by asking the server.
            ProviderConfig::Ollama { base_url } => {
                match OllamaProvider::new(base_url).list_models_async().await {
                    Ok(models) => models,
                    Err(e) => {
                        println!("Provider: {name}\n  unavailable: {e:#}\n");
                        continue;
                    }
                }
            }
            _ if !provider_config.has_credentials() => {
                println!("Provider: {name}\n  no API key configured\n");
                continue;
            }
            _ => create_provider(provider_config)?.available_models(),
        };

        println!("Provider: {name}");
        if models.is_empty() {
            println!("  no models found");
        }
        for model in &models {
            println!("  {}", describe(model));
        }
        println!();
    }

    Ok(())
}

fn describe(model: &ModelInfo) -> String {
    let structured = if model.structured_output {
        "structured output"
    } else {
        "text only"
    };
    format!("{} ({}, {structured})", model.id, model.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_model() {
        let model = ModelInfo {
            id: "gemini-2.5-flash".into(),
            name: "Gemini 2.5 Flash".into(),
            provider: "gemini".into(),
            structured_output: true,
        };
        assert_eq!(
            describe(&model),
            "gemini-2.5-flash (Gemini 2.5 Flash, structured output)"
        );
    }
}
