//! The `wordmatch init` command.

use std::path::Path;

use anyhow::{Context, Result};

const CONFIG_FILE: &str = "wordmatch.toml";

pub fn execute() -> Result<()> {
    let path = Path::new(CONFIG_FILE);
    if path.exists() {
        println!("{CONFIG_FILE} already exists, skipping.");
        return Ok(());
    }

    std::fs::write(path, SAMPLE_CONFIG)
        .with_context(|| format!("failed to write {CONFIG_FILE}"))?;
    println!("Created {CONFIG_FILE}");

    println!("\nNext steps:");
    println!("  1. Export GEMINI_API_KEY (or edit {CONFIG_FILE})");
    println!("  2. Run: wordmatch words --level 1");
    println!("  3. Run: wordmatch play");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# wordmatch configuration

default_provider = "gemini"
default_model = "gemini-2.5-flash"
temperature = 1.0
pair_count = 10
use_fallback = true
mismatch_delay_ms = 1200
win_delay_ms = 800

[providers.gemini]
type = "gemini"
api_key = "${GEMINI_API_KEY}"

[providers.openai]
type = "openai"
api_key = "${OPENAI_API_KEY}"

[providers.ollama]
type = "ollama"
base_url = "http://localhost:11434"
"#;
