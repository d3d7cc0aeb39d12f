//! The `wordmatch words` command.

use anyhow::Result;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};

use wordmatch_core::{Difficulty, WordPair};

use super::SourceOptions;

pub async fn execute(options: SourceOptions, level: u32, json: bool) -> Result<()> {
    let (_, source) = options.load()?;
    let level = level.max(1);
    let pairs = source.fetch_word_pairs(level).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&pairs)?);
    } else {
        println!(
            "Level {level} ({:?}) via {}",
            Difficulty::for_level(level),
            source.provider_name()
        );
        println!("{}", pairs_table(&pairs));
    }

    Ok(())
}

fn pairs_table(pairs: &[WordPair]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "English", "Spanish"]);

    for (index, pair) in pairs.iter().enumerate() {
        table.add_row(vec![
            (index + 1).to_string(),
            pair.english.clone(),
            pair.spanish.clone(),
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_lists_every_pair() {
        let pairs = vec![WordPair::new("Dog", "Perro"), WordPair::new("Sun", "Sol")];
        let text = pairs_table(&pairs).to_string();
        assert!(text.contains("English"));
        assert!(text.contains("Perro"));
        assert!(text.contains("Sol"));
    }
}
