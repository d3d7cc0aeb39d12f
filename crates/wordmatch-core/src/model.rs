//! Core data model types for wordmatch.
//!
//! These are the fundamental types that the whole game uses to represent
//! word pairs, cards and difficulty tiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One English word and its Spanish translation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordPair {
    pub english: String,
    pub spanish: String,
}

impl WordPair {
    pub fn new(english: impl Into<String>, spanish: impl Into<String>) -> Self {
        Self {
            english: english.into(),
            spanish: spanish.into(),
        }
    }
}

/// Language a card face is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    En,
    Es,
}

impl Lang {
    /// Label shown above the word on a revealed card.
    pub fn label(&self) -> &'static str {
        match self {
            Lang::En => "English",
            Lang::Es => "Spanish",
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lang::En => write!(f, "en"),
            Lang::Es => write!(f, "es"),
        }
    }
}

/// A single face card on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Unique per card, e.g. `pair-3-es`.
    pub id: String,
    /// Shared by exactly two cards, e.g. `pair-3`.
    pub pair_id: String,
    /// The word printed on the card.
    pub content: String,
    pub lang: Lang,
    pub is_flipped: bool,
    pub is_matched: bool,
}

impl Card {
    /// Whether the card's face is visible, either transiently or permanently.
    pub fn is_revealed(&self) -> bool {
        self.is_flipped || self.is_matched
    }
}

/// Difficulty tier derived from the level number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// Level 1 is beginner, level 2 intermediate, anything above advanced.
    pub fn for_level(level: u32) -> Self {
        match level {
            0 | 1 => Difficulty::Beginner,
            2 => Difficulty::Intermediate,
            _ => Difficulty::Advanced,
        }
    }

    /// Guidance text sent to the generation service. Advisory only.
    pub fn description(&self) -> &'static str {
        match self {
            Difficulty::Beginner => {
                "simple, distinct English words suitable for a 2nd grader (e.g., common animals, foods, colors)"
            }
            Difficulty::Intermediate => {
                "slightly harder English words suitable for a 3rd grader (including verbs and adjectives)"
            }
            Difficulty::Advanced => {
                "challenging English words suitable for a 4th or 5th grader (abstract nouns, complex verbs)"
            }
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Beginner => write!(f, "beginner"),
            Difficulty::Intermediate => write!(f, "intermediate"),
            Difficulty::Advanced => write!(f, "advanced"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lang_display_and_label() {
        assert_eq!(Lang::En.to_string(), "en");
        assert_eq!(Lang::Es.to_string(), "es");
        assert_eq!(Lang::En.label(), "English");
        assert_eq!(Lang::Es.label(), "Spanish");
    }

    #[test]
    fn difficulty_tiers() {
        assert_eq!(Difficulty::for_level(1), Difficulty::Beginner);
        assert_eq!(Difficulty::for_level(2), Difficulty::Intermediate);
        assert_eq!(Difficulty::for_level(3), Difficulty::Advanced);
        assert_eq!(Difficulty::for_level(42), Difficulty::Advanced);
        assert!(Difficulty::Beginner.description().contains("2nd grader"));
        assert!(Difficulty::Advanced.description().contains("abstract nouns"));
    }

    #[test]
    fn word_pair_deserializes_from_generation_shape() {
        let pair: WordPair =
            serde_json::from_str(r#"{"english": "Red", "spanish": "Rojo"}"#).unwrap();
        assert_eq!(pair, WordPair::new("Red", "Rojo"));
    }

    #[test]
    fn matched_card_counts_as_revealed() {
        let card = Card {
            id: "pair-0-en".into(),
            pair_id: "pair-0".into(),
            content: "Dog".into(),
            lang: Lang::En,
            is_flipped: false,
            is_matched: true,
        };
        assert!(card.is_revealed());
    }
}
