//! Deck building and shuffling.
//!
//! Every word pair becomes two cards sharing a `pair-<i>` identifier, one
//! English and one Spanish. The deck is then shuffled in place with the
//! caller's RNG.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::{Card, Lang, WordPair};

/// Build the unshuffled deck: `2 * pairs.len()` cards, English card first.
pub fn build_deck(pairs: &[WordPair]) -> Vec<Card> {
    let mut deck = Vec::with_capacity(pairs.len() * 2);

    for (index, pair) in pairs.iter().enumerate() {
        let pair_id = format!("pair-{index}");

        deck.push(Card {
            id: format!("{pair_id}-{}", Lang::En),
            pair_id: pair_id.clone(),
            content: pair.english.clone(),
            lang: Lang::En,
            is_flipped: false,
            is_matched: false,
        });

        deck.push(Card {
            id: format!("{pair_id}-{}", Lang::Es),
            pair_id,
            content: pair.spanish.clone(),
            lang: Lang::Es,
            is_flipped: false,
            is_matched: false,
        });
    }

    deck
}

/// Build a deck from `pairs` and shuffle it.
pub fn deal<R: Rng + ?Sized>(pairs: &[WordPair], rng: &mut R) -> Vec<Card> {
    let mut deck = build_deck(pairs);
    deck.shuffle(rng);
    deck
}
