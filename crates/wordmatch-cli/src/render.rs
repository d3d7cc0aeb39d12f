//! Text rendering of the board and game chrome.
//!
//! Everything here is a pure function of a [`Game`] snapshot.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use wordmatch_core::game::{FlipOutcome, Ignored};
use wordmatch_core::{Card, Game, Phase};

/// Cards per row on the board.
pub const COLUMNS: usize = 5;

/// One card as the player sees it.
pub struct CardView<'a> {
    /// 1-based board position.
    pub position: usize,
    pub card: &'a Card,
    /// The board is locked because two cards are face-up.
    pub disabled: bool,
}

impl CardView<'_> {
    pub fn accepts_click(&self) -> bool {
        !self.disabled && !self.card.is_flipped && !self.card.is_matched
    }

    /// Cell text: the position, then "?" or the language label and word.
    pub fn face(&self) -> String {
        let marker = if self.accepts_click() {
            format!("[{}]", self.position)
        } else {
            format!(" {} ", self.position)
        };

        if !self.card.is_revealed() {
            return format!("{marker}\n?\n");
        }

        let check = if self.card.is_matched { " ✓" } else { "" };
        format!(
            "{marker}{check}\n{}\n{}",
            self.card.lang.label().to_uppercase(),
            self.card.content
        )
    }
}

pub fn header(game: &Game) -> String {
    format!(
        "Bilingual Match!  [Level {}]\nMatch the English word to the Spanish word.",
        game.level()
    )
}

pub fn stats(game: &Game) -> String {
    format!(
        "Moves: {}   Matches: {} / {}",
        game.moves(),
        game.matches_found(),
        game.total_pairs()
    )
}

pub fn board(game: &Game) -> String {
    let disabled = game.is_locked();
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let views: Vec<CardView<'_>> = game
        .cards()
        .iter()
        .enumerate()
        .map(|(index, card)| CardView {
            position: index + 1,
            card,
            disabled,
        })
        .collect();

    for row in views.chunks(COLUMNS) {
        table.add_row(
            row.iter()
                .map(|view| Cell::new(view.face()).set_alignment(CellAlignment::Center))
                .collect::<Vec<_>>(),
        );
    }

    table.to_string()
}

pub fn loading(level: u32) -> String {
    if level > 1 {
        format!("Preparing harder words for Level {level}...")
    } else {
        "Generating fun words...".to_string()
    }
}

pub fn win(game: &Game) -> String {
    let next = match game.level().checked_add(1) {
        Some(next) => format!("n) Start Level {next}    "),
        None => String::new(),
    };
    format!(
        "🎉 ¡Muy Bien!\nYou cleared Level {} in {} moves!\n\n  {next}q) Quit",
        game.level(),
        game.moves(),
    )
}

pub fn error(game: &Game) -> String {
    let mut text = "Oops! Something went wrong loading the words.".to_string();
    if let Some(detail) = game.error() {
        text.push_str(&format!("\n({detail})"));
    }
    text.push_str("\n\n  r) Try Again    q) Quit");
    text
}

pub fn prompt(game: &Game) -> String {
    match game.phase() {
        Phase::Playing if game.is_locked() => {
            "Not a match... wait for the cards to turn back.".to_string()
        }
        Phase::Playing => format!("Pick a card (1-{}), r) Restart, q) Quit", game.cards().len()),
        Phase::Loading | Phase::Won | Phase::Error => String::new(),
    }
}

/// The whole screen for a snapshot.
pub fn screen(game: &Game) -> String {
    let body = match game.phase() {
        Phase::Loading => loading(game.level()),
        Phase::Playing => format!("{}\n{}\n{}", stats(game), board(game), prompt(game)),
        Phase::Won => format!("{}\n{}\n\n{}", stats(game), board(game), win(game)),
        Phase::Error => error(game),
    };
    format!("{}\n\n{}\n", header(game), body)
}

/// Feedback for a click that changed nothing, or a short note on the result.
pub fn flip_feedback(outcome: FlipOutcome, position: usize) -> Option<String> {
    match outcome {
        FlipOutcome::FaceUp | FlipOutcome::Mismatched => None,
        FlipOutcome::Matched => Some("It's a match!".to_string()),
        FlipOutcome::Ignored(Ignored::NotPlaying) => Some("There is no board in play.".to_string()),
        FlipOutcome::Ignored(Ignored::BoardLocked) => {
            Some("Wait for the cards to turn back.".to_string())
        }
        FlipOutcome::Ignored(Ignored::OutOfRange) => Some(format!("There is no card {position}.")),
        FlipOutcome::Ignored(Ignored::AlreadyMatched) => {
            Some(format!("Card {position} is already matched."))
        }
        FlipOutcome::Ignored(Ignored::AlreadyFaceUp) => {
            Some(format!("Card {position} is already face-up."))
        }
    }
}

#[cfg(test)]
mod tests {
    use wordmatch_core::deck::build_deck;
    use wordmatch_core::game::Timings;
    use wordmatch_core::WordPair;

    use super::*;

    fn dealt(level: u32) -> Game {
        let pairs = vec![WordPair::new("Dog", "Perro"), WordPair::new("Sun", "Sol")];
        let mut game = Game::new(level, Timings::default());
        let round = game.begin_round();
        game.deal(round, build_deck(&pairs));
        game
    }

    #[test]
    fn face_down_cards_hide_their_word() {
        let game = dealt(1);
        let text = board(&game);
        assert!(text.contains('?'));
        assert!(text.contains("[1]"));
        assert!(!text.contains("Dog"));
        assert!(!text.contains("Perro"));
    }

    #[test]
    fn revealed_cards_show_label_and_word() {
        let mut game = dealt(1);
        game.flip(1);
        let text = board(&game);
        assert!(text.contains("SPANISH"));
        assert!(text.contains("Perro"));
        assert!(!text.contains('✓'));
    }

    #[test]
    fn matched_cards_carry_check_mark() {
        let mut game = dealt(1);
        game.flip(0);
        game.flip(1);
        let text = board(&game);
        assert!(text.contains("Dog"));
        assert!(text.contains('✓'));
    }

    #[test]
    fn locked_board_disables_clicks() {
        let mut game = dealt(1);
        game.flip(0);
        game.flip(2);
        let card = &game.cards()[1];
        let view = CardView {
            position: 2,
            card,
            disabled: game.is_locked(),
        };
        assert!(!view.accepts_click());
        assert!(!board(&game).contains("[2]"));
        assert!(prompt(&game).contains("wait"));
    }

    #[test]
    fn loading_text_depends_on_level() {
        assert_eq!(loading(1), "Generating fun words...");
        assert_eq!(loading(3), "Preparing harder words for Level 3...");
    }

    #[test]
    fn screens_per_phase() {
        let mut game = Game::new(2, Timings::default());
        let round = game.begin_round();
        assert!(screen(&game).contains("Preparing harder words"));

        game.fail(round, "service unavailable");
        let text = screen(&game);
        assert!(text.contains("Oops! Something went wrong"));
        assert!(text.contains("Try Again"));
        assert!(text.contains("service unavailable"));

        let game = dealt(2);
        let text = screen(&game);
        assert!(text.contains("[Level 2]"));
        assert!(text.contains("Moves: 0   Matches: 0 / 2"));
    }

    #[test]
    fn win_overlay_offers_next_level() {
        let mut game = dealt(1);
        for position in 0..4 {
            if let Some(scheduled) = game.flip(position).scheduled {
                game.fire(scheduled.timer);
            }
        }
        assert_eq!(game.phase(), Phase::Won);
        let text = screen(&game);
        assert!(text.contains("¡Muy Bien!"));
        assert!(text.contains("You cleared Level 1 in 2 moves!"));
        assert!(text.contains("Start Level 2"));
    }

    #[test]
    fn win_overlay_at_last_level() {
        let pairs = vec![WordPair::new("Dog", "Perro")];
        let mut game = Game::new(u32::MAX, Timings::default());
        let round = game.begin_round();
        game.deal(round, build_deck(&pairs));
        game.flip(0);
        let win = game.flip(1).scheduled.unwrap();
        game.fire(win.timer);

        let text = screen(&game);
        assert!(text.contains(&format!("You cleared Level {} in 1 moves!", u32::MAX)));
        assert!(!text.contains("Start Level"));
        assert!(text.contains("q) Quit"));
    }

    #[test]
    fn feedback_for_ignored_clicks() {
        assert_eq!(
            flip_feedback(FlipOutcome::Ignored(Ignored::OutOfRange), 30).unwrap(),
            "There is no card 30."
        );
        assert!(flip_feedback(FlipOutcome::FaceUp, 1).is_none());
    }
}
