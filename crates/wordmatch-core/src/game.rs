//! Round state and the flip/compare/resolve state machine.
//!
//! [`Game`] is synchronous and owns no clock. Transitions that must wait
//! (flipping a mismatched pair back, declaring the round won) are handed back to
//! the caller as [`Scheduled`] timers. A timer carries the round generation it
//! was created in and [`Game::fire`] drops it if a new round has started since.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::model::Card;

/// Delay before a mismatched pair turns face-down again.
pub const MISMATCH_DELAY: Duration = Duration::from_millis(1200);

/// Delay between the final match and the win state.
pub const WIN_DELAY: Duration = Duration::from_millis(800);

/// Top-level game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Loading,
    Playing,
    Won,
    Error,
}

/// Delays for the timed transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub mismatch_delay: Duration,
    pub win_delay: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            mismatch_delay: MISMATCH_DELAY,
            win_delay: WIN_DELAY,
        }
    }
}

/// What a timer does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Turn the two given board positions face-down and clear the face-up buffer.
    FlipBack { first: usize, second: usize },
    /// Enter [`Phase::Won`].
    Win,
}

/// A delayed transition bound to one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    pub round: u64,
    pub kind: TimerKind,
}

/// A timer plus how long to wait before firing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduled {
    pub delay: Duration,
    pub timer: Timer,
}

/// Why a click had no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ignored {
    NotPlaying,
    BoardLocked,
    OutOfRange,
    AlreadyMatched,
    AlreadyFaceUp,
}

/// Result of a single click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipOutcome {
    Ignored(Ignored),
    /// First card of a pair turned face-up.
    FaceUp,
    Matched,
    Mismatched,
}

/// A click's outcome and the timer it started, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flip {
    pub outcome: FlipOutcome,
    pub scheduled: Option<Scheduled>,
}

impl Flip {
    fn ignored(reason: Ignored) -> Self {
        Self {
            outcome: FlipOutcome::Ignored(reason),
            scheduled: None,
        }
    }
}

/// The single owned game-state record.
#[derive(Debug, Clone)]
pub struct Game {
    phase: Phase,
    level: u32,
    round: u64,
    cards: Vec<Card>,
    face_up: Vec<usize>,
    moves: u32,
    matches_found: usize,
    total_pairs: usize,
    error: Option<String>,
    timings: Timings,
}

impl Game {
    /// A game at `level` (clamped to at least 1) with no round dealt yet.
    pub fn new(level: u32, timings: Timings) -> Self {
        Self {
            phase: Phase::Loading,
            level: level.max(1),
            round: 0,
            cards: Vec::new(),
            face_up: Vec::with_capacity(2),
            moves: 0,
            matches_found: 0,
            total_pairs: 0,
            error: None,
            timings,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Generation counter, bumped by every [`Game::begin_round`].
    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Board positions currently face-up and unresolved.
    pub fn face_up(&self) -> &[usize] {
        &self.face_up
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn matches_found(&self) -> usize {
        self.matches_found
    }

    pub fn total_pairs(&self) -> usize {
        self.total_pairs
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn timings(&self) -> Timings {
        self.timings
    }

    /// Two cards are face-up; further clicks are blocked.
    pub fn is_locked(&self) -> bool {
        self.face_up.len() >= 2
    }

    pub fn all_matched(&self) -> bool {
        self.total_pairs > 0 && self.matches_found == self.total_pairs
    }

    /// Restart is available once loading has finished.
    pub fn can_restart(&self) -> bool {
        !matches!(self.phase, Phase::Loading)
    }

    /// Advancing is available from the board or the win overlay.
    pub fn can_advance(&self) -> bool {
        matches!(self.phase, Phase::Playing | Phase::Won)
    }

    /// Enter loading for a fresh round and return its generation.
    ///
    /// Counters, the face-up buffer and the deck are cleared; the level is kept.
    pub fn begin_round(&mut self) -> u64 {
        self.round += 1;
        self.phase = Phase::Loading;
        self.cards.clear();
        self.face_up.clear();
        self.moves = 0;
        self.matches_found = 0;
        self.total_pairs = 0;
        self.error = None;
        self.round
    }

    /// Move to the next level. Call [`Game::begin_round`] afterwards.
    ///
    /// Returns `false` outside the board or win overlay, and at the last level.
    pub fn advance_level(&mut self) -> bool {
        if !self.can_advance() {
            return false;
        }
        match self.level.checked_add(1) {
            Some(next) => {
                self.level = next;
                true
            }
            None => false,
        }
    }

    /// Install a shuffled deck for `round` and start playing.
    ///
    /// Returns `false` if `round` is stale or the game is not loading. An empty
    /// deck puts the game into [`Phase::Error`].
    pub fn deal(&mut self, round: u64, cards: Vec<Card>) -> bool {
        if round != self.round || self.phase != Phase::Loading {
            return false;
        }
        if cards.is_empty() {
            return self.fail(round, "no word pairs available");
        }

        self.total_pairs = cards.len() / 2;
        self.cards = cards;
        self.phase = Phase::Playing;
        true
    }

    /// Put a loading round into [`Phase::Error`].
    pub fn fail(&mut self, round: u64, message: impl Into<String>) -> bool {
        if round != self.round || self.phase != Phase::Loading {
            return false;
        }
        self.phase = Phase::Error;
        self.error = Some(message.into());
        true
    }

    /// Click the card at `position` (0-based).
    pub fn flip(&mut self, position: usize) -> Flip {
        if self.phase != Phase::Playing {
            return Flip::ignored(Ignored::NotPlaying);
        }
        if self.is_locked() {
            return Flip::ignored(Ignored::BoardLocked);
        }
        let Some(card) = self.cards.get_mut(position) else {
            return Flip::ignored(Ignored::OutOfRange);
        };
        if card.is_matched {
            return Flip::ignored(Ignored::AlreadyMatched);
        }
        if card.is_flipped {
            return Flip::ignored(Ignored::AlreadyFaceUp);
        }

        card.is_flipped = true;
        self.face_up.push(position);

        let [first, second] = match self.face_up[..] {
            [first, second] => [first, second],
            _ => {
                return Flip {
                    outcome: FlipOutcome::FaceUp,
                    scheduled: None,
                }
            }
        };

        self.moves += 1;

        if self.cards[first].pair_id == self.cards[second].pair_id {
            for index in [first, second] {
                let card = &mut self.cards[index];
                card.is_matched = true;
                card.is_flipped = true;
            }
            self.matches_found += 1;
            self.face_up.clear();

            let scheduled = self.all_matched().then(|| self.schedule(TimerKind::Win));
            Flip {
                outcome: FlipOutcome::Matched,
                scheduled,
            }
        } else {
            Flip {
                outcome: FlipOutcome::Mismatched,
                scheduled: Some(self.schedule(TimerKind::FlipBack { first, second })),
            }
        }
    }

    /// Apply a timer. Returns `false` if it belongs to an earlier round or no
    /// longer applies.
    pub fn fire(&mut self, timer: Timer) -> bool {
        if timer.round != self.round || self.phase != Phase::Playing {
            return false;
        }

        match timer.kind {
            TimerKind::FlipBack { first, second } => {
                for index in [first, second] {
                    if let Some(card) = self.cards.get_mut(index) {
                        if !card.is_matched {
                            card.is_flipped = false;
                        }
                    }
                }
                self.face_up.clear();
                true
            }
            TimerKind::Win => {
                if !self.all_matched() {
                    return false;
                }
                self.phase = Phase::Won;
                true
            }
        }
    }

    fn schedule(&self, kind: TimerKind) -> Scheduled {
        let delay = match kind {
            TimerKind::FlipBack { .. } => self.timings.mismatch_delay,
            TimerKind::Win => self.timings.win_delay,
        };
        Scheduled {
            delay,
            timer: Timer {
                round: self.round,
                kind,
            },
        }
    }
}
