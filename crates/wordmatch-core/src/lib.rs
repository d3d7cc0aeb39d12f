//! wordmatch-core: game model, deck building, word source and controller.
//!
//! This crate holds everything about the bilingual memory game that does not
//! depend on a particular generation back end or front end.

pub mod controller;
pub mod deck;
pub mod error;
pub mod game;
pub mod model;
pub mod traits;
pub mod words;

pub use controller::GameController;
pub use error::{ControllerError, WordSourceError};
pub use game::{Game, Phase, Timings};
pub use model::{Card, Difficulty, Lang, WordPair};
pub use words::{WordSource, WordSourceConfig};
