//! Error types for the word source and the game controller.
//!
//! Word generation is the only fallible I/O in the game. Its failures are
//! normally swallowed by the fallback list; they only surface when fallback is
//! disabled.

use thiserror::Error;

/// Errors that can occur while producing the word pairs for a round.
#[derive(Debug, Error)]
pub enum WordSourceError {
    /// The generation back end failed (network, HTTP status, timeout).
    #[error("word generation failed: {0:#}")]
    Provider(anyhow::Error),

    /// The back end answered with no text or an empty list.
    #[error("word generation returned an empty response")]
    EmptyResponse,

    /// The text could not be turned into a usable list of pairs.
    #[error("malformed word list: {0}")]
    Malformed(String),
}

/// Errors returned by [`GameController`](crate::controller::GameController) handles.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// The controller task has stopped and no longer accepts commands.
    #[error("game controller has shut down")]
    Closed,
}
