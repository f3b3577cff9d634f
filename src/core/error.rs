//! Error handling logic

use crate::cards::CardKind;
use thiserror::Error;

/// Error types raised by the register engine and the game engine.
///
/// Every variant is raised synchronously at the point of violation and
/// before any state is mutated. None of them are transient: they point at a
/// caller bug, a corrupt configuration or a broken internal invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QDutchError {
    /// An index, qubit or gate layout is outside the bounds the target accepts.
    #[error("Invalid Argument: {message}")]
    InvalidArgument {
        /// InvalidArgument failure message
        message: String,
    },

    /// A card was routed to an operation that does not accept its kind.
    #[error("Invalid Card Kind: expected {expected}, found {found}")]
    InvalidCardKind {
        /// Human readable list of the kinds the operation accepts
        expected: &'static str,
        /// The kind that was actually supplied
        found: CardKind,
    },

    /// A register has (numerically) no probability mass left where a
    /// measurement needs it. Indicates a normalization violation upstream.
    #[error("Degenerate State: {message}")]
    DegenerateState {
        /// DegenerateState failure message
        message: String,
    },

    /// Probabilities do not sum to one, a weight is negative, a width or
    /// player count is out of range, or a config file could not be loaded.
    #[error("Invalid Configuration: {message}")]
    InvalidConfiguration {
        /// InvalidConfiguration failure message
        message: String,
    },

    /// The action is well-formed but the current match state forbids it.
    #[error("Invalid Action: {message}")]
    InvalidAction {
        /// InvalidAction failure message
        message: String,
    },
}

impl QDutchError {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        QDutchError::InvalidArgument { message: message.into() }
    }

    pub(crate) fn degenerate(message: impl Into<String>) -> Self {
        QDutchError::DegenerateState { message: message.into() }
    }

    pub(crate) fn invalid_configuration(message: impl Into<String>) -> Self {
        QDutchError::InvalidConfiguration { message: message.into() }
    }
}
