//! Engine error taxonomy.
//!
//! Every fallible engine operation returns `Result<_, EngineError>`.
//! The engine never prints or retries; the presentation layer decides how
//! to surface an error and whether to ask again.

use thiserror::Error;

/// Errors produced by the rules engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// No cards left to deal. Fatal to the current round, which ends as a draw.
    #[error("cannot deal from an empty deck")]
    EmptyDeck,

    /// A hand was requested that the deck cannot cover. Fatal at round setup.
    #[error("cannot deal {requested} cards, only {remaining} remain")]
    InsufficientCards { requested: usize, remaining: usize },

    /// Rejected before any cards are generated.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A 1-based selection outside `1..=len`.
    #[error("selection {index} is out of range (1-{len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// A decision provider had nothing to offer (script exhausted, input closed).
    #[error("no decision available: {0}")]
    DecisionUnavailable(String),
}

impl EngineError {
    /// Whether this error ends the round without a score rather than the whole game.
    #[must_use]
    pub fn ends_round_as_draw(&self) -> bool {
        matches!(self, EngineError::EmptyDeck)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(EngineError::EmptyDeck.to_string(), "cannot deal from an empty deck");
        assert_eq!(
            EngineError::InsufficientCards { requested: 11, remaining: 3 }.to_string(),
            "cannot deal 11 cards, only 3 remain"
        );
        assert_eq!(
            EngineError::IndexOutOfRange { index: 12, len: 11 }.to_string(),
            "selection 12 is out of range (1-11)"
        );
    }

    #[test]
    fn test_ends_round_as_draw() {
        assert!(EngineError::EmptyDeck.ends_round_as_draw());
        assert!(!EngineError::InvalidConfiguration("x".into()).ends_round_as_draw());
    }
}
