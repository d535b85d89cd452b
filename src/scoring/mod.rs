//! Deadwood counting and knock scoring.

pub mod deadwood;
pub mod round;

pub use deadwood::{card_points, deadwood};
pub use round::{resolve, score_round, score_round_with, OutcomeKind, RoundOutcome, Scorer};
