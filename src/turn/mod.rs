//! One player's turn: draw, discard, knock check.
//!
//! ## Key Types
//!
//! - `Turn`: step-wise state machine over borrowed round state
//! - `TurnEngine`: drives a whole turn from decision providers
//! - `DrawChoiceProvider`, `DiscardChoiceProvider`, `KnockChoiceProvider`:
//!   injected decision sources

pub mod engine;
pub mod provider;

pub use engine::{KnockEligibility, Turn, TurnEngine, TurnReport, TurnState};
pub use provider::{
    Decisions, DiscardChoiceProvider, DiscardView, DrawChoiceProvider, DrawSource, DrawView,
    KnockChoiceProvider, KnockView, ScriptedProvider, Seat,
};
