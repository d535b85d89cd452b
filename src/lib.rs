//! # gin-rummy
//!
//! A two-player Gin Rummy rules engine.
//!
//! ## Design Principles
//!
//! 1. **Explicit Ownership**: The deck, both hands, and the discard pile are
//!    owned by the round and passed by `&mut` to the turn engine. No globals.
//!
//! 2. **Derived Melds**: Sets and runs are recomputed from the hand after
//!    every change, never stored as independent state.
//!
//! 3. **Injected Decisions**: Every choice a player makes comes through a
//!    provider trait, so the engine runs the same under a terminal, a test
//!    script, or anything else.
//!
//! ## Modules
//!
//! - `core`: Players, RNG, configuration, errors
//! - `cards`: Suits, ranks, cards, hands
//! - `deck`: The stock and the discard pile
//! - `melds`: Set and run detection
//! - `scoring`: Deadwood and knock resolution
//! - `turn`: The turn state machine and decision providers
//! - `game`: Rounds and matches

pub mod cards;
pub mod core;
pub mod deck;
pub mod game;
pub mod melds;
pub mod scoring;
pub mod turn;

// Re-export commonly used types
pub use crate::core::{EngineError, GameConfig, GameRng, PlayerId, PlayerMap};

pub use crate::cards::{parse_cards, Card, Hand, ParseCardError, Rank, Suit};

pub use crate::deck::{Deck, DiscardPile};

pub use crate::melds::{find_melds, find_runs, find_sets, Meld, MeldKind, MeldSet};

pub use crate::scoring::{card_points, deadwood, score_round, OutcomeKind, RoundOutcome, Scorer};

pub use crate::turn::{
    Decisions, DiscardChoiceProvider, DiscardView, DrawChoiceProvider, DrawSource, DrawView,
    KnockChoiceProvider, KnockView, ScriptedProvider, Seat, Turn, TurnEngine, TurnReport,
    TurnState,
};

pub use crate::game::{Match, Round, RoundProgress, RoundResult, Standing, TurnRecord};
