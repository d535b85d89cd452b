//! Core engine types: players, RNG, configuration, errors.
//!
//! These are the building blocks every other module threads through.

pub mod config;
pub mod error;
pub mod player;
pub mod rng;

pub use config::{GameConfig, MAX_PACKS, MAX_RULE_POINTS};
pub use error::EngineError;
pub use player::{PlayerId, PlayerMap, PLAYER_COUNT};
pub use rng::GameRng;
