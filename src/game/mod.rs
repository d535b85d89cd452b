//! Rounds and matches built on the turn engine.
//!
//! - `Round`: one deal played until a knock or an exhausted stock
//! - `Match`: running scores, target score, final standings

pub mod round;
pub mod session;

pub use round::{Round, RoundProgress, RoundResult, TurnRecord};
pub use session::{Match, Standing};
