//! Card piles: the stock and the discard pile.
//!
//! - `Deck`: shuffled stock, dealt from the top
//! - `DiscardPile`: face-up LIFO pile seeded with one card per round

pub mod discard;
pub mod stock;

pub use discard::DiscardPile;
pub use stock::Deck;
