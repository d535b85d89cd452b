//! Card values and hands.
//!
//! ## Key Types
//!
//! - `Suit`, `Rank`: numbered enums (suits 1..=4, ranks 1..=13, Ace low)
//! - `Card`: immutable suit/rank pair with `AS`/`TD` notation
//! - `Hand`: a player's cards, discarded by 1-based index

pub mod card;
pub mod hand;

pub use card::{Card, ParseCardError, Rank, Suit};
pub use hand::Hand;

/// Cards in one standard pack.
pub const PACK_SIZE: usize = 52;

/// Parse a whitespace-separated list of cards, e.g. `"AS AD AH 2S"`.
///
/// ```
/// use gin_rummy::cards::parse_cards;
///
/// let cards = parse_cards("AS 10D kh").unwrap();
/// assert_eq!(cards.len(), 3);
/// ```
pub fn parse_cards(text: &str) -> Result<Vec<Card>, ParseCardError> {
    text.split_whitespace().map(str::parse).collect()
}
