//! Deadwood: the point value of unmelded cards.

use rustc_hash::FxHashSet;

use crate::cards::{Card, Rank};
use crate::melds::Meld;

/// Point value of a single card: Ace 1, 2-9 face value, ten and courts 10.
#[must_use]
pub fn card_points(card: Card) -> u32 {
    match card.rank() {
        Rank::Ace => 1,
        rank if rank >= Rank::Ten => 10,
        rank => u32::from(rank.value()),
    }
}

/// Sum the points of every card in `hand` that is in none of the melds.
///
/// Membership is by suit and rank, so a card shared between a set and a run
/// is simply melded.
///
/// ```
/// use gin_rummy::cards::parse_cards;
/// use gin_rummy::scoring::deadwood;
///
/// let hand = parse_cards("5C 5D 7H 9S").unwrap();
/// assert_eq!(deadwood(&hand, &[], &[]), 26);
/// ```
#[must_use]
pub fn deadwood(hand: &[Card], sets: &[Meld], runs: &[Meld]) -> u32 {
    let melded: FxHashSet<Card> = sets
        .iter()
        .chain(runs)
        .flat_map(|meld| meld.cards().iter().copied())
        .collect();

    hand.iter()
        .filter(|card| !melded.contains(card))
        .map(|&card| card_points(card))
        .sum()
}
