//! The undealt stock.
//!
//! `Deck` owns the cards not yet dealt, in deal order. The top of the deck is
//! the end of the vector, so dealing is a `pop`.

use tracing::debug;

use crate::cards::{Card, Rank, Suit, PACK_SIZE};
use crate::core::{EngineError, GameRng, MAX_PACKS};

/// A shuffled stock built from a single standard pack.
///
/// ## Usage
///
/// ```
/// use gin_rummy::core::GameRng;
/// use gin_rummy::deck::Deck;
///
/// let mut rng = GameRng::new(7);
/// let mut deck = Deck::new(1, &mut rng).unwrap();
/// assert_eq!(deck.remaining(), 52);
///
/// let hand = deck.deal_hand(10).unwrap();
/// assert_eq!(hand.len(), 10);
/// assert_eq!(deck.remaining(), 42);
/// ```
#[derive(Clone, Debug)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Build `num_packs` packs and shuffle them.
    ///
    /// Only a single pack is supported; anything else is rejected before any
    /// card is generated.
    pub fn new(num_packs: usize, rng: &mut GameRng) -> Result<Self, EngineError> {
        if num_packs == 0 || num_packs > MAX_PACKS {
            return Err(EngineError::InvalidConfiguration(format!(
                "{num_packs} packs requested, at most {MAX_PACKS} supported"
            )));
        }

        let mut cards = Vec::with_capacity(num_packs * PACK_SIZE);
        for _ in 0..num_packs {
            for suit in Suit::ALL {
                for rank in Rank::ALL {
                    cards.push(Card::new(suit, rank));
                }
            }
        }

        let mut deck = Self { cards };
        deck.shuffle(rng);
        Ok(deck)
    }

    /// A shuffled single-pack deck.
    pub fn standard(rng: &mut GameRng) -> Result<Self, EngineError> {
        Self::new(1, rng)
    }

    /// A deck in a known order; the last card is dealt first. Not shuffled.
    #[must_use]
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Fisher–Yates: position `i` swaps with a uniform position in `[i, n)`.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        let n = self.cards.len();
        for i in 0..n {
            let r = rng.gen_range_usize(i..n);
            if r != i {
                self.cards.swap(i, r);
            }
        }
        debug!(cards = n, "deck shuffled");
    }

    /// Number of undealt cards.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The card `deal_card` would return next.
    #[must_use]
    pub fn peek_top(&self) -> Option<Card> {
        self.cards.last().copied()
    }

    /// Undealt cards, bottom first.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Remove and return the top card.
    pub fn deal_card(&mut self) -> Result<Card, EngineError> {
        self.cards.pop().ok_or(EngineError::EmptyDeck)
    }

    /// Deal `n` cards, or none at all.
    ///
    /// Cards come off the top one at a time, so the first element is the
    /// former top card.
    pub fn deal_hand(&mut self, n: usize) -> Result<Vec<Card>, EngineError> {
        let remaining = self.cards.len();
        if n > remaining {
            return Err(EngineError::InsufficientCards {
                requested: n,
                remaining,
            });
        }

        let mut hand = self.cards.split_off(remaining - n);
        hand.reverse();
        debug!(dealt = n, remaining = self.cards.len(), "hand dealt");
        Ok(hand)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_new_has_every_card_once() {
        let mut rng = GameRng::new(42);
        let deck = Deck::new(1, &mut rng).unwrap();

        assert_eq!(deck.remaining(), 52);
        let unique: HashSet<_> = deck.cards().iter().copied().collect();
        assert_eq!(unique.len(), 52);
    }

    #[test]
    fn test_new_rejects_extra_packs() {
        let mut rng = GameRng::new(42);
        assert!(matches!(
            Deck::new(2, &mut rng),
            Err(EngineError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            Deck::new(0, &mut rng),
            Err(EngineError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_same_seed_same_order() {
        let a = Deck::standard(&mut GameRng::new(9)).unwrap();
        let b = Deck::standard(&mut GameRng::new(9)).unwrap();
        assert_eq!(a.cards(), b.cards());
    }

    #[test]
    fn test_successive_shuffles_differ() {
        let mut rng = GameRng::new(9);
        let a = Deck::standard(&mut rng).unwrap();
        let b = Deck::standard(&mut rng).unwrap();
        assert_ne!(a.cards(), b.cards());
    }

    #[test]
    fn test_deal_card_from_top() {
        let cards: Vec<Card> = ["AS", "2S", "3S"].iter().map(|s| s.parse().unwrap()).collect();
        let mut deck = Deck::from_cards(cards);

        assert_eq!(deck.peek_top(), Some("3S".parse().unwrap()));
        assert_eq!(deck.deal_card().unwrap().to_string(), "3S");
        assert_eq!(deck.deal_card().unwrap().to_string(), "2S");
        assert_eq!(deck.deal_card().unwrap().to_string(), "AS");
        assert_eq!(deck.deal_card(), Err(EngineError::EmptyDeck));
        assert!(deck.is_empty());
    }

    #[test]
    fn test_deal_hand_order_matches_repeated_deal_card() {
        let mut a = Deck::standard(&mut GameRng::new(3)).unwrap();
        let mut b = a.clone();

        let hand = a.deal_hand(5).unwrap();
        let singles: Vec<_> = (0..5).map(|_| b.deal_card().unwrap()).collect();

        assert_eq!(hand, singles);
        assert_eq!(a.cards(), b.cards());
    }

    #[test]
    fn test_deal_hand_is_all_or_nothing() {
        let mut deck = Deck::standard(&mut GameRng::new(1)).unwrap();
        deck.deal_hand(50).unwrap();

        let err = deck.deal_hand(3).unwrap_err();
        assert_eq!(err, EngineError::InsufficientCards { requested: 3, remaining: 2 });
        assert_eq!(deck.remaining(), 2);

        assert_eq!(deck.deal_hand(2).unwrap().len(), 2);
        assert!(deck.is_empty());
        assert_eq!(deck.deal_hand(0).unwrap(), Vec::<Card>::new());
    }
}
