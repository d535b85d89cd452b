//! A player's hand.
//!
//! The hand is an unordered multiset owned by one player. It changes only
//! through `push` (draw) and `discard` (1-based removal). Display order is
//! insertion order, which is what the discard index refers to.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::card::Card;
use crate::core::EngineError;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    /// Create an empty hand.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a hand holding the given cards in order.
    #[must_use]
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Add a drawn card.
    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Remove the card at 1-based position `index`.
    ///
    /// Out-of-range selections are rejected without touching the hand.
    pub fn discard(&mut self, index: usize) -> Result<Card, EngineError> {
        if index == 0 || index > self.cards.len() {
            return Err(EngineError::IndexOutOfRange {
                index,
                len: self.cards.len(),
            });
        }
        Ok(self.cards.remove(index - 1))
    }

    /// Card at 1-based position `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Card> {
        index.checked_sub(1).and_then(|i| self.cards.get(i)).copied()
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}

impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        Self::from_cards(cards)
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for card in &self.cards {
            write!(f, " {card}")?;
        }
        write!(f, " ]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    #[test]
    fn test_push_and_discard() {
        let mut hand = Hand::new();
        hand.push(card("AS"));
        hand.push(card("7D"));
        hand.push(card("KH"));

        assert_eq!(hand.len(), 3);
        assert_eq!(hand.discard(2).unwrap(), card("7D"));
        assert_eq!(hand.cards(), &[card("AS"), card("KH")]);
    }

    #[test]
    fn test_discard_out_of_range() {
        let mut hand = Hand::from_cards(vec![card("AS"), card("2S")]);

        assert_eq!(
            hand.discard(0),
            Err(EngineError::IndexOutOfRange { index: 0, len: 2 })
        );
        assert_eq!(
            hand.discard(3),
            Err(EngineError::IndexOutOfRange { index: 3, len: 2 })
        );
        // Untouched
        assert_eq!(hand.len(), 2);
    }

    #[test]
    fn test_get_is_one_based() {
        let hand = Hand::from_cards(vec![card("AS"), card("2S")]);
        assert_eq!(hand.get(1), Some(Card::new(Suit::Spades, Rank::Ace)));
        assert_eq!(hand.get(0), None);
        assert_eq!(hand.get(3), None);
    }

    #[test]
    fn test_display() {
        let hand = Hand::from_cards(vec![card("AS"), card("TD")]);
        assert_eq!(hand.to_string(), "[ AS TD ]");
        assert_eq!(Hand::new().to_string(), "[ ]");
    }
}
