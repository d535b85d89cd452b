//! Meld values.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

use crate::cards::Card;

/// Minimum cards in any meld.
pub const MIN_MELD_LEN: usize = 3;

/// Which rule a meld satisfies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeldKind {
    /// Same rank, pairwise distinct suits.
    Set,
    /// Same suit, strictly consecutive ranks, Ace low, no wraparound.
    Run,
}

/// An ordered group of three or more cards.
///
/// SmallVec keeps sets (at most four cards) and short runs off the heap.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Meld {
    kind: MeldKind,
    cards: SmallVec<[Card; 4]>,
}

impl Meld {
    pub(crate) fn new(kind: MeldKind, cards: SmallVec<[Card; 4]>) -> Self {
        debug_assert!(cards.len() >= MIN_MELD_LEN);
        Self { kind, cards }
    }

    #[must_use]
    pub fn kind(&self) -> MeldKind {
        self.kind
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Always false; melds hold at least three cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    /// Check the cards against the meld's rule.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        if self.cards.len() < MIN_MELD_LEN {
            return false;
        }
        match self.kind {
            MeldKind::Set => {
                let rank = self.cards[0].rank();
                let mut suits: SmallVec<[_; 4]> = SmallVec::new();
                for card in &self.cards {
                    if card.rank() != rank || suits.contains(&card.suit()) {
                        return false;
                    }
                    suits.push(card.suit());
                }
                true
            }
            MeldKind::Run => self.cards.windows(2).all(|pair| {
                pair[0].suit() == pair[1].suit()
                    && pair[1].rank().value() == pair[0].rank().value() + 1
            }),
        }
    }
}

impl fmt::Display for Meld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for card in &self.cards {
            write!(f, " {card}")?;
        }
        write!(f, " ]")
    }
}
