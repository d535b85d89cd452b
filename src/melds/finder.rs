//! Greedy set and run detection.
//!
//! Sets and runs are found independently, so a card can show up in both a
//! set and a run. Deadwood counts such a card once as melded. No attempt is
//! made to pick the deadwood-minimising partition; outcomes depend on this
//! exact greedy behaviour.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use super::meld::{Meld, MeldKind, MIN_MELD_LEN};
use crate::cards::{Card, Rank, Suit};
use crate::scoring::deadwood;

/// Find every rank held in at least three distinct suits.
///
/// One set per qualifying rank, one card per suit; the first card seen wins
/// when a rank/suit pair repeats. Sets come back in ascending rank order.
///
/// ```
/// use gin_rummy::cards::parse_cards;
/// use gin_rummy::melds::find_sets;
///
/// let hand = parse_cards("AS AD AH 2S 3S 4S").unwrap();
/// let sets = find_sets(&hand);
/// assert_eq!(sets.len(), 1);
/// assert_eq!(sets[0].to_string(), "[ AS AD AH ]");
/// ```
#[must_use]
pub fn find_sets(hand: &[Card]) -> Vec<Meld> {
    let mut by_rank: FxHashMap<Rank, SmallVec<[Card; 4]>> = FxHashMap::default();

    for &card in hand {
        let group = by_rank.entry(card.rank()).or_default();
        if !group.iter().any(|c| c.suit() == card.suit()) {
            group.push(card);
        }
    }

    let mut sets: Vec<Meld> = by_rank
        .into_values()
        .filter(|group| group.len() >= MIN_MELD_LEN)
        .map(|group| Meld::new(MeldKind::Set, group))
        .collect();
    sets.sort_by_key(|meld| meld.cards()[0].rank());
    sets
}

/// Find maximal same-suit runs of three or more consecutive ranks.
///
/// Each suit is sorted by rank and scanned once. A gap, a repeated rank, or
/// the end of the suit closes the current run. Ace is low only.
/// Runs come back ordered by suit, then by starting rank.
///
/// ```
/// use gin_rummy::cards::parse_cards;
/// use gin_rummy::melds::find_runs;
///
/// let hand = parse_cards("QS KS AS 2S").unwrap();
/// assert!(find_runs(&hand).is_empty());
/// ```
#[must_use]
pub fn find_runs(hand: &[Card]) -> Vec<Meld> {
    let mut by_suit: FxHashMap<Suit, Vec<Card>> = FxHashMap::default();
    for &card in hand {
        by_suit.entry(card.suit()).or_default().push(card);
    }

    let mut suits: Vec<_> = by_suit.into_iter().collect();
    suits.sort_by_key(|(suit, _)| *suit);

    let mut runs = Vec::new();
    for (_, mut cards) in suits {
        if cards.len() < MIN_MELD_LEN {
            continue;
        }
        cards.sort_by_key(|c| c.rank());

        let mut current: SmallVec<[Card; 4]> = SmallVec::new();
        for card in cards {
            let extends = current
                .last()
                .is_some_and(|last| card.rank().value() == last.rank().value() + 1);

            if !extends {
                if current.len() >= MIN_MELD_LEN {
                    runs.push(Meld::new(MeldKind::Run, std::mem::take(&mut current)));
                }
                current.clear();
            }
            current.push(card);
        }
        if current.len() >= MIN_MELD_LEN {
            runs.push(Meld::new(MeldKind::Run, current));
        }
    }
    runs
}

/// Sets and runs found in one hand snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeldSet {
    pub sets: Vec<Meld>,
    pub runs: Vec<Meld>,
}

impl MeldSet {
    /// Run both finders over a hand.
    #[must_use]
    pub fn find(hand: &[Card]) -> Self {
        let melds = Self {
            sets: find_sets(hand),
            runs: find_runs(hand),
        };
        trace!(sets = melds.sets.len(), runs = melds.runs.len(), "melds recomputed");
        melds
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty() && self.runs.is_empty()
    }

    /// Every meld, sets first.
    pub fn iter(&self) -> impl Iterator<Item = &Meld> {
        self.sets.iter().chain(self.runs.iter())
    }

    /// Distinct cards appearing in any meld.
    #[must_use]
    pub fn melded_cards(&self) -> FxHashSet<Card> {
        self.iter().flat_map(|m| m.cards().iter().copied()).collect()
    }

    /// Deadwood of `hand` against these melds.
    #[must_use]
    pub fn deadwood(&self, hand: &[Card]) -> u32 {
        deadwood(hand, &self.sets, &self.runs)
    }
}

/// Shorthand for `MeldSet::find`.
#[must_use]
pub fn find_melds(hand: &[Card]) -> MeldSet {
    MeldSet::find(hand)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn cards(text: &str) -> Vec<Card> {
        parse_cards(text).unwrap()
    }

    fn strings(melds: &[Meld]) -> Vec<String> {
        melds.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_set_needs_three_suits() {
        assert!(find_sets(&cards("5C 5D 7H 9S")).is_empty());
        assert_eq!(strings(&find_sets(&cards("5C 5D 5H"))), vec!["[ 5C 5D 5H ]"]);
    }

    #[test]
    fn test_four_card_set() {
        let sets = find_sets(&cards("KS KH KD KC"));
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].len(), 4);
        assert_eq!(sets[0].kind(), MeldKind::Set);
    }

    #[test]
    fn test_duplicate_suit_first_seen_wins() {
        // Two KH only possible with more than one pack; the first is kept.
        let sets = find_sets(&cards("KH KS KH KD"));
        assert_eq!(strings(&sets), vec!["[ KH KS KD ]"]);

        // Only two distinct suits even though three cards share the rank.
        assert!(find_sets(&cards("KH KH KS")).is_empty());
    }

    #[test]
    fn test_sets_sorted_by_rank() {
        let sets = find_sets(&cards("9C 9D 9H 2C 2D 2H"));
        assert_eq!(strings(&sets), vec!["[ 2C 2D 2H ]", "[ 9C 9D 9H ]"]);
    }

    #[test]
    fn test_run_unsorted_input() {
        let runs = find_runs(&cards("4S 2S 3S"));
        assert_eq!(strings(&runs), vec!["[ 2S 3S 4S ]"]);
    }

    #[test]
    fn test_run_split_by_gap() {
        let runs = find_runs(&cards("AH 2H 3H 5H 6H 7H 8H"));
        assert_eq!(strings(&runs), vec!["[ AH 2H 3H ]", "[ 5H 6H 7H 8H ]"]);
    }

    #[test]
    fn test_short_fragments_dropped() {
        assert!(find_runs(&cards("2D 3D 5D 6D")).is_empty());
    }

    #[test]
    fn test_duplicate_rank_breaks_run() {
        // 4D 4D restarts the scan at the second 4D: [2D 3D 4D] then [4D 5D 6D]
        let runs = find_runs(&cards("2D 3D 4D 4D 5D 6D"));
        assert_eq!(strings(&runs), vec!["[ 2D 3D 4D ]", "[ 4D 5D 6D ]"]);

        assert!(find_runs(&cards("2D 3D 3D 4D")).is_empty());
    }

    #[test]
    fn test_no_wraparound() {
        assert!(find_runs(&cards("QC KC AC")).is_empty());
        assert_eq!(strings(&find_runs(&cards("JC QC KC AC"))), vec!["[ JC QC KC ]"]);
    }

    #[test]
    fn test_runs_do_not_span_suits() {
        assert!(find_runs(&cards("2S 3H 4S 5H")).is_empty());
    }

    #[test]
    fn test_runs_sorted_by_suit() {
        let runs = find_runs(&cards("2S 3S 4S 9C TC JC"));
        assert_eq!(strings(&runs), vec!["[ 9C TC JC ]", "[ 2S 3S 4S ]"]);
    }

    #[test]
    fn test_card_in_set_and_run() {
        let hand = cards("7C 7D 7H 8H 9H");
        let melds = MeldSet::find(&hand);
        assert_eq!(melds.sets.len(), 1);
        assert_eq!(melds.runs.len(), 1);
        assert!(melds.sets[0].contains("7H".parse().unwrap()));
        assert!(melds.runs[0].contains("7H".parse().unwrap()));
        assert_eq!(melds.melded_cards().len(), 5);
        assert_eq!(melds.deadwood(&hand), 0);
    }

    #[test]
    fn test_finders_do_not_mutate() {
        let hand = cards("4S 2S 3S KD");
        let before = hand.clone();
        let first = find_melds(&hand);
        let second = find_melds(&hand);
        assert_eq!(hand, before);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_hand() {
        let melds = MeldSet::find(&[]);
        assert!(melds.is_empty());
        assert_eq!(melds.deadwood(&[]), 0);
    }
}
