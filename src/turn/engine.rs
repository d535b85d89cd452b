//! The per-turn state machine.
//!
//! A turn moves `AwaitingDraw → AwaitingDiscard → Resolved`:
//! - draw one card (stock or discard pile, with fallbacks), recompute melds
//! - discard one card by 1-based index, recompute melds
//! - check knock eligibility against the post-discard deadwood
//!
//! `Turn` exposes each step for callers that drive the turn themselves;
//! `TurnEngine::run_turn` drives all three steps from decision providers.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::provider::{
    Decisions, DiscardChoiceProvider, DiscardView, DrawChoiceProvider, DrawSource, DrawView,
    KnockChoiceProvider, KnockView, Seat,
};
use crate::cards::{Card, Hand};
use crate::core::{EngineError, GameConfig};
use crate::deck::{Deck, DiscardPile};
use crate::melds::MeldSet;

/// Where a turn currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnState {
    AwaitingDraw,
    AwaitingDiscard,
    Resolved,
}

/// Whether the post-discard hand may knock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KnockEligibility {
    /// Zero deadwood: the knock is declared without asking.
    Gin,
    /// Deadwood within the threshold: the player chooses.
    Optional,
    /// Too much deadwood to knock this turn.
    Ineligible,
}

impl KnockEligibility {
    /// Classify a deadwood total against a knock threshold.
    #[must_use]
    pub fn for_deadwood(deadwood: u32, threshold: u32) -> Self {
        if deadwood == 0 {
            KnockEligibility::Gin
        } else if deadwood <= threshold {
            KnockEligibility::Optional
        } else {
            KnockEligibility::Ineligible
        }
    }
}

/// Everything a resolved turn reports back to the round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    pub drawn: Card,
    /// What the player asked for.
    pub requested: DrawSource,
    /// Where the card actually came from.
    pub source: DrawSource,
    pub discarded: Card,
    /// Post-discard melds.
    pub melds: MeldSet,
    /// Post-discard deadwood.
    pub deadwood: u32,
    pub knocked: bool,
    pub gin: bool,
}

/// One player's turn over borrowed round state.
///
/// The steps must be called in order: `draw` while `AwaitingDraw`, then
/// `discard` while `AwaitingDiscard`, then `finish` once `Resolved`. Check
/// [`Turn::state`] before each step. Calling a step in the wrong state is a
/// caller bug and panics. Recoverable failures come back as `Err` and leave
/// the turn in a state it can continue from.
///
/// # Panics
///
/// `draw`, `discard` and `finish` panic when called out of order.
pub struct Turn<'a> {
    deck: &'a mut Deck,
    hand: &'a mut Hand,
    discard_pile: &'a mut DiscardPile,
    knock_threshold: u32,
    state: TurnState,
    melds: MeldSet,
    drawn: Option<(Card, DrawSource, DrawSource)>,
    discarded: Option<Card>,
    deadwood: u32,
    knocked: bool,
}

impl<'a> Turn<'a> {
    /// Start a turn in `AwaitingDraw`.
    pub fn new(
        engine: &TurnEngine,
        deck: &'a mut Deck,
        hand: &'a mut Hand,
        discard_pile: &'a mut DiscardPile,
    ) -> Self {
        let melds = MeldSet::find(hand.cards());
        let deadwood = melds.deadwood(hand.cards());
        Self {
            deck,
            hand,
            discard_pile,
            knock_threshold: engine.knock_threshold,
            state: TurnState::AwaitingDraw,
            melds,
            drawn: None,
            discarded: None,
            deadwood,
            knocked: false,
        }
    }

    #[must_use]
    pub fn state(&self) -> TurnState {
        self.state
    }

    #[must_use]
    pub fn hand(&self) -> &Hand {
        self.hand
    }

    /// Melds of the hand as it stands after the latest step.
    #[must_use]
    pub fn melds(&self) -> &MeldSet {
        &self.melds
    }

    #[must_use]
    pub fn draw_view(&self) -> DrawView<'_> {
        DrawView {
            hand: self.hand.cards(),
            discard_top: self.discard_pile.top(),
            stock_remaining: self.deck.remaining(),
        }
    }

    /// Available once a card has been drawn.
    #[must_use]
    pub fn discard_view(&self) -> Option<DiscardView<'_>> {
        let (drawn, _, source) = self.drawn?;
        Some(DiscardView {
            hand: self.hand.cards(),
            drawn,
            source,
            melds: &self.melds,
        })
    }

    /// Draw a card into the hand.
    ///
    /// An empty stock falls back to the discard pile and an empty discard
    /// pile falls back to the stock. `EmptyDeck` is returned only when both
    /// are empty, and the turn stays in `AwaitingDraw`.
    ///
    /// Panics if called outside `AwaitingDraw` (see the step order on [`Turn`]).
    pub fn draw(&mut self, requested: DrawSource) -> Result<Card, EngineError> {
        assert_eq!(
            self.state,
            TurnState::AwaitingDraw,
            "draw called in state {:?}",
            self.state
        );

        let (card, source) = match requested {
            DrawSource::Stock if !self.deck.is_empty() => (self.deck.deal_card()?, DrawSource::Stock),
            DrawSource::Stock => match self.discard_pile.take_top() {
                Some(card) => {
                    warn!("stock is empty, drawing from the discard pile instead");
                    (card, DrawSource::DiscardPile)
                }
                None => {
                    warn!("stock and discard pile are both empty");
                    (self.deck.deal_card()?, DrawSource::Stock)
                }
            },
            DrawSource::DiscardPile => match self.discard_pile.take_top() {
                Some(card) => (card, DrawSource::DiscardPile),
                None => {
                    warn!("discard pile is empty, drawing from the stock instead");
                    (self.deck.deal_card()?, DrawSource::Stock)
                }
            },
        };

        self.hand.push(card);
        self.melds = MeldSet::find(self.hand.cards());
        self.deadwood = self.melds.deadwood(self.hand.cards());
        self.drawn = Some((card, requested, source));
        self.state = TurnState::AwaitingDiscard;

        debug!(%card, ?source, hand = self.hand.len(), "card drawn");
        Ok(card)
    }

    /// Discard the card at 1-based `index`, then settle the knock.
    ///
    /// Gin is declared without consulting `knock`; a deadwood within the
    /// threshold asks `knock`; anything higher cannot knock. An out-of-range
    /// index leaves the hand and state untouched.
    ///
    /// Panics if called outside `AwaitingDiscard` (see the step order on [`Turn`]).
    pub fn discard<K>(&mut self, index: usize, knock: &mut K) -> Result<Card, EngineError>
    where
        K: KnockChoiceProvider + ?Sized,
    {
        assert_eq!(
            self.state,
            TurnState::AwaitingDiscard,
            "discard called in state {:?}",
            self.state
        );

        let card = self.hand.discard(index)?;
        self.discard_pile.push(card);
        self.discarded = Some(card);

        self.melds = MeldSet::find(self.hand.cards());
        self.deadwood = self.melds.deadwood(self.hand.cards());
        debug!(%card, deadwood = self.deadwood, "card discarded");

        self.knocked = match KnockEligibility::for_deadwood(self.deadwood, self.knock_threshold) {
            KnockEligibility::Gin => {
                info!("gin declared");
                true
            }
            KnockEligibility::Optional => {
                let view = KnockView {
                    hand: self.hand.cards(),
                    discarded: card,
                    melds: &self.melds,
                    deadwood: self.deadwood,
                };
                let choice = knock.choose_knock(&view);
                // The discard is already on the pile; a failed answer resolves
                // the turn without a knock.
                self.state = TurnState::Resolved;
                let choice = choice?;
                if choice {
                    info!(deadwood = self.deadwood, "knock declared");
                }
                choice
            }
            KnockEligibility::Ineligible => false,
        };

        self.state = TurnState::Resolved;
        Ok(card)
    }

    /// Consume a resolved turn into its report.
    ///
    /// Panics if the turn has not reached `Resolved`.
    #[must_use]
    pub fn finish(self) -> TurnReport {
        assert_eq!(self.state, TurnState::Resolved, "turn finished before it resolved");

        let (drawn, requested, source) = self.drawn.expect("resolved turn has a draw");
        let discarded = self.discarded.expect("resolved turn has a discard");
        TurnReport {
            drawn,
            requested,
            source,
            discarded,
            gin: self.knocked && self.deadwood == 0,
            melds: self.melds,
            deadwood: self.deadwood,
            knocked: self.knocked,
        }
    }
}

/// Runs turns under a fixed knock threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnEngine {
    knock_threshold: u32,
}

impl Default for TurnEngine {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}

impl TurnEngine {
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        Self {
            knock_threshold: config.knock_threshold,
        }
    }

    #[must_use]
    pub fn knock_threshold(&self) -> u32 {
        self.knock_threshold
    }

    /// Play a whole turn, asking each provider in turn.
    ///
    /// Errors from a provider or from an invalid selection are returned as
    /// is; the engine does not ask again.
    pub fn run_turn<D, P, K>(
        &self,
        deck: &mut Deck,
        hand: &mut Hand,
        discard_pile: &mut DiscardPile,
        draw_choice: &mut D,
        discard_choice: &mut P,
        knock_choice: &mut K,
    ) -> Result<TurnReport, EngineError>
    where
        D: DrawChoiceProvider + ?Sized,
        P: DiscardChoiceProvider + ?Sized,
        K: KnockChoiceProvider + ?Sized,
    {
        let mut seat = Seat::new(draw_choice, discard_choice, knock_choice);
        self.run_turn_with(deck, hand, discard_pile, &mut seat)
    }

    /// `run_turn` with one provider answering every question.
    pub fn run_turn_with<T>(
        &self,
        deck: &mut Deck,
        hand: &mut Hand,
        discard_pile: &mut DiscardPile,
        decider: &mut T,
    ) -> Result<TurnReport, EngineError>
    where
        T: Decisions + ?Sized,
    {
        let mut turn = Turn::new(self, deck, hand, discard_pile);

        let requested = decider.choose_draw(&turn.draw_view())?;
        turn.draw(requested)?;

        let index = {
            let view = turn
                .discard_view()
                .ok_or_else(|| EngineError::DecisionUnavailable("no card was drawn".into()))?;
            decider.choose_discard(&view)?
        };
        turn.discard(index, decider)?;

        Ok(turn.finish())
    }
}
