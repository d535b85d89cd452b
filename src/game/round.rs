//! A single round: deal, alternate turns, score the knock.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::cards::Hand;
use crate::core::{EngineError, GameConfig, GameRng, PlayerId, PlayerMap};
use crate::deck::{Deck, DiscardPile};
use crate::melds::MeldSet;
use crate::scoring::{score_round_with, RoundOutcome};
use crate::turn::{Decisions, TurnEngine, TurnReport};

/// How a round ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundResult {
    /// A player knocked (or went gin) and the knock was scored.
    Knocked {
        knocker: PlayerId,
        outcome: RoundOutcome,
    },
    /// The stock ran out first. No points awarded.
    Draw,
}

impl RoundResult {
    /// The player who knocked, if anyone did.
    #[must_use]
    pub fn knocker(&self) -> Option<PlayerId> {
        match self {
            RoundResult::Knocked { knocker, .. } => Some(*knocker),
            RoundResult::Draw => None,
        }
    }
}

/// What happened after one step of a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundProgress {
    Continue { next: PlayerId },
    Finished(RoundResult),
}

/// One resolved turn in the round history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub player: PlayerId,
    pub report: TurnReport,
}

/// Round state: the stock, both hands, and the discard pile.
///
/// `PlayerId::FIRST` takes the first turn. Before every turn an empty stock
/// ends the round as a draw.
#[derive(Clone, Debug)]
pub struct Round {
    config: GameConfig,
    engine: TurnEngine,
    deck: Deck,
    hands: PlayerMap<Hand>,
    discard_pile: DiscardPile,
    current: PlayerId,
    history: Vector<TurnRecord>,
    result: Option<RoundResult>,
}

impl Round {
    /// Shuffle a fresh deck, deal both hands, and turn up the first discard.
    pub fn deal(config: &GameConfig, rng: &mut GameRng) -> Result<Self, EngineError> {
        config.validate()?;

        let mut deck = Deck::new(config.num_packs, rng)?;
        let first = deck.deal_hand(config.hand_size)?;
        let second = deck.deal_hand(config.hand_size)?;

        let mut discard_pile = DiscardPile::new();
        discard_pile.push(deck.deal_card()?);

        debug!(
            hand_size = config.hand_size,
            stock = deck.remaining(),
            "round dealt"
        );

        Ok(Self::from_parts(
            config.clone(),
            deck,
            PlayerMap::from_pair(Hand::from_cards(first), Hand::from_cards(second)),
            discard_pile,
        ))
    }

    /// Build a round from prepared piles, e.g. a stacked deck in tests.
    #[must_use]
    pub fn from_parts(
        config: GameConfig,
        deck: Deck,
        hands: PlayerMap<Hand>,
        discard_pile: DiscardPile,
    ) -> Self {
        Self {
            engine: TurnEngine::new(&config),
            config,
            deck,
            hands,
            discard_pile,
            current: PlayerId::FIRST,
            history: Vector::new(),
            result: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &Hand {
        &self.hands[player]
    }

    #[must_use]
    pub fn hands(&self) -> &PlayerMap<Hand> {
        &self.hands
    }

    #[must_use]
    pub fn discard_pile(&self) -> &DiscardPile {
        &self.discard_pile
    }

    /// The player whose turn is next.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    /// Resolved turns, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<TurnRecord> {
        &self.history
    }

    #[must_use]
    pub fn result(&self) -> Option<RoundResult> {
        self.result
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    /// Play the current player's turn with `decider`.
    ///
    /// A knock is scored into `scores` and finishes the round. A failed turn
    /// is rolled back so it can be replayed; `EmptyDeck` instead ends the
    /// round as a draw. Once finished, further calls return the same result.
    pub fn play_turn<T>(
        &mut self,
        decider: &mut T,
        scores: &mut PlayerMap<u32>,
    ) -> Result<RoundProgress, EngineError>
    where
        T: Decisions + ?Sized,
    {
        if let Some(result) = self.result {
            return Ok(RoundProgress::Finished(result));
        }
        if self.deck.is_empty() {
            warn!("stock exhausted, round ends in a draw");
            return Ok(self.finish(RoundResult::Draw));
        }

        let player = self.current;
        let deck = self.deck.clone();
        let hand = self.hands[player].clone();
        let discard_pile = self.discard_pile.clone();

        let report = match self.engine.run_turn_with(
            &mut self.deck,
            &mut self.hands[player],
            &mut self.discard_pile,
            decider,
        ) {
            Ok(report) => report,
            Err(err) if err.ends_round_as_draw() => {
                warn!(%player, "no card left to draw, round ends in a draw");
                return Ok(self.finish(RoundResult::Draw));
            }
            Err(err) => {
                self.deck = deck;
                self.hands[player] = hand;
                self.discard_pile = discard_pile;
                return Err(err);
            }
        };

        let knocked = report.knocked;
        let knocker_melds = report.melds.clone();
        self.history.push_back(TurnRecord { player, report });

        if knocked {
            let opponent = player.opponent();
            let opponent_melds = MeldSet::find(self.hands[opponent].cards());
            let (knocker_score, opponent_score) = scores.pair_mut(player);
            let outcome = score_round_with(
                &self.config,
                self.hands[player].cards(),
                &knocker_melds,
                self.hands[opponent].cards(),
                &opponent_melds,
                knocker_score,
                opponent_score,
            );
            return Ok(self.finish(RoundResult::Knocked {
                knocker: player,
                outcome,
            }));
        }

        self.current = player.opponent();
        Ok(RoundProgress::Continue { next: self.current })
    }

    /// Play turns until the round finishes.
    ///
    /// ```
    /// use gin_rummy::cards::{parse_cards, Hand};
    /// use gin_rummy::core::{GameConfig, PlayerId, PlayerMap};
    /// use gin_rummy::deck::{Deck, DiscardPile};
    /// use gin_rummy::game::Round;
    /// use gin_rummy::turn::{Decisions, DrawSource, ScriptedProvider};
    ///
    /// let hands = PlayerMap::from_pair(
    ///     Hand::from_cards(parse_cards("2S 3S 4S").unwrap()),
    ///     Hand::from_cards(parse_cards("KD QC 9H").unwrap()),
    /// );
    /// let mut pile = DiscardPile::new();
    /// pile.push("7C".parse().unwrap());
    /// let deck = Deck::from_cards(parse_cards("5S").unwrap());
    /// let mut round = Round::from_parts(GameConfig::default().with_hand_size(3), deck, hands, pile);
    ///
    /// let mut first = ScriptedProvider::new().draws([DrawSource::Stock]).discards([1]).knocks([true]);
    /// let mut second = ScriptedProvider::new();
    /// let mut seats: PlayerMap<&mut dyn Decisions> =
    ///     PlayerMap::from_pair(&mut first as &mut dyn Decisions, &mut second as &mut dyn Decisions);
    /// let mut scores = PlayerMap::with_value(0);
    ///
    /// let result = round.play(&mut seats, &mut scores).unwrap();
    /// assert_eq!(result.knocker(), Some(PlayerId::FIRST));
    /// assert_eq!(scores[PlayerId::FIRST], 29 + 25);
    /// ```
    pub fn play(
        &mut self,
        seats: &mut PlayerMap<&mut dyn Decisions>,
        scores: &mut PlayerMap<u32>,
    ) -> Result<RoundResult, EngineError> {
        loop {
            let player = self.current;
            if let RoundProgress::Finished(result) = self.play_turn(&mut *seats[player], scores)? {
                return Ok(result);
            }
        }
    }

    fn finish(&mut self, result: RoundResult) -> RoundProgress {
        match result {
            RoundResult::Knocked { knocker, outcome } => {
                info!(%knocker, kind = %outcome.kind, points = outcome.points, "round over");
            }
            RoundResult::Draw => info!(turns = self.history.len(), "round drawn"),
        }
        self.result = Some(result);
        RoundProgress::Finished(result)
    }
}
