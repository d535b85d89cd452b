//! A match: rounds played against running scores until someone reaches the
//! target.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::round::{Round, RoundProgress, RoundResult};
use crate::core::{EngineError, GameConfig, GameRng, PlayerId, PlayerMap};
use crate::turn::Decisions;

/// Final comparison of the two scores.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Standing {
    Leader(PlayerId),
    Tied,
}

/// Running scores across rounds.
#[derive(Clone, Debug)]
pub struct Match {
    config: GameConfig,
    scores: PlayerMap<u32>,
    results: Vector<RoundResult>,
}

impl Match {
    /// Start a match with both scores at zero.
    pub fn new(config: GameConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            config,
            scores: PlayerMap::with_value(0),
            results: Vector::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn scores(&self) -> &PlayerMap<u32> {
        &self.scores
    }

    #[must_use]
    pub fn rounds_played(&self) -> usize {
        self.results.len()
    }

    /// Results of finished rounds, oldest first.
    #[must_use]
    pub fn results(&self) -> &Vector<RoundResult> {
        &self.results
    }

    /// Deal the next round under this match's configuration.
    pub fn deal_round(&self, rng: &mut GameRng) -> Result<Round, EngineError> {
        Round::deal(&self.config, rng)
    }

    /// Step `round` by one turn, scoring into this match.
    ///
    /// The round's result is recorded the first time it finishes.
    pub fn play_turn<T>(&mut self, round: &mut Round, decider: &mut T) -> Result<RoundProgress, EngineError>
    where
        T: Decisions + ?Sized,
    {
        let was_over = round.is_over();
        let progress = round.play_turn(decider, &mut self.scores)?;
        if let RoundProgress::Finished(result) = progress {
            if !was_over {
                self.record(result);
            }
        }
        Ok(progress)
    }

    /// Deal and play one full round.
    pub fn play_round(
        &mut self,
        rng: &mut GameRng,
        seats: &mut PlayerMap<&mut dyn Decisions>,
    ) -> Result<RoundResult, EngineError> {
        let mut round = self.deal_round(rng)?;
        let result = round.play(seats, &mut self.scores)?;
        self.record(result);
        Ok(result)
    }

    /// The first player, checked in seat order, at or above the target score.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        PlayerId::all().find(|&player| self.scores[player] >= self.config.target_score)
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.winner().is_some()
    }

    /// Who leads on points, regardless of the target.
    #[must_use]
    pub fn standings(&self) -> Standing {
        let first = self.scores[PlayerId::FIRST];
        let second = self.scores[PlayerId::SECOND];
        match first.cmp(&second) {
            std::cmp::Ordering::Greater => Standing::Leader(PlayerId::FIRST),
            std::cmp::Ordering::Less => Standing::Leader(PlayerId::SECOND),
            std::cmp::Ordering::Equal => Standing::Tied,
        }
    }

    fn record(&mut self, result: RoundResult) {
        self.results.push_back(result);
        info!(
            round = self.results.len(),
            first = self.scores[PlayerId::FIRST],
            second = self.scores[PlayerId::SECOND],
            "scores updated"
        );
    }
}
