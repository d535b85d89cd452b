//! Knock resolution: gin, undercut, or a normal knock.
//!
//! Rules, checked in this order:
//! 1. Knocker has zero deadwood: **gin**, knocker scores the opponent's
//!    deadwood plus the gin bonus.
//! 2. Opponent has strictly less deadwood: **undercut**, opponent scores the
//!    difference plus the undercut bonus.
//! 3. Otherwise a **knock**: knocker scores the difference (possibly 0).

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

use crate::cards::Card;
use crate::core::GameConfig;
use crate::melds::MeldSet;

/// How a knock was resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutcomeKind {
    Gin,
    Undercut,
    Knock,
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutcomeKind::Gin => "gin",
            OutcomeKind::Undercut => "undercut",
            OutcomeKind::Knock => "knock",
        };
        f.write_str(name)
    }
}

/// Which side of the knock received the points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scorer {
    Knocker,
    Opponent,
}

/// Result of scoring one knock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub kind: OutcomeKind,
    pub knocker_deadwood: u32,
    pub opponent_deadwood: u32,
    /// Points added to the scorer's running total.
    pub points: u32,
}

impl RoundOutcome {
    /// Who received `points`.
    #[must_use]
    pub fn scorer(&self) -> Scorer {
        match self.kind {
            OutcomeKind::Gin | OutcomeKind::Knock => Scorer::Knocker,
            OutcomeKind::Undercut => Scorer::Opponent,
        }
    }
}

/// Resolve a knock from both deadwood totals.
///
/// Points saturate at `u32::MAX` for configurations that skipped `validate()`.
///
/// ```
/// use gin_rummy::core::GameConfig;
/// use gin_rummy::scoring::{resolve, OutcomeKind};
///
/// let outcome = resolve(0, 18, &GameConfig::default());
/// assert_eq!(outcome.kind, OutcomeKind::Gin);
/// assert_eq!(outcome.points, 43);
/// ```
#[must_use]
pub fn resolve(knocker_deadwood: u32, opponent_deadwood: u32, config: &GameConfig) -> RoundOutcome {
    let (kind, points) = if knocker_deadwood == 0 {
        (OutcomeKind::Gin, opponent_deadwood.saturating_add(config.gin_bonus))
    } else if opponent_deadwood < knocker_deadwood {
        (
            OutcomeKind::Undercut,
            (knocker_deadwood - opponent_deadwood).saturating_add(config.undercut_bonus),
        )
    } else {
        (OutcomeKind::Knock, opponent_deadwood - knocker_deadwood)
    };

    RoundOutcome {
        kind,
        knocker_deadwood,
        opponent_deadwood,
        points,
    }
}

/// Score a knock with the standard 25-point bonuses.
///
/// Deadwood is computed from each hand against its melds, then the scorer's
/// running total is increased.
pub fn score_round(
    knocker_hand: &[Card],
    knocker_melds: &MeldSet,
    opponent_hand: &[Card],
    opponent_melds: &MeldSet,
    knocker_score: &mut u32,
    opponent_score: &mut u32,
) -> RoundOutcome {
    score_round_with(
        &GameConfig::default(),
        knocker_hand,
        knocker_melds,
        opponent_hand,
        opponent_melds,
        knocker_score,
        opponent_score,
    )
}

/// `score_round` with bonuses taken from `config`.
#[allow(clippy::too_many_arguments)]
pub fn score_round_with(
    config: &GameConfig,
    knocker_hand: &[Card],
    knocker_melds: &MeldSet,
    opponent_hand: &[Card],
    opponent_melds: &MeldSet,
    knocker_score: &mut u32,
    opponent_score: &mut u32,
) -> RoundOutcome {
    let outcome = resolve(
        knocker_melds.deadwood(knocker_hand),
        opponent_melds.deadwood(opponent_hand),
        config,
    );

    match outcome.scorer() {
        Scorer::Knocker => *knocker_score = knocker_score.saturating_add(outcome.points),
        Scorer::Opponent => *opponent_score = opponent_score.saturating_add(outcome.points),
    }

    info!(
        kind = %outcome.kind,
        knocker_deadwood = outcome.knocker_deadwood,
        opponent_deadwood = outcome.opponent_deadwood,
        points = outcome.points,
        "knock scored"
    );
    outcome
}
