//! Game configuration.
//!
//! `GameConfig` carries the rule constants the engine consults:
//! - pack count and hand size for the deal
//! - knock threshold for the post-discard check
//! - gin and undercut bonuses for scoring
//! - the match target score
//!
//! Presentation layers map their flags onto it and call `validate()` before
//! dealing.

use serde::{Deserialize, Serialize};

use super::error::EngineError;
use crate::cards::PACK_SIZE;

/// Only single-pack games are supported.
pub const MAX_PACKS: usize = 1;

/// Upper bound for the knock threshold and both bonuses.
///
/// Keeps every round score, and any running total of them, far inside `u32`.
pub const MAX_RULE_POINTS: u32 = 10_000;

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Packs shuffled into the stock. Must be 1.
    pub num_packs: usize,

    /// Cards dealt to each player at round start.
    pub hand_size: usize,

    /// Highest deadwood that may knock.
    pub knock_threshold: u32,

    /// Bonus added on top of the opponent's deadwood for gin.
    pub gin_bonus: u32,

    /// Bonus awarded to the defender on an undercut.
    pub undercut_bonus: u32,

    /// Running score that ends the match.
    pub target_score: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            num_packs: 1,
            hand_size: 10,
            knock_threshold: 10,
            gin_bonus: 25,
            undercut_bonus: 25,
            target_score: 100,
        }
    }
}

impl GameConfig {
    /// Create the standard configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pack count (validated later).
    #[must_use]
    pub fn with_num_packs(mut self, packs: usize) -> Self {
        self.num_packs = packs;
        self
    }

    /// Set the number of cards dealt to each player.
    #[must_use]
    pub fn with_hand_size(mut self, size: usize) -> Self {
        self.hand_size = size;
        self
    }

    /// Set the highest deadwood allowed to knock.
    #[must_use]
    pub fn with_knock_threshold(mut self, threshold: u32) -> Self {
        self.knock_threshold = threshold;
        self
    }

    /// Set the gin bonus.
    #[must_use]
    pub fn with_gin_bonus(mut self, bonus: u32) -> Self {
        self.gin_bonus = bonus;
        self
    }

    /// Set the undercut bonus.
    #[must_use]
    pub fn with_undercut_bonus(mut self, bonus: u32) -> Self {
        self.undercut_bonus = bonus;
        self
    }

    /// Set the match target score.
    #[must_use]
    pub fn with_target_score(mut self, target: u32) -> Self {
        self.target_score = target;
        self
    }

    /// Check the configuration can produce a legal round.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.num_packs == 0 || self.num_packs > MAX_PACKS {
            return Err(EngineError::InvalidConfiguration(format!(
                "{} packs requested, exactly {} supported",
                self.num_packs, MAX_PACKS
            )));
        }
        if self.hand_size == 0 {
            return Err(EngineError::InvalidConfiguration(
                "hand size must be at least 1".to_string(),
            ));
        }
        // Two hands plus the card that seeds the discard pile.
        let available = self.num_packs * PACK_SIZE;
        match self.hand_size.checked_mul(2).and_then(|n| n.checked_add(1)) {
            Some(needed) if needed <= available => {}
            needed => {
                return Err(EngineError::InvalidConfiguration(format!(
                    "hand size {} needs {} cards, the stock holds {}",
                    self.hand_size,
                    needed.map_or_else(|| "more".to_string(), |n| n.to_string()),
                    available
                )));
            }
        }
        for (name, value) in [
            ("knock threshold", self.knock_threshold),
            ("gin bonus", self.gin_bonus),
            ("undercut bonus", self.undercut_bonus),
        ] {
            if value > MAX_RULE_POINTS {
                return Err(EngineError::InvalidConfiguration(format!(
                    "{name} {value} exceeds {MAX_RULE_POINTS}"
                )));
            }
        }
        if self.target_score == 0 {
            return Err(EngineError::InvalidConfiguration(
                "target score must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.num_packs, 1);
        assert_eq!(config.hand_size, 10);
        assert_eq!(config.knock_threshold, 10);
        assert_eq!(config.gin_bonus, 25);
        assert_eq!(config.undercut_bonus, 25);
        assert_eq!(config.target_score, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = GameConfig::new()
            .with_hand_size(3)
            .with_knock_threshold(5)
            .with_gin_bonus(20)
            .with_undercut_bonus(10)
            .with_target_score(50);

        assert_eq!(config.hand_size, 3);
        assert_eq!(config.knock_threshold, 5);
        assert_eq!(config.gin_bonus, 20);
        assert_eq!(config.undercut_bonus, 10);
        assert_eq!(config.target_score, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_multiple_packs() {
        let err = GameConfig::new().with_num_packs(2).validate().unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfiguration(_)));

        let err = GameConfig::new().with_num_packs(0).validate().unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_rejects_oversized_hands() {
        // 2 * 25 + 1 = 51 fits, 2 * 26 + 1 = 53 does not
        assert!(GameConfig::new().with_hand_size(25).validate().is_ok());
        assert!(GameConfig::new().with_hand_size(26).validate().is_err());
        assert!(GameConfig::new().with_hand_size(0).validate().is_err());
    }

    #[test]
    fn test_rejects_hand_size_that_overflows() {
        for size in [usize::MAX, usize::MAX / 2 + 1, usize::MAX / 2] {
            let err = GameConfig::new().with_hand_size(size).validate().unwrap_err();
            assert!(matches!(err, EngineError::InvalidConfiguration(_)));
        }
    }

    #[test]
    fn test_rejects_oversized_rule_points() {
        let limit = GameConfig::new()
            .with_knock_threshold(MAX_RULE_POINTS)
            .with_gin_bonus(MAX_RULE_POINTS)
            .with_undercut_bonus(MAX_RULE_POINTS);
        assert!(limit.validate().is_ok());

        for config in [
            GameConfig::new().with_gin_bonus(u32::MAX),
            GameConfig::new().with_undercut_bonus(MAX_RULE_POINTS + 1),
            GameConfig::new().with_knock_threshold(u32::MAX),
        ] {
            let err = config.validate().unwrap_err();
            assert!(matches!(err, EngineError::InvalidConfiguration(_)));
        }
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = GameConfig::new().with_hand_size(7);
        let json = serde_json::to_string(&config).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
