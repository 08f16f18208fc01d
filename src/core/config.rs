//! Game configuration.
//!
//! Board geometry (loop length, home lane, finish line) is fixed by the
//! rules and lives in `board::track`. `GameConfig` covers the table
//! conventions that vary between groups of players.

use serde::{Deserialize, Serialize};

use super::color::COLOR_COUNT;
use super::error::{RuleError, RuleResult};

/// Standard cards before jokers are added.
pub const STANDARD_CARDS: usize = 52;

/// Most jokers a deck can carry while every card keeps a distinct `CardId`.
pub const MAX_JOKERS: usize = u8::MAX as usize + 1 - STANDARD_CARDS;

/// What happens to a card that has no legal target when selected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnplayablePolicy {
    /// Card goes to the discard pile and a replacement is drawn.
    #[default]
    Discard,
    /// Card stays in the hand.
    ReturnToHand,
}

/// Table conventions for one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Seed for deck shuffles. Same seed and selections replay identically.
    pub seed: u64,

    /// Cards each player holds between turns (default: 5).
    pub hand_size: usize,

    /// Jokers added to the 52 standard cards (default: 2).
    pub jokers: usize,

    /// Handling of a selected card with no legal target.
    pub unplayable_policy: UnplayablePolicy,

    /// A cancelled selection forfeits the player's seat.
    pub forfeit_on_cancel: bool,

    /// Stop dispatching turns after this many (0 = unlimited).
    pub max_turns: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            hand_size: 5,
            jokers: 2,
            unplayable_policy: UnplayablePolicy::Discard,
            forfeit_on_cancel: false,
            max_turns: 0,
        }
    }
}

impl GameConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    pub fn with_jokers(mut self, jokers: usize) -> Self {
        self.jokers = jokers;
        self
    }

    pub fn with_unplayable_policy(mut self, policy: UnplayablePolicy) -> Self {
        self.unplayable_policy = policy;
        self
    }

    pub fn with_forfeit_on_cancel(mut self, forfeit: bool) -> Self {
        self.forfeit_on_cancel = forfeit;
        self
    }

    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Total cards in circulation.
    #[must_use]
    pub fn deck_size(&self) -> usize {
        STANDARD_CARDS + self.jokers
    }

    /// Reject tables the deck cannot serve.
    pub fn validate(&self) -> RuleResult<()> {
        if self.jokers > MAX_JOKERS {
            return Err(RuleError::Config(format!(
                "at most {} jokers, got {}",
                MAX_JOKERS, self.jokers
            )));
        }
        if self.hand_size == 0 || self.hand_size * COLOR_COUNT > self.deck_size() {
            return Err(RuleError::Config(format!(
                "cannot deal {} cards to {} seats from {}",
                self.hand_size,
                COLOR_COUNT,
                self.deck_size()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.hand_size, 5);
        assert_eq!(config.jokers, 2);
        assert_eq!(config.deck_size(), 54);
        assert_eq!(config.unplayable_policy, UnplayablePolicy::Discard);
        assert!(!config.forfeit_on_cancel);
    }

    #[test]
    fn test_builder_pattern() {
        let config = GameConfig::default()
            .with_seed(123)
            .with_hand_size(4)
            .with_unplayable_policy(UnplayablePolicy::ReturnToHand)
            .with_forfeit_on_cancel(true)
            .with_max_turns(500);

        assert_eq!(config.seed, 123);
        assert_eq!(config.hand_size, 4);
        assert_eq!(config.unplayable_policy, UnplayablePolicy::ReturnToHand);
        assert!(config.forfeit_on_cancel);
        assert_eq!(config.max_turns, 500);
    }

    #[test]
    fn test_validate() {
        assert!(GameConfig::default().validate().is_ok());
        assert!(GameConfig::default().with_jokers(MAX_JOKERS).validate().is_ok());
        assert!(matches!(
            GameConfig::default().with_jokers(MAX_JOKERS + 1).validate(),
            Err(RuleError::Config(_))
        ));
        assert!(GameConfig::default().with_hand_size(0).validate().is_err());
        assert!(GameConfig::default().with_hand_size(13).validate().is_ok());
        assert!(GameConfig::default().with_jokers(0).with_hand_size(14).validate().is_err());
    }

    #[test]
    fn test_serialization() {
        let config = GameConfig::default().with_seed(9);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
