//! Game configuration.
//!
//! `GameConfig` fixes everything about a game that is decided before the
//! first roll: table size, RNG seed, and optional house rules. It can be
//! built in code with the `with_*` methods or loaded from TOML:
//!
//! ```
//! use pickomino_engine::core::GameConfig;
//!
//! let config = GameConfig::from_toml_str("player_count = 3\nseed = 99").unwrap();
//! assert_eq!(config.player_count, 3);
//! assert!(!config.require_worm);
//! ```

use serde::{Deserialize, Serialize};

/// Smallest supported table.
pub const MIN_PLAYERS: usize = 2;
/// Largest supported table.
pub const MAX_PLAYERS: usize = 7;

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("player count must be 2-7, got {0}")]
    PlayerCount(usize),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Static game parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of seats (2-7).
    pub player_count: usize,

    /// Seed for the dice RNG.
    /// Same seed and same actions produce the same game.
    pub seed: u64,

    /// Physical-game rule: stopping requires at least one worm locked.
    /// A forced stop without a worm busts instead.
    pub require_worm: bool,

    /// Physical-game rule: a bust also turns the highest face-up bank tile
    /// face down (unless it is the tile just returned). Face-down tiles
    /// can no longer be claimed, which guarantees the bank runs dry.
    pub flip_on_bust: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_count: 4,
            seed: 0,
            require_worm: false,
            flip_on_bust: false,
        }
    }
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of seats.
    #[must_use]
    pub fn with_player_count(mut self, count: usize) -> Self {
        self.player_count = count;
        self
    }

    /// Set the dice seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Enable or disable the worm-required rule.
    #[must_use]
    pub fn with_worm_rule(mut self, required: bool) -> Self {
        self.require_worm = required;
        self
    }

    /// Enable or disable turning a bank tile face down on every bust.
    #[must_use]
    pub fn with_flip_on_bust(mut self, flip: bool) -> Self {
        self.flip_on_bust = flip;
        self
    }

    /// Check the configuration before a game is built from it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.player_count) {
            return Err(ConfigError::PlayerCount(self.player_count));
        }
        Ok(())
    }

    /// Parse and validate a TOML document. Missing keys take defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert_eq!(config.player_count, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = GameConfig::new()
            .with_player_count(2)
            .with_seed(1234)
            .with_worm_rule(true)
            .with_flip_on_bust(true);

        assert_eq!(config.player_count, 2);
        assert_eq!(config.seed, 1234);
        assert!(config.require_worm);
        assert!(config.flip_on_bust);
    }

    #[test]
    fn test_player_count_bounds() {
        for count in [0, 1, 8, 20] {
            let err = GameConfig::new().with_player_count(count).validate();
            assert!(matches!(err, Err(ConfigError::PlayerCount(c)) if c == count));
        }
        for count in MIN_PLAYERS..=MAX_PLAYERS {
            assert!(GameConfig::new().with_player_count(count).validate().is_ok());
        }
    }

    #[test]
    fn test_toml_partial_uses_defaults() {
        let config = GameConfig::from_toml_str("require_worm = true").unwrap();
        assert_eq!(config.player_count, 4);
        assert_eq!(config.seed, 0);
        assert!(config.require_worm);
        assert!(!config.flip_on_bust);
    }

    #[test]
    fn test_toml_rejects_bad_input() {
        assert!(matches!(
            GameConfig::from_toml_str("player_count = 9"),
            Err(ConfigError::PlayerCount(9))
        ));
        assert!(matches!(
            GameConfig::from_toml_str("player_count = \"four\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_config_serde() {
        let config = GameConfig::new().with_seed(7);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
