//! Core engine types: players, RNG, configuration, actions, errors.

pub mod action;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;

pub use action::{Action, ActionRecord, ACTION_COUNT};
pub use config::{ConfigError, GameConfig, MAX_PLAYERS, MIN_PLAYERS};
pub use error::{RulesError, SelectionFault};
pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
