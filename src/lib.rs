//! # pickomino-engine
//!
//! A deterministic rules engine for the dice-and-tiles game Pickomino
//! (Heckmeck), built to sit under reinforcement-learning and simulation
//! harnesses.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: every roll comes from a seeded `GameRng` (or any
//!    other `FaceSource`), so the same seed and the same actions always
//!    produce the same game.
//!
//! 2. **Transactional**: an action is validated before anything changes.
//!    A rejected action leaves the game exactly as it was, RNG included.
//!
//! 3. **Cheap snapshots**: the bank, stacks and history are persistent
//!    `im` structures, so cloning a `Game` is O(1) and `Game::step` can be
//!    pure.
//!
//! ## Modules
//!
//! - `core`: players, RNG, configuration, actions, errors
//! - `dice`: faces, the eight-die set, rolling and locking
//! - `tiles`: tiles, the bank and player stacks
//! - `rules`: the turn state machine and end-of-turn claims
//! - `game`: turn order, snapshots, outcomes and final results
//! - `playout`: turn policies and whole-game playouts

pub mod core;
pub mod dice;
pub mod game;
pub mod playout;
pub mod rules;
pub mod tiles;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, ConfigError, GameConfig, GameRng, GameRngState, PlayerId, PlayerMap,
    RulesError, SelectionFault, ACTION_COUNT,
};

pub use crate::dice::{Dice, Die, Face, FaceSource, ScriptedFaces, DICE_COUNT};

pub use crate::tiles::{PlayerStack, Tile, TileBank};

pub use crate::rules::{TileSource, TurnPhase, TurnResolution, TurnState};

pub use crate::game::{Game, GameResult, Outcome, Snapshot, Standing, TurnEvent};

pub use crate::playout::{play_game, Playout, PlayoutConfig, TurnPolicy, UniformPolicy};
