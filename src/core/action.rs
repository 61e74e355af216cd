//! Player actions and action history.
//!
//! A turn is driven by three verbs:
//! - `RollDice`: roll every unlocked die
//! - `LockFace(face)`: set aside all rolled dice showing `face`
//! - `Stop`: end the turn and claim a tile
//!
//! Each action also has a stable discrete index so adapters can expose
//! a flat action space and build legality masks.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::dice::{Face, RollResult};

/// Size of the flat action space: roll, six faces, stop.
pub const ACTION_COUNT: usize = 8;

/// A player's decision within a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    RollDice,
    LockFace(Face),
    Stop,
}

impl Action {
    /// Flat index: 0 = roll, 1..=6 = lock that face, 7 = stop.
    ///
    /// ```
    /// use pickomino_engine::core::Action;
    /// use pickomino_engine::dice::Face;
    ///
    /// assert_eq!(Action::RollDice.index(), 0);
    /// assert_eq!(Action::LockFace(Face::WORM).index(), 6);
    /// assert_eq!(Action::from_index(7), Some(Action::Stop));
    /// ```
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Action::RollDice => 0,
            Action::LockFace(face) => face.value() as usize,
            Action::Stop => 7,
        }
    }

    /// Inverse of [`Action::index`]. Returns `None` outside `0..ACTION_COUNT`.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Action::RollDice),
            1..=6 => Face::new(index as u8).map(Action::LockFace),
            7 => Some(Action::Stop),
            _ => None,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::RollDice => write!(f, "roll"),
            Action::LockFace(face) => write!(f, "lock {face}"),
            Action::Stop => write!(f, "stop"),
        }
    }
}

/// An applied action with its position in the game.
///
/// Rolls also keep the faces that came up, so a history replays exactly
/// even when some rolls were supplied from outside the game's RNG.
/// Used for replay and for training data export.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Turn number when action was taken (starts at 1).
    pub turn: u32,

    /// Sequence number within the turn.
    pub sequence: u32,

    /// Faces rolled, for `RollDice` only.
    #[serde(default)]
    pub faces: Option<RollResult>,

    /// The faces came from a caller-supplied source, not the game's RNG.
    #[serde(default)]
    pub supplied: bool,
}

impl ActionRecord {
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
            faces: None,
            supplied: false,
        }
    }

    /// Attach the faces of a roll.
    #[must_use]
    pub fn with_roll(mut self, faces: RollResult, supplied: bool) -> Self {
        self.faces = Some(faces);
        self.supplied = supplied;
        self
    }
}
