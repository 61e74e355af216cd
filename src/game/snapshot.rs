//! Read-only views handed to adapters.
//!
//! A `Snapshot` holds everything an observation encoder needs; an
//! `Outcome` describes what one applied action did. Both serialize with
//! serde so adapters may log or persist them in any format.

use serde::{Deserialize, Serialize};

use crate::core::{Action, PlayerId, PlayerMap, ACTION_COUNT};
use crate::dice::{Die, Face, RollResult, DICE_COUNT};
use crate::rules::{TileSource, TurnPhase, TurnResolution};
use crate::tiles::Tile;

/// Full observable state of a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Face and locked flag per die. All unlocked between turns.
    pub dice: [Die; DICE_COUNT],
    pub phase: TurnPhase,
    pub running_total: u32,
    /// Face-up bank tiles, ascending.
    pub bank: Vec<Tile>,
    /// Face-down bank tiles, ascending. Always empty without the flip rule.
    pub face_down: Vec<Tile>,
    /// Stacks, bottom first.
    pub stacks: PlayerMap<Vec<Tile>>,
    pub current_player: PlayerId,
    /// Starts at 1.
    pub turn_number: u32,
    /// Legality per flat action index (see [`Action::index`]).
    pub action_mask: [bool; ACTION_COUNT],
    pub game_over: bool,
}

impl Snapshot {
    /// Worms per player.
    #[must_use]
    pub fn scores(&self) -> PlayerMap<u32> {
        self.stacks.map(|_, tiles| tiles.iter().map(|t| t.worms()).sum())
    }

    /// Every tile on the table, bank and stacks, in no particular order.
    pub fn all_tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.bank
            .iter()
            .chain(self.face_down.iter())
            .chain(self.stacks.iter().flat_map(|(_, s)| s.iter()))
            .copied()
    }
}

/// What an action did at the dice level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnEvent {
    Rolled { faces: RollResult, busted: bool },
    Locked { face: Face, count: u8, running_total: u32 },
    Stopped { total: u32 },
}

/// Result of one applied action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// Who acted.
    pub player: PlayerId,
    pub action: Action,
    pub event: TurnEvent,
    /// Present when this action ended the turn.
    pub resolution: Option<TurnResolution>,
    /// Worms per player after the action.
    pub scores: PlayerMap<u32>,
    pub game_over: bool,
}

impl Outcome {
    #[must_use]
    pub fn ended_turn(&self) -> bool {
        self.resolution.is_some()
    }

    /// Net worm change for the acting player.
    #[must_use]
    pub fn worm_delta(&self) -> i64 {
        match self.resolution {
            Some(TurnResolution::Claimed { tile, source })
                if source != TileSource::Stack(self.player) =>
            {
                i64::from(tile.worms())
            }
            Some(TurnResolution::Busted {
                returned: Some(tile),
                ..
            }) => -i64::from(tile.worms()),
            _ => 0,
        }
    }
}
