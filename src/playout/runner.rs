//! Whole-game playouts.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::policy::TurnPolicy;
use crate::core::RulesError;
use crate::game::{Game, GameResult};
use crate::rules::TurnResolution;

/// Limits for a playout.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayoutConfig {
    /// Turns to play before giving up on an unfinished game.
    /// Busts return tiles to the bank, so without the flip rule a game has
    /// no fixed length and may never end.
    pub max_turns: u32,
}

impl Default for PlayoutConfig {
    fn default() -> Self {
        Self { max_turns: 2_000 }
    }
}

impl PlayoutConfig {
    #[must_use]
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }
}

/// Summary of a playout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Playout {
    /// `None` if the turn limit was hit first.
    pub result: Option<GameResult>,
    pub turns: u32,
    pub actions: usize,
    pub steals: u32,
    pub busts: u32,
}

/// Play turns with `policy` until the game ends or the limit is reached.
pub fn play_game(
    game: &mut Game,
    policy: &mut impl TurnPolicy,
    config: &PlayoutConfig,
) -> Result<Playout, RulesError> {
    let start_actions = game.history().len();
    let mut turns = 0;
    let mut steals = 0;
    let mut busts = 0;

    while !game.is_over() && turns < config.max_turns {
        let outcome = game.advance_turn(policy)?;
        turns += 1;

        match outcome.resolution {
            Some(resolution) if resolution.is_steal(outcome.player) => steals += 1,
            Some(TurnResolution::Busted { .. }) => busts += 1,
            _ => {}
        }
    }

    let playout = Playout {
        result: game.is_terminal(),
        turns,
        actions: game.history().len() - start_actions,
        steals,
        busts,
    };
    debug!(
        turns = playout.turns,
        actions = playout.actions,
        finished = playout.result.is_some(),
        "playout complete"
    );
    Ok(playout)
}
