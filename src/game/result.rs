//! Final standings.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, PlayerMap};
use crate::tiles::PlayerStack;

/// One player's place in the final ranking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub player: PlayerId,
    /// Worms on the player's tiles.
    pub score: u32,
    /// Tiles held.
    pub tiles: usize,
    /// 1 for the winner.
    pub rank: usize,
}

/// Result of a completed game.
///
/// Ranked by worms (most first), then tiles held (fewest first), then seat
/// order, so every player gets a distinct rank.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub standings: Vec<Standing>,
}

impl GameResult {
    /// Rank players by their stacks.
    #[must_use]
    pub fn from_stacks(stacks: &PlayerMap<PlayerStack>) -> Self {
        let mut standings: Vec<Standing> = stacks
            .iter()
            .map(|(player, stack)| Standing {
                player,
                score: stack.score(),
                tiles: stack.len(),
                rank: 0,
            })
            .collect();

        standings.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then(a.tiles.cmp(&b.tiles))
                .then(a.player.cmp(&b.player))
        });
        for (i, standing) in standings.iter_mut().enumerate() {
            standing.rank = i + 1;
        }

        Self { standings }
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.standings.first().map(|s| s.player)
    }

    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        self.winner() == Some(player)
    }

    #[must_use]
    pub fn standing(&self, player: PlayerId) -> Option<&Standing> {
        self.standings.iter().find(|s| s.player == player)
    }
}
