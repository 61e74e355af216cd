//! Decision policies for driving turns.
//!
//! `Game::advance_turn` asks a `TurnPolicy` for every action of a turn.
//! The engine ships only a uniform random policy for tests and simulation
//! harnesses; any `FnMut(&Game, &[Action]) -> Action` closure also works.

use crate::core::{Action, GameRng};
use crate::game::Game;

/// Chooses the next action for the current player.
pub trait TurnPolicy {
    /// Pick one of `legal`, which is never empty.
    ///
    /// Returning an action outside `legal` makes `advance_turn` fail.
    fn choose(&mut self, game: &Game, legal: &[Action]) -> Action;
}

impl<F> TurnPolicy for F
where
    F: FnMut(&Game, &[Action]) -> Action,
{
    fn choose(&mut self, game: &Game, legal: &[Action]) -> Action {
        self(game, legal)
    }
}

/// Picks uniformly among legal actions.
#[derive(Clone, Debug)]
pub struct UniformPolicy {
    rng: GameRng,
}

impl UniformPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }

    /// Use an existing stream, e.g. a fork of the game's RNG.
    pub fn from_rng(rng: GameRng) -> Self {
        Self { rng }
    }
}

impl TurnPolicy for UniformPolicy {
    fn choose(&mut self, _game: &Game, legal: &[Action]) -> Action {
        // `advance_turn` never offers an empty list. If a caller does, the
        // game rejects the roll with `GameOver`.
        self.rng.choose(legal).copied().unwrap_or(Action::RollDice)
    }
}
