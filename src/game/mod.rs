//! Game coordinator: turn order, tile bookkeeping, snapshots and results.
//!
//! ## Driving a game
//!
//! ```
//! use pickomino_engine::core::GameConfig;
//! use pickomino_engine::game::Game;
//! use pickomino_engine::playout::UniformPolicy;
//!
//! let mut game = Game::new(GameConfig::new().with_seed(3)).unwrap();
//! let mut policy = UniformPolicy::new(3);
//!
//! let outcome = game.advance_turn(&mut policy).unwrap();
//! assert!(outcome.ended_turn());
//! assert_eq!(game.current_player().index(), 1);
//! ```

mod game;
mod result;
mod snapshot;

pub use game::Game;
pub use result::{GameResult, Standing};
pub use snapshot::{Outcome, Snapshot, TurnEvent};
