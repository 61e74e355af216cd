//! Turn policies and whole-game playouts.

mod policy;
mod runner;

pub use policy::{TurnPolicy, UniformPolicy};
pub use runner::{play_game, Playout, PlayoutConfig};
