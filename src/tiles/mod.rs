//! Tiles, the shared tile bank, and per-player stacks.

mod bank;
mod stack;
mod tile;

pub use bank::TileBank;
pub use stack::PlayerStack;
pub use tile::{Tile, MAX_TILE, MIN_TILE, TILE_COUNT};
