//! A player's pile of claimed tiles.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::tile::Tile;

/// Claimed tiles, bottom first. Only the top tile can be stolen or lost.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStack {
    tiles: Vector<Tile>,
}

impl PlayerStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tile: Tile) {
        self.tiles.push_back(tile);
    }

    pub fn pop(&mut self) -> Option<Tile> {
        self.tiles.pop_back()
    }

    #[must_use]
    pub fn top(&self) -> Option<Tile> {
        self.tiles.back().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Total worms on all tiles in the stack.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.tiles.iter().map(|t| t.worms()).sum()
    }

    /// Tiles from bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = Tile> + '_ {
        self.tiles.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(v: u8) -> Tile {
        Tile::new(v).unwrap()
    }

    #[test]
    fn test_stack_discipline() {
        let mut stack = PlayerStack::new();
        assert_eq!(stack.top(), None);
        assert_eq!(stack.pop(), None);

        stack.push(tile(22));
        stack.push(tile(35));
        assert_eq!(stack.top(), Some(tile(35)));
        assert_eq!(stack.len(), 2);

        assert_eq!(stack.pop(), Some(tile(35)));
        assert_eq!(stack.top(), Some(tile(22)));
    }

    #[test]
    fn test_score() {
        let mut stack = PlayerStack::new();
        assert_eq!(stack.score(), 0);
        for v in [21, 26, 31, 36] {
            stack.push(tile(v));
        }
        assert_eq!(stack.score(), 1 + 2 + 3 + 4);
        let order: Vec<u8> = stack.iter().map(Tile::value).collect();
        assert_eq!(order, vec![21, 26, 31, 36]);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut a = PlayerStack::new();
        a.push(tile(24));
        let mut b = a.clone();
        b.push(tile(25));

        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 2);
    }
}
