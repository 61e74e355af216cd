//! Tiles (a.k.a. Pickominos).

use serde::{Deserialize, Serialize};

/// Lowest tile value, and the smallest total a turn may stop on.
pub const MIN_TILE: u8 = 21;
/// Highest tile value.
pub const MAX_TILE: u8 = 36;
/// Number of tiles in a game.
pub const TILE_COUNT: usize = (MAX_TILE - MIN_TILE + 1) as usize;

/// A tile valued 21..=36, worth 1-4 worms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Tile(u8);

impl Tile {
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value >= MIN_TILE && value <= MAX_TILE {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Tile whose value equals a running total, if one exists.
    #[must_use]
    pub fn for_total(total: u32) -> Option<Self> {
        u8::try_from(total).ok().and_then(Self::new)
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Worms printed on the tile: 21-24 → 1, 25-28 → 2, 29-32 → 3, 33-36 → 4.
    #[must_use]
    pub const fn worms(self) -> u32 {
        ((self.0 - MIN_TILE) / 4 + 1) as u32
    }

    /// Every tile in ascending order.
    pub fn all() -> impl Iterator<Item = Tile> {
        (MIN_TILE..=MAX_TILE).map(Tile)
    }
}

impl TryFrom<u8> for Tile {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Tile::new(value).ok_or_else(|| format!("tile value must be 21-36, got {value}"))
    }
}

impl From<Tile> for u8 {
    fn from(tile: Tile) -> u8 {
        tile.0
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
