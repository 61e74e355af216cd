//! The shared row of tiles in the middle of the table.

use im::OrdSet;
use serde::{Deserialize, Serialize};

use super::tile::Tile;

/// Tiles in the middle of the table, kept in ascending order.
///
/// Face-up tiles are available to claim. Face-down tiles (only produced by
/// the flip-on-bust rule) stay in the bank but are out of play for good.
/// Every query below except `face_down`/`all_tiles` sees face-up tiles only.
///
/// Backed by persistent ordered sets so game snapshots clone in O(1).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileBank {
    tiles: OrdSet<Tile>,
    face_down: OrdSet<Tile>,
}

impl Default for TileBank {
    fn default() -> Self {
        Self::full()
    }
}

impl TileBank {
    /// All sixteen tiles.
    #[must_use]
    pub fn full() -> Self {
        Self {
            tiles: Tile::all().collect(),
            face_down: OrdSet::new(),
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self {
            tiles: OrdSet::new(),
            face_down: OrdSet::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[must_use]
    pub fn contains(&self, tile: Tile) -> bool {
        self.tiles.contains(&tile)
    }

    /// Highest tile in the bank.
    #[must_use]
    pub fn highest(&self) -> Option<Tile> {
        self.tiles.get_max().copied()
    }

    /// Highest available tile with value at most `total`.
    ///
    /// ```
    /// use pickomino_engine::tiles::{Tile, TileBank};
    ///
    /// let mut bank = TileBank::full();
    /// bank.take(Tile::new(29).unwrap());
    /// assert_eq!(bank.best_reachable(29), Tile::new(28));
    /// assert_eq!(bank.best_reachable(20), None);
    /// ```
    #[must_use]
    pub fn best_reachable(&self, total: u32) -> Option<Tile> {
        self.tiles
            .iter()
            .rev()
            .find(|t| u32::from(t.value()) <= total)
            .copied()
    }

    /// Remove a tile. Returns false if it was not in the bank.
    pub fn take(&mut self, tile: Tile) -> bool {
        self.tiles.remove(&tile).is_some()
    }

    /// Return a tile to the bank. Returns false if it was already there.
    pub fn put_back(&mut self, tile: Tile) -> bool {
        self.tiles.insert(tile).is_none()
    }

    /// Turn the highest face-up tile face down, unless it is `spared`.
    ///
    /// Returns the flipped tile.
    pub fn flip_highest(&mut self, spared: Option<Tile>) -> Option<Tile> {
        let highest = self.highest()?;
        if Some(highest) == spared {
            return None;
        }
        self.tiles.remove(&highest);
        self.face_down.insert(highest);
        Some(highest)
    }

    /// Face-up tiles in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = Tile> + '_ {
        self.tiles.iter().copied()
    }

    /// Face-down tiles in ascending order.
    pub fn face_down(&self) -> impl Iterator<Item = Tile> + '_ {
        self.face_down.iter().copied()
    }

    /// Every tile held by the bank, face-up or not.
    pub fn all_tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.iter().chain(self.face_down())
    }
}
