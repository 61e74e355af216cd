//! Tile claims at the end of a turn.
//!
//! ## Stopped with total T
//!
//! 1. A tile worth exactly T, in the bank or on top of any stack (the
//!    player's own included), is claimed. Taking it from another stack is a
//!    steal; finding it on one's own stack leaves it where it is.
//! 2. Otherwise the highest bank tile worth less than T is claimed.
//! 3. Otherwise nothing changes hands.
//!
//! ## Busted
//!
//! The top tile of the player's own stack, if any, goes back to the bank.
//! With the flip rule on, the highest face-up bank tile is then turned face
//! down, unless that is the tile that was just returned.
//!
//! At most one tile changes hands per turn, and tiles are only ever
//! relocated: a face-down tile still sits in the bank.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, PlayerMap};
use crate::tiles::{PlayerStack, Tile, TileBank};

/// Where a claimed tile came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileSource {
    Bank,
    /// Top of this player's stack. Equal to the claimant for a self-claim.
    Stack(PlayerId),
}

/// A tile a stopped turn is entitled to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub tile: Tile,
    pub source: TileSource,
}

/// How a finished turn changed the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnResolution {
    Claimed { tile: Tile, source: TileSource },
    /// Stopped, but no tile was reachable.
    NoClaim { total: u32 },
    /// Busted; `returned` is the penalty tile sent back to the bank,
    /// `flipped` the bank tile turned face down under the flip rule.
    Busted {
        returned: Option<Tile>,
        flipped: Option<Tile>,
    },
}

impl TurnResolution {
    /// Tile that changed hands, if any.
    #[must_use]
    pub fn moved_tile(&self) -> Option<Tile> {
        match *self {
            TurnResolution::Claimed { tile, .. } => Some(tile),
            TurnResolution::Busted { returned, .. } => returned,
            TurnResolution::NoClaim { .. } => None,
        }
    }

    /// Whether the claim took a tile from another player.
    #[must_use]
    pub fn is_steal(&self, claimant: PlayerId) -> bool {
        matches!(
            self,
            TurnResolution::Claimed { source: TileSource::Stack(owner), .. } if *owner != claimant
        )
    }
}

/// Decide which tile, if any, a stop on `total` earns.
#[must_use]
pub fn find_claim(total: u32, bank: &TileBank, stacks: &PlayerMap<PlayerStack>) -> Option<Claim> {
    if let Some(exact) = Tile::for_total(total) {
        if bank.contains(exact) {
            return Some(Claim {
                tile: exact,
                source: TileSource::Bank,
            });
        }
        if let Some((owner, _)) = stacks.iter().find(|(_, s)| s.top() == Some(exact)) {
            return Some(Claim {
                tile: exact,
                source: TileSource::Stack(owner),
            });
        }
    }

    bank.best_reachable(total).map(|tile| Claim {
        tile,
        source: TileSource::Bank,
    })
}

/// Move a claimed tile onto `claimant`'s stack.
pub fn apply_claim(
    claim: Claim,
    claimant: PlayerId,
    bank: &mut TileBank,
    stacks: &mut PlayerMap<PlayerStack>,
) {
    match claim.source {
        TileSource::Bank => {
            if bank.take(claim.tile) {
                stacks[claimant].push(claim.tile);
            }
        }
        TileSource::Stack(owner) if owner == claimant => {}
        TileSource::Stack(owner) => {
            if stacks[owner].top() == Some(claim.tile) {
                stacks[owner].pop();
                stacks[claimant].push(claim.tile);
            }
        }
    }
}

/// Return the top of the busting player's stack to the bank.
pub fn apply_bust_penalty(
    player: PlayerId,
    bank: &mut TileBank,
    stacks: &mut PlayerMap<PlayerStack>,
) -> Option<Tile> {
    let tile = stacks[player].pop()?;
    bank.put_back(tile);
    Some(tile)
}

/// Settle a stopped turn's claim and apply it.
pub fn resolve_stop(
    total: u32,
    claimant: PlayerId,
    bank: &mut TileBank,
    stacks: &mut PlayerMap<PlayerStack>,
) -> TurnResolution {
    match find_claim(total, bank, stacks) {
        Some(claim) => {
            apply_claim(claim, claimant, bank, stacks);
            TurnResolution::Claimed {
                tile: claim.tile,
                source: claim.source,
            }
        }
        None => TurnResolution::NoClaim { total },
    }
}

/// Settle a busted turn. `flip` enables the face-down rule.
pub fn resolve_bust(
    player: PlayerId,
    flip: bool,
    bank: &mut TileBank,
    stacks: &mut PlayerMap<PlayerStack>,
) -> TurnResolution {
    let returned = apply_bust_penalty(player, bank, stacks);
    let flipped = if flip {
        bank.flip_highest(returned)
    } else {
        None
    };
    TurnResolution::Busted { returned, flipped }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(v: u8) -> Tile {
        Tile::new(v).unwrap()
    }

    fn p(i: u8) -> PlayerId {
        PlayerId::new(i)
    }

    fn table(players: usize) -> (TileBank, PlayerMap<PlayerStack>) {
        (TileBank::full(), PlayerMap::with_default(players))
    }

    fn give(bank: &mut TileBank, stacks: &mut PlayerMap<PlayerStack>, player: PlayerId, v: u8) {
        assert!(bank.take(tile(v)));
        stacks[player].push(tile(v));
    }

    #[test]
    fn test_exact_match_from_bank() {
        let (mut bank, mut stacks) = table(2);
        let res = resolve_stop(24, p(0), &mut bank, &mut stacks);

        assert_eq!(
            res,
            TurnResolution::Claimed {
                tile: tile(24),
                source: TileSource::Bank
            }
        );
        assert!(!bank.contains(tile(24)));
        assert_eq!(stacks[p(0)].top(), Some(tile(24)));
    }

    #[test]
    fn test_falls_back_to_lower_bank_tile() {
        let (mut bank, mut stacks) = table(2);
        // 29 buried under 23: not claimable.
        give(&mut bank, &mut stacks, p(1), 29);
        give(&mut bank, &mut stacks, p(1), 23);

        let res = resolve_stop(29, p(0), &mut bank, &mut stacks);
        assert_eq!(
            res,
            TurnResolution::Claimed {
                tile: tile(28),
                source: TileSource::Bank
            }
        );
        assert_eq!(stacks[p(1)].len(), 2);
    }

    #[test]
    fn test_steal_from_top() {
        let (mut bank, mut stacks) = table(3);
        give(&mut bank, &mut stacks, p(1), 30);
        give(&mut bank, &mut stacks, p(2), 22);

        let res = resolve_stop(30, p(0), &mut bank, &mut stacks);
        assert!(res.is_steal(p(0)));
        assert_eq!(stacks[p(0)].top(), Some(tile(30)));
        assert!(stacks[p(1)].is_empty());
        assert_eq!(stacks[p(2)].len(), 1);
        assert_eq!(bank.len(), 14);
    }

    #[test]
    fn test_own_top_is_kept() {
        let (mut bank, mut stacks) = table(2);
        give(&mut bank, &mut stacks, p(0), 27);

        let res = resolve_stop(27, p(0), &mut bank, &mut stacks);
        assert_eq!(
            res,
            TurnResolution::Claimed {
                tile: tile(27),
                source: TileSource::Stack(p(0))
            }
        );
        assert!(!res.is_steal(p(0)));
        assert_eq!(stacks[p(0)].len(), 1);
        assert_eq!(bank.len(), 15);
    }

    #[test]
    fn test_nothing_reachable() {
        let (mut bank, mut stacks) = table(2);
        for v in 21..=25 {
            give(&mut bank, &mut stacks, p(1), v);
        }

        let res = resolve_stop(24, p(0), &mut bank, &mut stacks);
        assert_eq!(res, TurnResolution::NoClaim { total: 24 });
        assert_eq!(res.moved_tile(), None);
        assert!(stacks[p(0)].is_empty());
        assert_eq!(stacks[p(1)].len(), 5);
    }

    #[test]
    fn test_total_above_max_tile() {
        let (mut bank, mut stacks) = table(2);
        let res = resolve_stop(40, p(0), &mut bank, &mut stacks);
        assert_eq!(res.moved_tile(), Some(tile(36)));
    }

    #[test]
    fn test_bust_returns_top_tile() {
        let (mut bank, mut stacks) = table(2);
        give(&mut bank, &mut stacks, p(0), 22);
        give(&mut bank, &mut stacks, p(0), 33);

        let res = resolve_bust(p(0), false, &mut bank, &mut stacks);
        assert_eq!(
            res,
            TurnResolution::Busted {
                returned: Some(tile(33)),
                flipped: None
            }
        );
        assert!(bank.contains(tile(33)));
        assert_eq!(stacks[p(0)].top(), Some(tile(22)));
    }

    #[test]
    fn test_bust_with_empty_stack() {
        let (mut bank, mut stacks) = table(2);
        let res = resolve_bust(p(1), false, &mut bank, &mut stacks);
        assert_eq!(
            res,
            TurnResolution::Busted {
                returned: None,
                flipped: None
            }
        );
        assert_eq!(bank.len(), 16);
    }

    #[test]
    fn test_bust_flips_highest() {
        let (mut bank, mut stacks) = table(2);
        give(&mut bank, &mut stacks, p(0), 25);

        let res = resolve_bust(p(0), true, &mut bank, &mut stacks);
        assert_eq!(
            res,
            TurnResolution::Busted {
                returned: Some(tile(25)),
                flipped: Some(tile(36))
            }
        );
        assert!(bank.contains(tile(25)));
        assert!(!bank.contains(tile(36)));
        assert_eq!(bank.all_tiles().count(), 16);

        // Face-down tiles are out of play, even for an exact total.
        assert_eq!(resolve_stop(36, p(1), &mut bank, &mut stacks).moved_tile(), Some(tile(35)));
    }

    #[test]
    fn test_returned_highest_tile_stays_up() {
        let (mut bank, mut stacks) = table(2);
        for v in 33..=36 {
            give(&mut bank, &mut stacks, p(1), v);
        }

        // 36 goes back and is the highest again: nothing flips.
        let res = resolve_bust(p(1), true, &mut bank, &mut stacks);
        assert_eq!(
            res,
            TurnResolution::Busted {
                returned: Some(tile(36)),
                flipped: None
            }
        );
        assert_eq!(bank.face_down().count(), 0);
    }
}
