//! The eight dice of a turn.
//!
//! ## Rolling
//!
//! [`roll`] draws `unlocked_count` faces from a [`FaceSource`]. Locked dice
//! keep their faces, so only the unlocked ones are re-rolled; there is no
//! masking of the full set.
//!
//! ## Locking
//!
//! A face may be locked once per turn. Locked dice count toward the
//! running total and are never rolled again until the next turn.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::face::Face;
use crate::core::{GameRng, RulesError, SelectionFault};

/// Dice per turn.
pub const DICE_COUNT: usize = 8;

/// Faces produced by one roll (at most [`DICE_COUNT`]).
pub type RollResult = SmallVec<[Face; DICE_COUNT]>;

/// Anything that can produce die faces.
///
/// `GameRng` is the normal source. [`ScriptedFaces`] replays known rolls.
pub trait FaceSource {
    fn next_face(&mut self) -> Face;
}

impl FaceSource for GameRng {
    fn next_face(&mut self) -> Face {
        let value = self.gen_range(1..7) as u8;
        Face::new(value).unwrap_or(Face::WORM)
    }
}

/// Replays a fixed sequence of faces, then falls back to a seeded RNG.
///
/// Useful for reproducing a physical game or a specific test position.
/// Once the script is used up, faces come from the fallback stream:
/// `GameRng::new(0)` unless replaced with [`ScriptedFaces::with_fallback`].
#[derive(Clone, Debug)]
pub struct ScriptedFaces {
    script: VecDeque<Face>,
    fallback: GameRng,
}

impl ScriptedFaces {
    pub fn new(faces: impl IntoIterator<Item = Face>) -> Self {
        Self {
            script: faces.into_iter().collect(),
            fallback: GameRng::new(0),
        }
    }

    /// Build from raw pip values. Returns `None` if any value is outside 1..=6.
    ///
    /// ```
    /// use pickomino_engine::dice::ScriptedFaces;
    ///
    /// assert_eq!(ScriptedFaces::from_values(&[6, 2]).map(|s| s.remaining()), Some(2));
    /// assert!(ScriptedFaces::from_values(&[9, 0]).is_none());
    /// ```
    #[must_use]
    pub fn from_values(values: &[u8]) -> Option<Self> {
        let faces = values
            .iter()
            .map(|&v| Face::new(v))
            .collect::<Option<Vec<_>>>()?;
        Some(Self::new(faces))
    }

    /// Draw from `rng` once the script is used up.
    #[must_use]
    pub fn with_fallback(mut self, rng: GameRng) -> Self {
        self.fallback = rng;
        self
    }

    /// Faces still queued.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl FaceSource for ScriptedFaces {
    fn next_face(&mut self) -> Face {
        match self.script.pop_front() {
            Some(face) => face,
            None => self.fallback.next_face(),
        }
    }
}

/// Roll `unlocked_count` independent dice.
///
/// Fails only if more than [`DICE_COUNT`] dice are requested.
pub fn roll(unlocked_count: usize, source: &mut impl FaceSource) -> Result<RollResult, RulesError> {
    if unlocked_count > DICE_COUNT {
        return Err(RulesError::InvalidDiceCount {
            requested: unlocked_count,
        });
    }
    Ok((0..unlocked_count).map(|_| source.next_face()).collect())
}

/// A single die.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Die {
    pub face: Face,
    pub locked: bool,
}

/// The full set of dice for one turn.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dice {
    dice: [Die; DICE_COUNT],
}

impl Default for Dice {
    fn default() -> Self {
        Self::new()
    }
}

impl Dice {
    /// All dice unlocked, showing 1 until the first roll.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dice: [Die {
                face: Face::ALL[0],
                locked: false,
            }; DICE_COUNT],
        }
    }

    /// Build a set with explicit faces, all unlocked.
    #[must_use]
    pub fn with_faces(faces: [Face; DICE_COUNT]) -> Self {
        Self {
            dice: faces.map(|face| Die { face, locked: false }),
        }
    }

    #[must_use]
    pub fn dice(&self) -> &[Die; DICE_COUNT] {
        &self.dice
    }

    #[must_use]
    pub fn unlocked_count(&self) -> usize {
        self.dice.iter().filter(|d| !d.locked).count()
    }

    #[must_use]
    pub fn locked_count(&self) -> usize {
        DICE_COUNT - self.unlocked_count()
    }

    /// Whether any die has been locked on `face` this turn.
    #[must_use]
    pub fn is_face_locked(&self, face: Face) -> bool {
        self.dice.iter().any(|d| d.locked && d.face == face)
    }

    #[must_use]
    pub fn has_locked_worm(&self) -> bool {
        self.is_face_locked(Face::WORM)
    }

    /// Count of locked dice per face, indexed by pip value - 1.
    #[must_use]
    pub fn selections(&self) -> [u8; 6] {
        let mut counts = [0u8; 6];
        for die in self.dice.iter().filter(|d| d.locked) {
            counts[die.face.slot()] += 1;
        }
        counts
    }

    /// Sum of the weights of all locked dice.
    #[must_use]
    pub fn running_total(&self) -> u32 {
        self.dice
            .iter()
            .filter(|d| d.locked)
            .map(|d| d.face.weight())
            .sum()
    }

    /// Distinct faces on unlocked dice that have not been locked yet.
    #[must_use]
    pub fn selectable_faces(&self) -> SmallVec<[Face; 6]> {
        Face::ALL
            .iter()
            .copied()
            .filter(|&face| !self.is_face_locked(face))
            .filter(|&face| self.dice.iter().any(|d| !d.locked && d.face == face))
            .collect()
    }

    /// Re-roll every unlocked die. Returns the new faces in die order.
    pub fn reroll(&mut self, source: &mut impl FaceSource) -> Result<RollResult, RulesError> {
        let unlocked = self.unlocked_count();
        if unlocked == 0 {
            return Err(RulesError::NoUnlockedDice);
        }
        let faces = roll(unlocked, source)?;
        for (die, &face) in self.dice.iter_mut().filter(|d| !d.locked).zip(faces.iter()) {
            die.face = face;
        }
        Ok(faces)
    }

    /// Lock the dice at `subset`, which must all be unlocked and show `face`.
    ///
    /// Repeated indices count once. Returns the number of dice locked.
    pub fn lock(&mut self, face: Face, subset: &[usize]) -> Result<u8, RulesError> {
        let fault = |reason| RulesError::IllegalSelection { face, reason };

        if self.is_face_locked(face) {
            return Err(fault(SelectionFault::AlreadyLocked));
        }
        if subset.is_empty() {
            return Err(fault(SelectionFault::EmptySubset));
        }

        let mut mask = 0u8;
        for &index in subset {
            let die = self.dice.get(index).ok_or(fault(SelectionFault::OutOfRange))?;
            if die.locked {
                return Err(fault(SelectionFault::DieLocked));
            }
            if die.face != face {
                return Err(fault(SelectionFault::FaceMismatch));
            }
            mask |= 1 << index;
        }

        for (index, die) in self.dice.iter_mut().enumerate() {
            if mask & (1 << index) != 0 {
                die.locked = true;
            }
        }
        Ok(mask.count_ones() as u8)
    }

    /// Lock every unlocked die showing `face`.
    pub fn lock_face(&mut self, face: Face) -> Result<u8, RulesError> {
        if self.is_face_locked(face) {
            return Err(RulesError::IllegalSelection {
                face,
                reason: SelectionFault::AlreadyLocked,
            });
        }
        let subset: SmallVec<[usize; DICE_COUNT]> = self
            .dice
            .iter()
            .enumerate()
            .filter(|(_, d)| !d.locked && d.face == face)
            .map(|(i, _)| i)
            .collect();
        if subset.is_empty() {
            return Err(RulesError::IllegalSelection {
                face,
                reason: SelectionFault::NotRolled,
            });
        }
        self.lock(face, &subset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn faces(values: [u8; DICE_COUNT]) -> [Face; DICE_COUNT] {
        values.map(|v| Face::new(v).unwrap())
    }

    fn face(v: u8) -> Face {
        Face::new(v).unwrap()
    }

    fn script(values: &[u8]) -> ScriptedFaces {
        ScriptedFaces::from_values(values).unwrap()
    }

    #[test]
    fn test_roll_counts() {
        let mut rng = GameRng::new(1);
        for n in 0..=DICE_COUNT {
            assert_eq!(roll(n, &mut rng).unwrap().len(), n);
        }
        assert_eq!(
            roll(9, &mut rng),
            Err(RulesError::InvalidDiceCount { requested: 9 })
        );
    }

    #[test]
    fn test_roll_covers_all_faces() {
        let mut rng = GameRng::new(3);
        let mut seen = [false; 6];
        for _ in 0..200 {
            for f in roll(DICE_COUNT, &mut rng).unwrap() {
                seen[f.slot()] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_scripted_faces_then_fallback() {
        let mut source = script(&[6, 2]).with_fallback(GameRng::new(17));
        assert_eq!(source.next_face(), Face::WORM);
        assert_eq!(source.next_face(), face(2));
        assert_eq!(source.remaining(), 0);

        let mut rng = GameRng::new(17);
        for _ in 0..8 {
            assert_eq!(source.next_face(), rng.next_face());
        }
    }

    #[test]
    fn test_scripted_faces_reject_bad_values() {
        assert!(ScriptedFaces::from_values(&[9, 0]).is_none());
        assert!(ScriptedFaces::from_values(&[3, 7]).is_none());
        assert_eq!(ScriptedFaces::from_values(&[]).map(|s| s.remaining()), Some(0));
    }

    #[test]
    fn test_reroll_only_unlocked() {
        let mut dice = Dice::with_faces(faces([6, 6, 5, 3, 3, 3, 1, 1]));
        dice.lock_face(face(3)).unwrap();

        let mut source = script(&[2, 2, 2, 2, 2]);
        let rolled = dice.reroll(&mut source).unwrap();

        assert_eq!(rolled.len(), 5);
        let shown: Vec<u8> = dice.dice().iter().map(|d| d.face.value()).collect();
        assert_eq!(shown, vec![2, 2, 2, 3, 3, 3, 2, 2]);
        assert_eq!(dice.locked_count(), 3);
    }

    #[test]
    fn test_reroll_with_everything_locked() {
        let mut dice = Dice::with_faces(faces([6, 6, 6, 6, 6, 6, 6, 6]));
        dice.lock_face(Face::WORM).unwrap();
        assert_eq!(
            dice.reroll(&mut GameRng::new(0)),
            Err(RulesError::NoUnlockedDice)
        );
    }

    #[test]
    fn test_lock_face_totals() {
        let mut dice = Dice::with_faces(faces([6, 6, 5, 3, 3, 3, 1, 1]));

        assert_eq!(dice.lock_face(face(3)).unwrap(), 3);
        assert_eq!(dice.running_total(), 9);
        assert_eq!(dice.lock_face(Face::WORM).unwrap(), 2);
        assert_eq!(dice.running_total(), 19);
        assert!(dice.has_locked_worm());
        assert_eq!(dice.selections(), [0, 0, 3, 0, 0, 2]);
        assert_eq!(dice.locked_count() + dice.unlocked_count(), DICE_COUNT);
    }

    #[test]
    fn test_lock_same_face_twice_rejected() {
        let mut dice = Dice::with_faces(faces([3, 3, 1, 1, 1, 1, 1, 1]));
        dice.lock(face(3), &[0]).unwrap();

        let before = dice.clone();
        let err = dice.lock(face(3), &[1]).unwrap_err();
        assert_eq!(
            err,
            RulesError::IllegalSelection {
                face: face(3),
                reason: SelectionFault::AlreadyLocked
            }
        );
        assert_eq!(dice, before);
    }

    #[test]
    fn test_lock_subset_validation() {
        let mut dice = Dice::with_faces(faces([4, 4, 2, 1, 1, 1, 1, 1]));
        let before = dice.clone();

        let reason = |r: Result<u8, RulesError>| match r {
            Err(RulesError::IllegalSelection { reason, .. }) => reason,
            other => panic!("unexpected {other:?}"),
        };

        assert_eq!(reason(dice.lock(face(4), &[])), SelectionFault::EmptySubset);
        assert_eq!(reason(dice.lock(face(4), &[0, 2])), SelectionFault::FaceMismatch);
        assert_eq!(reason(dice.lock(face(4), &[8])), SelectionFault::OutOfRange);
        assert_eq!(dice, before);

        assert_eq!(dice.lock(face(4), &[0, 0]).unwrap(), 1);
        assert_eq!(reason(dice.lock(face(2), &[0])), SelectionFault::DieLocked);
    }

    #[test]
    fn test_lock_face_not_rolled() {
        let mut dice = Dice::with_faces(faces([1, 1, 1, 1, 2, 2, 2, 2]));
        assert_eq!(
            dice.lock_face(face(5)),
            Err(RulesError::IllegalSelection {
                face: face(5),
                reason: SelectionFault::NotRolled
            })
        );
    }

    #[test]
    fn test_selectable_faces_excludes_locked() {
        let mut dice = Dice::with_faces(faces([6, 6, 5, 3, 3, 3, 1, 1]));
        assert_eq!(dice.selectable_faces().len(), 4);

        dice.lock_face(face(3)).unwrap();
        let mut source = script(&[3, 3, 3, 3, 3]);
        dice.reroll(&mut source).unwrap();
        assert!(dice.selectable_faces().is_empty());
    }
}
