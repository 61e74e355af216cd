//! Dice subsystem: faces, the eight-die set, rolling and locking.

mod face;
mod set;

pub use face::Face;
pub use set::{roll, Dice, Die, FaceSource, RollResult, ScriptedFaces, DICE_COUNT};
