//! Game rules: the turn state machine and end-of-turn tile resolution.
//!
//! Both halves are plain functions over owned state. The `game` module
//! sequences them; nothing here knows about turn order.

pub mod claim;
pub mod turn;

pub use claim::{
    apply_bust_penalty, apply_claim, find_claim, resolve_bust, resolve_stop, Claim, TileSource,
    TurnResolution,
};
pub use turn::{LockReport, RollReport, TurnPhase, TurnState};
