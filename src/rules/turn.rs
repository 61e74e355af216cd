//! The turn state machine.
//!
//! ```text
//! AwaitingRoll --roll--> AwaitingSelection --lock--> AwaitingRoll
//!      |                        |                        |
//!      | stop (total >= 21)     | nothing selectable     | all 8 locked
//!      v                        v                        v
//!   Stopped                  Busted              Stopped | Busted
//! ```
//!
//! A turn starts in `AwaitingRoll` with all eight dice unlocked and ends in
//! `Stopped` or `Busted`. Every operation validates before it mutates, so a
//! rejected action leaves the turn exactly as it was.

use serde::{Deserialize, Serialize};

use crate::core::{Action, RulesError};
use crate::dice::{Dice, Face, FaceSource, RollResult};
use crate::tiles::MIN_TILE;

/// Where a turn currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Player may roll the unlocked dice, or stop if allowed.
    AwaitingRoll,
    /// Player must lock one face from the roll just made.
    AwaitingSelection,
    /// Turn ended with a claim attempt.
    Stopped,
    /// Turn ended with nothing to show for it.
    Busted,
}

impl TurnPhase {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, TurnPhase::Stopped | TurnPhase::Busted)
    }
}

impl std::fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            TurnPhase::AwaitingRoll => "awaiting roll",
            TurnPhase::AwaitingSelection => "awaiting selection",
            TurnPhase::Stopped => "stopped",
            TurnPhase::Busted => "busted",
        };
        f.write_str(text)
    }
}

/// Result of a roll.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RollReport {
    pub faces: RollResult,
    /// The roll offered no lockable face and ended the turn.
    pub busted: bool,
}

/// Result of a lock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LockReport {
    pub face: Face,
    pub count: u8,
    pub running_total: u32,
    /// Set when the lock used up the last die and forced the turn to end.
    pub forced: Option<TurnPhase>,
}

/// One player's turn in progress.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnState {
    dice: Dice,
    phase: TurnPhase,
    require_worm: bool,
}

impl Default for TurnState {
    fn default() -> Self {
        Self::new(false)
    }
}

impl TurnState {
    /// Fresh turn: all dice unlocked, awaiting the first roll.
    #[must_use]
    pub fn new(require_worm: bool) -> Self {
        Self {
            dice: Dice::new(),
            phase: TurnPhase::AwaitingRoll,
            require_worm,
        }
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    #[must_use]
    pub fn dice(&self) -> &Dice {
        &self.dice
    }

    #[must_use]
    pub fn running_total(&self) -> u32 {
        self.dice.running_total()
    }

    /// Locked dice per face, indexed by pip value - 1.
    #[must_use]
    pub fn selections(&self) -> [u8; 6] {
        self.dice.selections()
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.dice.unlocked_count()
    }

    #[must_use]
    pub fn is_busted(&self) -> bool {
        self.phase == TurnPhase::Busted
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.phase == TurnPhase::Stopped
    }

    /// Roll every unlocked die.
    ///
    /// Busts the turn if none of the new faces can be locked.
    pub fn roll(&mut self, source: &mut impl FaceSource) -> Result<RollReport, RulesError> {
        self.expect_phase(Action::RollDice, TurnPhase::AwaitingRoll)?;

        let faces = self.dice.reroll(source)?;
        let busted = self.dice.selectable_faces().is_empty();
        self.phase = if busted {
            TurnPhase::Busted
        } else {
            TurnPhase::AwaitingSelection
        };
        Ok(RollReport { faces, busted })
    }

    /// Lock every rolled die showing `face`.
    ///
    /// When this locks the last die the turn ends on its own: stopped if
    /// stopping would be legal, busted otherwise.
    pub fn lock(&mut self, face: Face) -> Result<LockReport, RulesError> {
        self.expect_phase(Action::LockFace(face), TurnPhase::AwaitingSelection)?;

        let count = self.dice.lock_face(face)?;
        let mut forced = None;
        self.phase = if self.dice.unlocked_count() == 0 {
            let end = if self.check_stop().is_ok() {
                TurnPhase::Stopped
            } else {
                TurnPhase::Busted
            };
            forced = Some(end);
            end
        } else {
            TurnPhase::AwaitingRoll
        };

        Ok(LockReport {
            face,
            count,
            running_total: self.dice.running_total(),
            forced,
        })
    }

    /// End the turn voluntarily. Returns the total to claim with.
    pub fn stop(&mut self) -> Result<u32, RulesError> {
        self.expect_phase(Action::Stop, TurnPhase::AwaitingRoll)?;
        self.check_stop()?;
        self.phase = TurnPhase::Stopped;
        Ok(self.dice.running_total())
    }

    /// Whether `stop` would currently succeed.
    #[must_use]
    pub fn can_stop(&self) -> bool {
        self.phase == TurnPhase::AwaitingRoll && self.check_stop().is_ok()
    }

    /// Actions accepted in the current phase.
    #[must_use]
    pub fn legal_actions(&self) -> Vec<Action> {
        match self.phase {
            TurnPhase::AwaitingRoll => {
                let mut actions = Vec::with_capacity(2);
                if self.remaining() > 0 {
                    actions.push(Action::RollDice);
                }
                if self.can_stop() {
                    actions.push(Action::Stop);
                }
                actions
            }
            TurnPhase::AwaitingSelection => self
                .dice
                .selectable_faces()
                .into_iter()
                .map(Action::LockFace)
                .collect(),
            TurnPhase::Stopped | TurnPhase::Busted => Vec::new(),
        }
    }

    fn check_stop(&self) -> Result<(), RulesError> {
        let total = self.dice.running_total();
        if self.dice.locked_count() == 0 || total < u32::from(MIN_TILE) {
            return Err(RulesError::InsufficientTotal { total });
        }
        if self.require_worm && !self.dice.has_locked_worm() {
            return Err(RulesError::MissingWorm);
        }
        Ok(())
    }

    fn expect_phase(&self, action: Action, expected: TurnPhase) -> Result<(), RulesError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(RulesError::ActionOutOfTurn {
                action,
                phase: self.phase,
            })
        }
    }
}
