//! Rule violations.
//!
//! Every rejected action leaves the game untouched, so all of these are
//! recoverable: the caller retries with a legal action.

use super::action::Action;
use crate::dice::Face;
use crate::rules::TurnPhase;

/// Why an action or dice operation was rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RulesError {
    /// Locking a face that was not rolled, was already locked this turn,
    /// or an empty/invalid dice subset.
    #[error("illegal selection of {face}: {reason}")]
    IllegalSelection { face: Face, reason: SelectionFault },

    /// Stopping before the running total reaches the lowest tile.
    #[error("cannot stop with total {total}, need at least 21")]
    InsufficientTotal { total: u32 },

    /// Stopping without a worm while the worm rule is enabled.
    #[error("cannot stop without a locked worm")]
    MissingWorm,

    /// Rolling with every die already locked.
    #[error("no unlocked dice left to roll")]
    NoUnlockedDice,

    /// The action does not fit the current turn phase.
    #[error("{action} is not allowed while {phase}")]
    ActionOutOfTurn { action: Action, phase: TurnPhase },

    /// The bank is empty and the game has been decided.
    #[error("the game is over")]
    GameOver,

    /// `roll` asked for more dice than exist.
    #[error("cannot roll {requested} dice, only 8 exist")]
    InvalidDiceCount { requested: usize },

    /// A replayed record does not match what the game produced.
    #[error("replay diverged at turn {turn}, action {sequence}")]
    ReplayDiverged { turn: u32, sequence: u32 },
}

/// Detail for [`RulesError::IllegalSelection`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionFault {
    AlreadyLocked,
    NotRolled,
    EmptySubset,
    DieLocked,
    FaceMismatch,
    OutOfRange,
}

impl std::fmt::Display for SelectionFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            SelectionFault::AlreadyLocked => "face already locked this turn",
            SelectionFault::NotRolled => "no unlocked die shows this face",
            SelectionFault::EmptySubset => "no dice selected",
            SelectionFault::DieLocked => "selected die is already locked",
            SelectionFault::FaceMismatch => "selected die shows another face",
            SelectionFault::OutOfRange => "die index out of range",
        };
        f.write_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = RulesError::IllegalSelection {
            face: Face::WORM,
            reason: SelectionFault::AlreadyLocked,
        };
        assert_eq!(
            err.to_string(),
            "illegal selection of worm: face already locked this turn"
        );

        let err = RulesError::ActionOutOfTurn {
            action: Action::Stop,
            phase: TurnPhase::AwaitingSelection,
        };
        assert_eq!(err.to_string(), "stop is not allowed while awaiting selection");

        let err = RulesError::InsufficientTotal { total: 19 };
        assert_eq!(err.to_string(), "cannot stop with total 19, need at least 21");

        let err = RulesError::ReplayDiverged { turn: 3, sequence: 1 };
        assert_eq!(err.to_string(), "replay diverged at turn 3, action 1");
    }
}
