//! The game coordinator.

use im::Vector;
use tracing::{debug, info, trace};

use super::result::GameResult;
use super::snapshot::{Outcome, Snapshot, TurnEvent};
use crate::core::{
    Action, ActionRecord, ConfigError, GameConfig, GameRng, PlayerId, PlayerMap, RulesError,
    ACTION_COUNT,
};
use crate::dice::{FaceSource, ScriptedFaces};
use crate::playout::TurnPolicy;
use crate::rules::{resolve_bust, resolve_stop, TurnPhase, TurnResolution, TurnState};
use crate::tiles::{PlayerStack, TileBank};

/// One game of Pickomino.
///
/// Owns the tile bank, every player's stack, turn order, the turn in
/// progress and the dice RNG. All persistent parts are `im`-backed, so
/// `clone` is cheap and a kept copy is a complete undo point.
///
/// ```
/// use pickomino_engine::core::{Action, GameConfig};
/// use pickomino_engine::game::Game;
///
/// let mut game = Game::new(GameConfig::new().with_player_count(2).with_seed(5)).unwrap();
/// let outcome = game.apply_action(Action::RollDice).unwrap();
/// assert_eq!(outcome.player.index(), 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Game {
    config: GameConfig,
    rng: GameRng,
    bank: TileBank,
    stacks: PlayerMap<PlayerStack>,
    current: PlayerId,
    /// `None` between turns.
    turn: Option<TurnState>,
    turn_number: u32,
    action_sequence: u32,
    history: Vector<ActionRecord>,
}

impl Game {
    /// Start a game: all tiles in the bank, empty stacks, player 0 to act.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            rng: GameRng::new(config.seed),
            bank: TileBank::full(),
            stacks: PlayerMap::with_default(config.player_count),
            current: PlayerId::new(0),
            turn: None,
            turn_number: 1,
            action_sequence: 0,
            history: Vector::new(),
            config,
        })
    }

    /// Restart with the same table and a new seed.
    pub fn reset(&mut self, seed: u64) -> Snapshot {
        let config = GameConfig {
            seed,
            ..self.config.clone()
        };
        *self = Self {
            rng: GameRng::new(seed),
            bank: TileBank::full(),
            stacks: PlayerMap::with_default(config.player_count),
            current: PlayerId::new(0),
            turn: None,
            turn_number: 1,
            action_sequence: 0,
            history: Vector::new(),
            config,
        };
        debug!(seed, "game reset");
        self.snapshot()
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.config.player_count
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    #[must_use]
    pub fn bank(&self) -> &TileBank {
        &self.bank
    }

    #[must_use]
    pub fn stacks(&self) -> &PlayerMap<PlayerStack> {
        &self.stacks
    }

    #[must_use]
    pub fn stack(&self, player: PlayerId) -> &PlayerStack {
        &self.stacks[player]
    }

    /// The turn in progress, if the current player has acted yet.
    #[must_use]
    pub fn turn(&self) -> Option<&TurnState> {
        self.turn.as_ref()
    }

    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Every applied action, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    /// The game ends once no face-up tile is left in the bank.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.bank.is_empty()
    }

    /// Final ranking, once the game is over.
    #[must_use]
    pub fn is_terminal(&self) -> Option<GameResult> {
        self.is_over().then(|| GameResult::from_stacks(&self.stacks))
    }

    /// Worms per player.
    #[must_use]
    pub fn scores(&self) -> PlayerMap<u32> {
        self.stacks.map(|_, stack| stack.score())
    }

    /// Actions the current player may take now.
    #[must_use]
    pub fn legal_actions(&self) -> Vec<Action> {
        if self.is_over() {
            return Vec::new();
        }
        match &self.turn {
            Some(turn) => turn.legal_actions(),
            None => vec![Action::RollDice],
        }
    }

    /// Read-only view for observation encoding.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let fresh;
        let turn = match &self.turn {
            Some(turn) => turn,
            None => {
                fresh = TurnState::new(self.config.require_worm);
                &fresh
            }
        };
        let game_over = self.is_over();

        let mut action_mask = [false; ACTION_COUNT];
        for action in self.legal_actions() {
            action_mask[action.index()] = true;
        }

        Snapshot {
            dice: *turn.dice().dice(),
            phase: turn.phase(),
            running_total: turn.running_total(),
            bank: self.bank.iter().collect(),
            face_down: self.bank.face_down().collect(),
            stacks: self.stacks.map(|_, stack| stack.iter().collect()),
            current_player: self.current,
            turn_number: self.turn_number,
            action_mask,
            game_over,
        }
    }

    // === Transitions ===

    /// Apply one action, rolling with the game's own RNG.
    ///
    /// On error nothing changes, the RNG position included.
    pub fn apply_action(&mut self, action: Action) -> Result<Outcome, RulesError> {
        let mut rng = self.rng.clone();
        let outcome = self.apply_from(action, &mut rng, false)?;
        self.rng = rng;
        Ok(outcome)
    }

    /// Apply one action, taking any rolled faces from `source`.
    ///
    /// The game's RNG does not advance. Rolled faces are kept in the
    /// history so [`Game::replay`] can feed them back. On error nothing
    /// changes.
    pub fn apply_action_with(
        &mut self,
        action: Action,
        source: &mut impl FaceSource,
    ) -> Result<Outcome, RulesError> {
        self.apply_from(action, source, true)
    }

    fn apply_from(
        &mut self,
        action: Action,
        source: &mut impl FaceSource,
        supplied: bool,
    ) -> Result<Outcome, RulesError> {
        if self.is_over() {
            return Err(RulesError::GameOver);
        }

        let player = self.current;
        let mut turn = self
            .turn
            .clone()
            .unwrap_or_else(|| TurnState::new(self.config.require_worm));

        let event = match Self::drive(&mut turn, action, source) {
            Ok(event) => event,
            Err(err) => {
                debug!(%player, %action, error = %err, "rejected action");
                return Err(err);
            }
        };
        debug!(%player, %action, total = turn.running_total(), "applied action");

        let sequence = self.action_sequence;
        self.action_sequence += 1;
        let mut record = ActionRecord::new(player, action, self.turn_number, sequence);
        if let TurnEvent::Rolled { faces, .. } = &event {
            record = record.with_roll(faces.clone(), supplied);
        }
        self.history.push_back(record);

        let resolution = match turn.phase() {
            TurnPhase::Stopped => Some(resolve_stop(
                turn.running_total(),
                player,
                &mut self.bank,
                &mut self.stacks,
            )),
            TurnPhase::Busted => Some(resolve_bust(
                player,
                self.config.flip_on_bust,
                &mut self.bank,
                &mut self.stacks,
            )),
            TurnPhase::AwaitingRoll | TurnPhase::AwaitingSelection => None,
        };

        match resolution {
            Some(resolution) => self.finish_turn(player, resolution),
            None => self.turn = Some(turn),
        }

        Ok(Outcome {
            player,
            action,
            event,
            resolution,
            scores: self.scores(),
            game_over: self.is_over(),
        })
    }

    /// Apply one action and return the resulting view with the outcome.
    ///
    /// The shape an observation adapter wants from a single call.
    pub fn apply_and_observe(
        &mut self,
        action: Action,
    ) -> Result<(Snapshot, Outcome), RulesError> {
        let outcome = self.apply_action(action)?;
        Ok((self.snapshot(), outcome))
    }

    /// Pure transition: the game after `action`, leaving `self` untouched.
    pub fn step(&self, action: Action) -> Result<(Game, Outcome), RulesError> {
        let mut next = self.clone();
        let outcome = next.apply_action(action)?;
        Ok((next, outcome))
    }

    /// Apply a sequence of actions, stopping at the first rejection.
    ///
    /// Every roll uses the game's RNG, so this reproduces a game only when
    /// no faces were supplied; [`Game::replay`] handles recorded histories.
    /// On error the game keeps every action applied before the failing one.
    /// Returns the number of actions applied.
    pub fn apply_all(
        &mut self,
        actions: impl IntoIterator<Item = Action>,
    ) -> Result<usize, RulesError> {
        let mut applied = 0;
        for action in actions {
            self.apply_action(action)?;
            applied += 1;
        }
        Ok(applied)
    }

    /// Re-apply a recorded history, e.g. from [`Game::history`].
    ///
    /// Supplied rolls are fed back from the record; the rest are re-rolled
    /// with the game's RNG and must match the recorded faces. A record for
    /// another player or with different faces fails with
    /// [`RulesError::ReplayDiverged`]. On error the game keeps every record
    /// applied before the failing one. Returns the number applied.
    pub fn replay<'a>(
        &mut self,
        records: impl IntoIterator<Item = &'a ActionRecord>,
    ) -> Result<usize, RulesError> {
        let mut applied = 0;
        for record in records {
            let diverged = RulesError::ReplayDiverged {
                turn: record.turn,
                sequence: record.sequence,
            };
            if record.player != self.current {
                return Err(diverged);
            }

            let mut next = self.clone();
            let outcome = match &record.faces {
                Some(faces) if record.supplied => {
                    let mut script = ScriptedFaces::new(faces.iter().copied());
                    next.apply_action_with(record.action, &mut script)?
                }
                _ => next.apply_action(record.action)?,
            };

            let rolled = match &outcome.event {
                TurnEvent::Rolled { faces, .. } => Some(faces),
                _ => None,
            };
            if rolled != record.faces.as_ref() {
                debug!(turn = record.turn, sequence = record.sequence, "replay diverged");
                return Err(diverged);
            }

            *self = next;
            applied += 1;
        }
        Ok(applied)
    }

    /// Play the current player's whole turn, asking `policy` for each action.
    ///
    /// Returns the outcome of the action that ended the turn. The turn is
    /// committed only if it completes; if the policy picks an illegal action
    /// the game is left as it was before the call.
    pub fn advance_turn(&mut self, policy: &mut impl TurnPolicy) -> Result<Outcome, RulesError> {
        if self.is_over() {
            return Err(RulesError::GameOver);
        }

        let mut next = self.clone();
        loop {
            let legal = next.legal_actions();
            let action = policy.choose(&next, &legal);
            let outcome = next.apply_action(action)?;
            if outcome.ended_turn() {
                *self = next;
                return Ok(outcome);
            }
        }
    }

    fn drive(
        turn: &mut TurnState,
        action: Action,
        source: &mut impl FaceSource,
    ) -> Result<TurnEvent, RulesError> {
        match action {
            Action::RollDice => {
                let report = turn.roll(source)?;
                trace!(faces = ?report.faces, busted = report.busted, "rolled");
                Ok(TurnEvent::Rolled {
                    faces: report.faces,
                    busted: report.busted,
                })
            }
            Action::LockFace(face) => {
                let report = turn.lock(face)?;
                Ok(TurnEvent::Locked {
                    face: report.face,
                    count: report.count,
                    running_total: report.running_total,
                })
            }
            Action::Stop => {
                let total = turn.stop()?;
                Ok(TurnEvent::Stopped { total })
            }
        }
    }

    fn finish_turn(&mut self, player: PlayerId, resolution: TurnResolution) {
        debug!(%player, ?resolution, turn = self.turn_number, "turn resolved");

        self.turn = None;
        self.current = player.next(self.player_count());
        self.turn_number += 1;
        self.action_sequence = 0;

        if let Some(result) = self.is_terminal() {
            info!(
                winner = ?result.winner(),
                turns = self.turn_number - 1,
                "game over"
            );
        }
    }
}
