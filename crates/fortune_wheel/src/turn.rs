//! State machine for one player's turn.
//!
//! ```text
//! AwaitingAction --spin--> Spinning --cash/token--> LetterPrompt(v, Consonant)
//!                                   --hazard + jolly--> Resolving(hazard)
//!                                   --hazard--> TurnOver
//! AwaitingAction --buy vowel--> LetterPrompt(0, Vowel)
//! AwaitingAction --solve/pass--> TurnOver
//! LetterPrompt --hit--> AwaitingAction
//! LetterPrompt --miss/invalid--> TurnOver
//! Resolving --use jolly--> AwaitingAction
//! Resolving --decline--> TurnOver
//! ```
//!
//! The controller knows nothing about clocks; the caller delivers a
//! `timeout` event when its own deadline passes.

use crate::action::{ActionError, InvalidInput, TurnAction, TurnEvent};
use crate::board::BoardState;
use crate::contracts::{LetterIsFresh, LetterMatchesPrompt, VowelAffordable};
use crate::ledger::{DEFAULT_VOWEL_COST, ScoreLedger};
use crate::types::{Letter, LetterClass, Player};
use crate::wheel::{Hazard, Outcome, PrizeTable, WheelResolver};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Letter value of a drawn free-spin token.
pub const FREE_SPIN_LETTER_VALUE: u32 = 500;

/// Where the active player's turn stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnState {
    /// Waiting for spin, buy vowel, solve or pass.
    AwaitingAction,
    /// The resolver is running. Never observed between actions.
    Spinning,
    /// Waiting for a letter.
    LetterPrompt {
        /// Pay per occurrence (0 for vowels).
        value: u32,
        /// Class of letter the prompt accepts.
        class: LetterClass,
    },
    /// A hazard was drawn; waiting for the jolly decision.
    Resolving(Hazard),
    /// Terminal.
    TurnOver,
}

impl TurnState {
    /// Short label for logs and error messages.
    pub fn label(&self) -> &'static str {
        match self {
            TurnState::AwaitingAction => "awaiting action",
            TurnState::Spinning => "spinning",
            TurnState::LetterPrompt { .. } => "awaiting a letter",
            TurnState::Resolving(_) => "awaiting the jolly decision",
            TurnState::TurnOver => "turn over",
        }
    }

    /// Returns true if the state has a transition for the action.
    pub fn accepts(&self, action: &TurnAction) -> bool {
        match self {
            TurnState::AwaitingAction => matches!(
                action,
                TurnAction::Spin
                    | TurnAction::BuyVowel
                    | TurnAction::Solve(_)
                    | TurnAction::Pass
                    | TurnAction::Timeout
            ),
            TurnState::LetterPrompt { .. } => {
                matches!(action, TurnAction::GuessLetter(_) | TurnAction::Timeout)
            }
            TurnState::Resolving(_) => {
                matches!(action, TurnAction::UseJolly(_) | TurnAction::Timeout)
            }
            TurnState::Spinning | TurnState::TurnOver => false,
        }
    }
}

/// Per-match turn rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRules {
    /// Price of a vowel.
    pub vowel_cost: u32,
    /// Letter value after drawing a free-spin token.
    pub token_letter_value: u32,
}

impl Default for TurnRules {
    fn default() -> Self {
        Self {
            vowel_cost: DEFAULT_VOWEL_COST,
            token_letter_value: FREE_SPIN_LETTER_VALUE,
        }
    }
}

/// Sequences one player's actions within a round.
///
/// Callers check [`TurnState::accepts`] (the engine does so through
/// [`ActionAccepted`](crate::contracts::ActionAccepted)); each method also
/// refuses actions its state has no transition for.
#[derive(Debug, Clone)]
pub struct TurnController {
    state: TurnState,
    rules: TurnRules,
}

impl TurnController {
    /// Starts a fresh turn in `AwaitingAction`.
    #[instrument]
    pub fn new(rules: TurnRules) -> Self {
        Self {
            state: TurnState::AwaitingAction,
            rules,
        }
    }

    /// Current state.
    pub fn state(&self) -> &TurnState {
        &self.state
    }

    /// Rules in force.
    pub fn rules(&self) -> &TurnRules {
        &self.rules
    }

    /// Returns true once the turn has ended.
    pub fn is_over(&self) -> bool {
        self.state == TurnState::TurnOver
    }

    /// Forces `TurnOver`, used when the match ends mid-turn.
    pub(crate) fn close(&mut self) {
        self.state = TurnState::TurnOver;
    }

    fn illegal(&self, action: TurnAction) -> ActionError {
        ActionError::IllegalAction {
            action,
            state: self.state.label(),
        }
    }

    fn require(&self, action: TurnAction) -> Result<(), ActionError> {
        if self.state.accepts(&action) {
            Ok(())
        } else {
            Err(self.illegal(action))
        }
    }

    fn end_turn(&mut self, event: TurnEvent) -> TurnEvent {
        info!(?event, "Turn over");
        self.state = TurnState::TurnOver;
        event
    }

    /// Spins the wheel and applies the outcome.
    #[instrument(skip_all, fields(player = %player.id()))]
    pub fn spin<R: Rng + ?Sized>(
        &mut self,
        player: &mut Player,
        prizes: &mut PrizeTable,
        rng: &mut R,
    ) -> Result<TurnEvent, ActionError> {
        self.require(TurnAction::Spin)?;
        self.state = TurnState::Spinning;

        let outcome = WheelResolver::spin(prizes, rng);
        info!(%outcome, "Spun");

        let event = match outcome {
            Outcome::Cash(value) => {
                self.state = TurnState::LetterPrompt {
                    value,
                    class: LetterClass::Consonant,
                };
                TurnEvent::Spun(outcome)
            }
            Outcome::FreeSpinToken => {
                ScoreLedger::grant_jolly(player);
                self.state = TurnState::LetterPrompt {
                    value: self.rules.token_letter_value,
                    class: LetterClass::Consonant,
                };
                TurnEvent::Spun(outcome)
            }
            Outcome::Bankrupt | Outcome::Pass => {
                let hazard = outcome.hazard().unwrap_or(Hazard::Pass);
                if player.jolly_count() > 0 {
                    self.state = TurnState::Resolving(hazard);
                    TurnEvent::JollyOffered(hazard)
                } else {
                    self.suffer(player, hazard)
                }
            }
        };
        Ok(event)
    }

    fn suffer(&mut self, player: &mut Player, hazard: Hazard) -> TurnEvent {
        match hazard {
            Hazard::Bankrupt => {
                let forfeited = ScoreLedger::apply_bankrupt(player);
                self.end_turn(TurnEvent::Bankrupt { forfeited })
            }
            Hazard::Pass => self.end_turn(TurnEvent::LostTurn),
        }
    }

    /// Answers the jolly offer after a hazard.
    #[instrument(skip(self, player), fields(player = %player.id()))]
    pub fn use_jolly(&mut self, player: &mut Player, use_it: bool) -> Result<TurnEvent, ActionError> {
        let TurnState::Resolving(hazard) = self.state else {
            return Err(self.illegal(TurnAction::UseJolly(use_it)));
        };

        if use_it && ScoreLedger::consume_jolly(player) {
            info!(%hazard, "Jolly absorbed hazard");
            self.state = TurnState::AwaitingAction;
            return Ok(TurnEvent::JollyUsed(hazard));
        }
        Ok(self.suffer(player, hazard))
    }

    /// Pays for a vowel and opens a vowel prompt.
    ///
    /// # Errors
    ///
    /// `InsufficientFunds` if the pot is below the vowel price; nothing changes.
    #[instrument(skip_all, fields(player = %player.id(), pot = player.round_pot()))]
    pub fn buy_vowel(&mut self, player: &mut Player) -> Result<TurnEvent, ActionError> {
        self.require(TurnAction::BuyVowel)?;
        let cost = self.rules.vowel_cost;
        VowelAffordable::check(player, cost)?;
        ScoreLedger::charge_vowel_purchase(player, cost);
        self.state = TurnState::LetterPrompt {
            value: 0,
            class: LetterClass::Vowel,
        };
        Ok(TurnEvent::VowelBought { cost })
    }

    /// Evaluates a letter at the open prompt.
    ///
    /// # Errors
    ///
    /// `AlreadyGuessed` if the letter was called before; the prompt stays open.
    #[instrument(skip(self, player, board), fields(player = %player.id()))]
    pub fn guess_letter(
        &mut self,
        player: &mut Player,
        board: &mut BoardState,
        input: &str,
    ) -> Result<TurnEvent, ActionError> {
        let TurnState::LetterPrompt { value, class } = self.state else {
            return Err(self.illegal(TurnAction::GuessLetter(input.to_string())));
        };

        let letter = match Letter::parse(input)
            .and_then(|letter| LetterMatchesPrompt::check(letter, class).map(|()| letter))
        {
            Ok(letter) => letter,
            Err(invalid) => return Ok(self.end_turn(TurnEvent::InvalidInput(invalid))),
        };
        LetterIsFresh::check(letter, board)?;

        let occurrences = board.reveal(letter)?;
        if occurrences == 0 {
            return Ok(self.end_turn(TurnEvent::LetterMiss(letter)));
        }

        let credited = match class {
            LetterClass::Consonant => ScoreLedger::credit_letter_hit(player, value, occurrences),
            LetterClass::Vowel => 0,
        };
        debug!(%letter, occurrences, credited, "Letter hit");
        self.state = TurnState::AwaitingAction;
        Ok(TurnEvent::LetterHit {
            letter,
            occurrences,
            credited,
        })
    }

    /// Attempts the whole phrase. Success reveals the board.
    #[instrument(skip(self, board, candidate))]
    pub fn solve(&mut self, board: &mut BoardState, candidate: &str) -> Result<TurnEvent, ActionError> {
        self.require(TurnAction::Solve(candidate.to_string()))?;
        if candidate.trim().is_empty() {
            return Ok(self.end_turn(TurnEvent::InvalidInput(InvalidInput::EmptySolution)));
        }
        if board.solve_attempt(candidate) {
            board.reveal_all();
            self.state = TurnState::TurnOver;
            info!("Phrase solved");
            return Ok(TurnEvent::Solved);
        }
        Ok(self.end_turn(TurnEvent::WrongSolution))
    }

    /// Gives the turn away.
    #[instrument(skip(self))]
    pub fn pass(&mut self) -> Result<TurnEvent, ActionError> {
        self.require(TurnAction::Pass)?;
        Ok(self.end_turn(TurnEvent::Passed))
    }

    /// Ends the turn because the caller's deadline passed. A pending hazard
    /// resolves as if the jolly was declined.
    #[instrument(skip(self, player), fields(player = %player.id()))]
    pub fn timeout(&mut self, player: &mut Player) -> Result<TurnEvent, ActionError> {
        self.require(TurnAction::Timeout)?;
        if let TurnState::Resolving(Hazard::Bankrupt) = self.state {
            ScoreLedger::apply_bankrupt(player);
        }
        Ok(self.end_turn(TurnEvent::TimedOut))
    }
}
