//! Contract-based validation for turn actions.
//!
//! Preconditions are checked before the state machine mutates anything;
//! postconditions run after every engine action in debug builds.

use crate::action::{ActionError, InvalidInput, TurnAction};
use crate::board::BoardState;
use crate::invariants::{InvariantSet, MatchInvariants, RoundInvariants};
use crate::session::{Match, Round};
use crate::turn::TurnState;
use crate::types::{Letter, LetterClass, Player};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the current state accepts the action.
pub struct ActionAccepted;

impl ActionAccepted {
    /// Rejects actions the state machine has no transition for.
    #[instrument(skip(state))]
    pub fn check(action: &TurnAction, state: &TurnState) -> Result<(), ActionError> {
        if state.accepts(action) {
            Ok(())
        } else {
            warn!(%action, state = state.label(), "Illegal action");
            Err(ActionError::IllegalAction {
                action: action.clone(),
                state: state.label(),
            })
        }
    }
}

/// Precondition: the letter has not been called this round.
pub struct LetterIsFresh;

impl LetterIsFresh {
    /// Rejects repeats without consuming the turn.
    #[instrument(skip(board))]
    pub fn check(letter: Letter, board: &BoardState) -> Result<(), ActionError> {
        if board.is_guessed(letter) {
            Err(ActionError::AlreadyGuessed(letter))
        } else {
            Ok(())
        }
    }
}

/// Precondition: the letter belongs to the class the prompt asked for.
pub struct LetterMatchesPrompt;

impl LetterMatchesPrompt {
    /// A mismatch is invalid input and costs the turn.
    #[instrument]
    pub fn check(letter: Letter, expected: LetterClass) -> Result<(), InvalidInput> {
        if letter.class() == expected {
            Ok(())
        } else {
            Err(InvalidInput::WrongClass { letter, expected })
        }
    }
}

/// Precondition: the round pot covers a vowel.
pub struct VowelAffordable;

impl VowelAffordable {
    /// Rejects the purchase without touching the pot.
    #[instrument(skip(player), fields(player = %player.id(), pot = player.round_pot()))]
    pub fn check(player: &Player, cost: u32) -> Result<(), ActionError> {
        if player.round_pot() >= cost {
            Ok(())
        } else {
            warn!(cost, "Vowel not affordable");
            Err(ActionError::InsufficientFunds {
                pot: player.round_pot(),
                cost,
            })
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Postconditions
// ─────────────────────────────────────────────────────────────

/// Postcondition: banked totals never go down during a match.
pub struct TotalsMonotonic;

impl TotalsMonotonic {
    /// Compares totals captured before an action against the match after it.
    #[instrument(skip_all)]
    pub fn holds(before: &[u32], after: &Match) -> bool {
        let valid = before.len() == after.players().len()
            && before
                .iter()
                .zip(after.players())
                .all(|(old, player)| player.total_score() >= *old);
        if !valid {
            warn!(?before, "Total score decreased");
        }
        valid
    }
}

/// Verifies every postcondition after an engine action.
#[instrument(skip_all)]
pub fn check_postconditions(
    totals_before: &[u32],
    session: &Match,
    round: &Round,
) -> Result<(), ActionError> {
    let mut problems = Vec::new();
    if !TotalsMonotonic::holds(totals_before, session) {
        problems.push("Total scores are monotonically non-decreasing".to_string());
    }
    if let Err(violations) = MatchInvariants::check_all(session) {
        problems.extend(violations.into_iter().map(|v| v.description));
    }
    if let Err(violations) = RoundInvariants::check_all(round) {
        problems.extend(violations.into_iter().map(|v| v.description));
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(ActionError::InvariantViolation(format!(
            "Postcondition failed: {}",
            problems.join("; ")
        )))
    }
}
