//! First-class turn actions, their events and their errors.
//!
//! Actions are what a player asks for; events are what the turn state
//! machine decided. Rejections that leave the state untouched are
//! [`ActionError`]s, while misses are ordinary events that end the turn.

use crate::error::ConfigError;
use crate::types::{Letter, LetterClass};
use crate::wheel::{Hazard, Outcome};
use serde::{Deserialize, Serialize};

/// Something the active player (or the caller's clock) asks the engine to do.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum TurnAction {
    /// Spin the wheel.
    #[display("spin")]
    Spin,
    /// Buy a vowel.
    #[display("buy vowel")]
    BuyVowel,
    /// Call a letter at the open prompt.
    #[display("guess {:?}", _0)]
    GuessLetter(String),
    /// Attempt the whole phrase.
    #[display("solve {:?}", _0)]
    Solve(String),
    /// Give the turn away.
    #[display("pass")]
    Pass,
    /// Answer the jolly offer after a hazard.
    #[display("use jolly: {}", _0)]
    UseJolly(bool),
    /// The caller's turn timer ran out.
    #[display("timeout")]
    Timeout,
}

/// Why a letter or solve submission could not be evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum InvalidInput {
    /// Nothing was typed.
    #[display("no letter given")]
    Empty,
    /// More than one character was typed.
    #[display("{:?} is not a single letter", _0)]
    NotSingleLetter(String),
    /// The character is not a letter.
    #[display("{:?} is not a letter", _0)]
    NotAlphabetic(char),
    /// A vowel at a consonant prompt or the other way around.
    #[display("{} is not a {}", letter, expected)]
    WrongClass {
        /// Letter submitted.
        letter: Letter,
        /// Class the prompt asked for.
        expected: LetterClass,
    },
    /// The solve attempt was blank.
    #[display("empty solution")]
    EmptySolution,
}

/// What the turn state machine did with an accepted action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnEvent {
    /// Cash or token drawn; a consonant prompt is open.
    Spun(Outcome),
    /// A hazard was drawn and the player may spend a jolly on it.
    JollyOffered(Hazard),
    /// A jolly absorbed the hazard; the player keeps the turn.
    JollyUsed(Hazard),
    /// The round pot was forfeited and the turn ended.
    Bankrupt {
        /// Pot lost.
        forfeited: u32,
    },
    /// A `PASS` wedge ended the turn.
    LostTurn,
    /// A vowel was paid for; a vowel prompt is open.
    VowelBought {
        /// Amount deducted.
        cost: u32,
    },
    /// The letter is in the phrase.
    LetterHit {
        /// Letter revealed.
        letter: Letter,
        /// Occurrences revealed.
        occurrences: usize,
        /// Amount added to the round pot.
        credited: u32,
    },
    /// The letter is not in the phrase; turn over.
    LetterMiss(Letter),
    /// Malformed or wrong-class submission; turn over.
    InvalidInput(InvalidInput),
    /// The phrase was solved; round over.
    Solved,
    /// Wrong solution; turn over.
    WrongSolution,
    /// Voluntary pass; turn over.
    Passed,
    /// The turn timer ran out; turn over.
    TimedOut,
}

impl TurnEvent {
    /// Returns true if this event hands the turn to the next player.
    pub fn ends_turn(&self) -> bool {
        matches!(
            self,
            TurnEvent::Bankrupt { .. }
                | TurnEvent::LostTurn
                | TurnEvent::LetterMiss(_)
                | TurnEvent::InvalidInput(_)
                | TurnEvent::WrongSolution
                | TurnEvent::Passed
                | TurnEvent::TimedOut
        )
    }
}

/// An action the engine refused. State is unchanged.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum ActionError {
    /// The current turn state does not accept this action.
    #[display("cannot {} while {}", action, state)]
    IllegalAction {
        /// Action attempted.
        #[error(not(source))]
        action: TurnAction,
        /// State label at the time.
        state: &'static str,
    },

    /// The pot cannot cover a vowel.
    #[display("vowel costs {} but the pot holds {}", cost, pot)]
    InsufficientFunds {
        /// Current round pot.
        pot: u32,
        /// Vowel price.
        cost: u32,
    },

    /// The letter was already called this round.
    #[display("{} was already called", _0)]
    AlreadyGuessed(#[error(not(source))] Letter),

    /// Final standings have been issued.
    #[display("the match is over")]
    MatchOver,

    /// Starting the next round failed on bad configuration.
    #[display("{}", _0)]
    #[from]
    Configuration(ConfigError),

    /// A round failed to load earlier; the match must be restarted.
    #[display("play is halted after a configuration error, restart the match")]
    Halted,

    /// A postcondition failed after the action.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(#[error(not(source))] String),
}
