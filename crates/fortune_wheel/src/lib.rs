//! Fortune Wheel - a turn-based wheel-of-fortune game engine
//!
//! Players take turns spinning a prize wheel, calling consonants, buying
//! vowels and solving a hidden phrase over a fixed number of rounds.
//!
//! # Architecture
//!
//! - **BoardState**: the phrase and which letters are showing
//! - **WheelResolver**: turns a spin into an [`Outcome`] from the round's prize table
//! - **ScoreLedger**: round pots, banked totals and jolly tokens
//! - **TurnController**: the state machine for one player's turn
//! - **GameEngine**: owns the match and is the sole entry point for callers
//!
//! The engine performs no I/O. Randomness is injected, so a seeded
//! [`rand::rngs::StdRng`] replays a match exactly.
//!
//! # Example
//!
//! ```no_run
//! use fortune_wheel::{GameConfig, GameEngine};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GameConfig::default();
//! let mut game = GameEngine::start_match(
//!     config.rules(),
//!     config.phrase_book(Some(7)),
//!     StdRng::seed_from_u64(7),
//!     &["ada", "grace"],
//!     *config.total_rounds(),
//! )?;
//!
//! let report = game.spin()?;
//! println!("{} | {:?}", report.board(), report.event());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod board;
mod config;
mod contracts;
mod engine;
mod error;
mod invariants;
mod ledger;
mod phrase;
mod report;
mod session;
mod turn;
mod types;
mod wheel;

// Crate-level exports - Engine
pub use engine::GameEngine;

// Crate-level exports - Actions and outcomes
pub use action::{ActionError, InvalidInput, TurnAction, TurnEvent};
pub use report::{ActionReport, RoundSummary, Standing, rank_players};
pub use turn::{FREE_SPIN_LETTER_VALUE, TurnController, TurnRules, TurnState};

// Crate-level exports - Board, wheel and scoring
pub use board::{BoardState, PLACEHOLDER, normalize_phrase};
pub use ledger::{DEFAULT_VOWEL_COST, ScoreLedger};
pub use wheel::{Hazard, Outcome, PrizeTable, WheelConfig, WheelResolver};

// Crate-level exports - Match state
pub use session::{Match, Round};
pub use types::{Letter, LetterClass, Player, PlayerId};

// Crate-level exports - Phrases
pub use phrase::{PhraseBook, PhraseRepository};

// Crate-level exports - Configuration and errors
pub use config::{GameConfig, GameRules, ROUND_RANGE, TURN_SECONDS_RANGE};
pub use error::{ConfigError, ConfigErrorKind};

// Crate-level exports - Contracts and invariants
pub use contracts::{
    ActionAccepted, LetterIsFresh, LetterMatchesPrompt, TotalsMonotonic, VowelAffordable,
    check_postconditions,
};
pub use invariants::{
    ActiveSeatInBounds, Invariant, InvariantSet, InvariantViolation, MaskedBoardConsistent,
    MatchInvariants, PlayableWheel, RoundInvariants, RoundWithinMatch,
};
