//! Configuration error types.
//!
//! Every fatal setup problem (bad prize table, unusable phrase, empty
//! repository, out-of-range settings) surfaces as a [`ConfigError`] before any
//! player action is accepted.

use derive_more::{Display, Error};
use tracing::instrument;

/// What exactly is wrong with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ConfigErrorKind {
    /// The prize table has no entries.
    #[display("prize table is empty")]
    EmptyPrizeTable,

    /// The prize table has entries but none of them pays cash.
    #[display("prize table has no cash entry")]
    NoCashEntry,

    /// The table holds free-spin tokens but no replacement values exist.
    #[display("free-spin tokens need at least one replacement value")]
    MissingJollyReplacements,

    /// Replacement values must be positive and strictly increasing.
    #[display("jolly replacements must be positive and increasing: {:?}", _0)]
    JollyReplacementOrder(Vec<u32>),

    /// A phrase has no alphabetic character.
    #[display("phrase {:?} has no letters", _0)]
    PhraseWithoutLetters(String),

    /// The phrase repository offered no category.
    #[display("phrase repository has no categories")]
    NoCategories,

    /// A category yielded no phrase.
    #[display("category {:?} has no phrases", _0)]
    EmptyCategory(String),

    /// A match needs at least one player.
    #[display("a match needs at least one player")]
    NoPlayers,

    /// Round count outside the supported range.
    #[display("round count {} is outside 1..=10", _0)]
    RoundCount(u32),

    /// Turn timer outside the supported range.
    #[display("turn timer of {}s is outside 3..=60", _0)]
    TurnSeconds(u64),

    /// The configuration file could not be read.
    #[display("failed to read config: {}", _0)]
    Read(String),

    /// The configuration file is not valid TOML for this schema.
    #[display("failed to parse config: {}", _0)]
    Parse(String),
}

/// Invalid configuration with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Invalid configuration: {} at {}:{}", kind, file, line)]
pub struct ConfigError {
    /// The specific problem.
    pub kind: ConfigErrorKind,
    /// Line number where the error was raised.
    pub line: u32,
    /// Source file where the error was raised.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns the specific problem.
    pub fn kind(&self) -> &ConfigErrorKind {
        &self.kind
    }
}

impl From<ConfigErrorKind> for ConfigError {
    #[track_caller]
    fn from(kind: ConfigErrorKind) -> Self {
        Self::new(kind)
    }
}

impl From<toml::de::Error> for ConfigError {
    #[track_caller]
    fn from(err: toml::de::Error) -> Self {
        Self::new(ConfigErrorKind::Parse(err.to_string()))
    }
}

impl From<std::io::Error> for ConfigError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(ConfigErrorKind::Read(err.to_string()))
    }
}
