//! Wheel prizes, the round-scoped prize table and spin resolution.

use crate::error::{ConfigError, ConfigErrorKind};
use derive_getters::Getters;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{debug, info, instrument};

/// One wedge of the wheel, and the result of a spin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "WedgeRepr", into = "WedgeRepr")]
pub enum Outcome {
    /// Pays the amount for every occurrence of the called consonant.
    Cash(u32),
    /// Forfeits the round pot and ends the turn.
    Bankrupt,
    /// Ends the turn.
    Pass,
    /// Grants a jolly and opens a consonant prompt worth the token value.
    FreeSpinToken,
}

impl Outcome {
    /// Returns true for cash wedges.
    pub fn is_cash(self) -> bool {
        matches!(self, Outcome::Cash(_))
    }

    /// Returns the hazard this outcome represents, if any.
    pub fn hazard(self) -> Option<Hazard> {
        match self {
            Outcome::Bankrupt => Some(Hazard::Bankrupt),
            Outcome::Pass => Some(Hazard::Pass),
            Outcome::Cash(_) | Outcome::FreeSpinToken => None,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Cash(amount) => write!(f, "{}", amount),
            Outcome::Bankrupt => write!(f, "{}", Symbol::Bankrupt),
            Outcome::Pass => write!(f, "{}", Symbol::Pass),
            Outcome::FreeSpinToken => write!(f, "{}", Symbol::FreeSpinToken),
        }
    }
}

/// A spin result that ends the turn unless a jolly absorbs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Hazard {
    /// Pot forfeited.
    #[strum(to_string = "BANKRUPT")]
    Bankrupt,
    /// Turn lost.
    #[strum(to_string = "PASS")]
    Pass,
}

/// Symbolic wedge labels as written in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::Display)]
#[strum(ascii_case_insensitive)]
enum Symbol {
    #[strum(to_string = "BANKRUPT")]
    Bankrupt,
    #[strum(to_string = "PASS")]
    Pass,
    #[strum(to_string = "FREE_SPIN_TOKEN", serialize = "JOLLY")]
    FreeSpinToken,
}

/// Wire form of a wedge: a bare integer or a symbolic label.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum WedgeRepr {
    Cash(u32),
    Label(String),
}

impl TryFrom<WedgeRepr> for Outcome {
    type Error = String;

    fn try_from(repr: WedgeRepr) -> Result<Self, Self::Error> {
        match repr {
            WedgeRepr::Cash(0) => Err("cash wedges must be positive".to_string()),
            WedgeRepr::Cash(amount) => Ok(Outcome::Cash(amount)),
            WedgeRepr::Label(label) => match Symbol::from_str(label.trim()) {
                Ok(Symbol::Bankrupt) => Ok(Outcome::Bankrupt),
                Ok(Symbol::Pass) => Ok(Outcome::Pass),
                Ok(Symbol::FreeSpinToken) => Ok(Outcome::FreeSpinToken),
                Err(_) => Err(format!("unknown wedge {:?}", label)),
            },
        }
    }
}

impl From<Outcome> for WedgeRepr {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Cash(amount) => WedgeRepr::Cash(amount),
            other => WedgeRepr::Label(other.to_string()),
        }
    }
}

/// Base wheel configuration. Never mutated during play.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct WheelConfig {
    /// Wedges; duplicates weight the draw.
    #[serde(default = "default_prizes")]
    prizes: Vec<Outcome>,

    /// Cash values that replace drawn tokens, in draw order.
    #[serde(default = "default_jolly_replacements")]
    jolly_replacements: Vec<u32>,
}

fn default_prizes() -> Vec<Outcome> {
    use Outcome::*;
    vec![
        Cash(100),
        Cash(300),
        Cash(500),
        Cash(1000),
        Bankrupt,
        Pass,
        Cash(200),
        Cash(400),
        Cash(800),
        Cash(150),
        Cash(250),
        Cash(600),
        FreeSpinToken,
        FreeSpinToken,
    ]
}

fn default_jolly_replacements() -> Vec<u32> {
    vec![300, 600]
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            prizes: default_prizes(),
            jolly_replacements: default_jolly_replacements(),
        }
    }
}

impl WheelConfig {
    /// Creates a wheel configuration.
    #[instrument]
    pub fn new(prizes: Vec<Outcome>, jolly_replacements: Vec<u32>) -> Self {
        Self {
            prizes,
            jolly_replacements,
        }
    }

    /// Checks that a round built from this configuration can always resolve
    /// a spin to a playable value.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.prizes.is_empty() {
            return Err(ConfigErrorKind::EmptyPrizeTable.into());
        }
        if !self.prizes.iter().any(|p| p.is_cash()) {
            return Err(ConfigErrorKind::NoCashEntry.into());
        }
        if self.prizes.contains(&Outcome::FreeSpinToken) && self.jolly_replacements.is_empty() {
            return Err(ConfigErrorKind::MissingJollyReplacements.into());
        }
        let increasing = self.jolly_replacements.windows(2).all(|w| w[0] < w[1]);
        if !increasing || self.jolly_replacements.contains(&0) {
            return Err(
                ConfigErrorKind::JollyReplacementOrder(self.jolly_replacements.clone()).into(),
            );
        }
        Ok(())
    }
}

/// The live prize table of one round.
///
/// A fresh copy of the base [`WheelConfig`] is taken every round, so drawing
/// tokens never leaks into later rounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrizeTable {
    pub(crate) entries: Vec<Outcome>,
    replacements: Vec<u32>,
    tokens_drawn: usize,
}

impl PrizeTable {
    /// Copies the base configuration for a new round.
    #[instrument(skip(config), fields(wedges = config.prizes.len()))]
    pub fn for_round(config: &WheelConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            entries: config.prizes.clone(),
            replacements: config.jolly_replacements.clone(),
            tokens_drawn: 0,
        })
    }

    /// Returns the live wedges.
    pub fn entries(&self) -> &[Outcome] {
        &self.entries
    }

    /// Number of tokens drawn so far this round.
    pub fn tokens_drawn(&self) -> usize {
        self.tokens_drawn
    }

    /// Returns true if at least one cash wedge remains.
    pub fn has_cash(&self) -> bool {
        self.entries.iter().any(|e| e.is_cash())
    }

    /// Swaps the token at `index` for its replacement cash wedge.
    fn consume_token(&mut self, index: usize) -> Option<u32> {
        let value = self
            .replacements
            .get(self.tokens_drawn)
            .or(self.replacements.last())
            .copied()?;
        self.entries[index] = Outcome::Cash(value);
        self.tokens_drawn += 1;
        Some(value)
    }
}

/// Turns a spin into one outcome.
#[derive(Debug, Clone, Copy, Default)]
pub struct WheelResolver;

impl WheelResolver {
    /// Draws one wedge uniformly from the live table.
    ///
    /// A drawn token is replaced in the table by its configured cash value for
    /// the rest of the round.
    #[instrument(skip(table, rng), fields(wedges = table.entries.len()))]
    pub fn spin<R: Rng + ?Sized>(table: &mut PrizeTable, rng: &mut R) -> Outcome {
        let index = rng.random_range(0..table.entries.len());
        let outcome = table.entries[index];
        debug!(index, %outcome, "Wheel stopped");

        if outcome == Outcome::FreeSpinToken {
            if let Some(value) = table.consume_token(index) {
                info!(index, value, "Token replaced with cash wedge");
            }
        }
        outcome
    }
}
