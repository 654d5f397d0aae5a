//! Game configuration loaded from TOML.

use crate::board::BoardState;
use crate::error::{ConfigError, ConfigErrorKind};
use crate::ledger::DEFAULT_VOWEL_COST;
use crate::phrase::PhraseBook;
use crate::turn::{FREE_SPIN_LETTER_VALUE, TurnRules};
use crate::wheel::WheelConfig;
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Supported number of rounds per match.
pub const ROUND_RANGE: RangeInclusive<u32> = 1..=10;

/// Supported turn timer, in seconds.
pub const TURN_SECONDS_RANGE: RangeInclusive<u64> = 3..=60;

/// Everything a match needs before the first spin.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Rounds per match.
    #[serde(default = "default_total_rounds")]
    total_rounds: u32,

    /// Price of one vowel.
    #[serde(default = "default_vowel_cost")]
    vowel_cost: u32,

    /// Flat bonus added to the pot of a player who solves the phrase.
    #[serde(default = "default_solve_bonus")]
    solve_bonus: u32,

    /// Seconds a player has to act.
    #[serde(default = "default_turn_seconds")]
    turn_seconds: u64,

    /// Whether turns are timed at all.
    #[serde(default = "default_timer")]
    timer: bool,

    /// Base prize table.
    #[serde(default)]
    wheel: WheelConfig,

    /// Category name to phrases.
    #[serde(default = "default_phrases")]
    phrases: BTreeMap<String, Vec<String>>,
}

#[instrument]
fn default_total_rounds() -> u32 {
    3
}

#[instrument]
fn default_vowel_cost() -> u32 {
    DEFAULT_VOWEL_COST
}

#[instrument]
fn default_solve_bonus() -> u32 {
    2000
}

#[instrument]
fn default_turn_seconds() -> u64 {
    7
}

#[instrument]
fn default_timer() -> bool {
    true
}

fn default_phrases() -> BTreeMap<String, Vec<String>> {
    let entries: [(&str, &[&str]); 4] = [
        (
            "PROVERBS",
            &[
                "A STITCH IN TIME SAVES NINE",
                "ACTIONS SPEAK LOUDER THAN WORDS",
                "THE EARLY BIRD CATCHES THE WORM",
                "WHEN IN ROME DO AS THE ROMANS DO",
            ],
        ),
        (
            "FOOD AND DRINK",
            &[
                "SPAGHETTI WITH MEATBALLS",
                "FRESHLY SQUEEZED ORANGE JUICE",
                "PEANUT BUTTER AND JELLY",
            ],
        ),
        (
            "PLACES",
            &[
                "THE LEANING TOWER OF PISA",
                "THE GRAND CANYON",
                "NIAGARA FALLS",
            ],
        ),
        (
            "THINGS",
            &["A PAIR OF SCISSORS", "ALARM CLOCK", "GARDEN HOSE"],
        ),
    ];
    entries
        .into_iter()
        .map(|(category, phrases)| {
            (
                category.to_string(),
                phrases.iter().map(|p| p.to_string()).collect(),
            )
        })
        .collect()
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            total_rounds: default_total_rounds(),
            vowel_cost: default_vowel_cost(),
            solve_bonus: default_solve_bonus(),
            turn_seconds: default_turn_seconds(),
            timer: default_timer(),
            wheel: WheelConfig::default(),
            phrases: default_phrases(),
        }
    }
}

impl GameConfig {
    /// Loads and validates configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&content)?;
        info!(
            rounds = config.total_rounds,
            categories = config.phrases.len(),
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    #[instrument(skip(content), fields(bytes = content.len()))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Overrides the number of rounds.
    #[instrument(skip(self))]
    pub fn with_total_rounds(mut self, total_rounds: u32) -> Self {
        self.total_rounds = total_rounds;
        self
    }

    /// Switches the turn timer on or off.
    #[instrument(skip(self))]
    pub fn with_timer(mut self, enabled: bool) -> Self {
        self.timer = enabled;
        self
    }

    /// Checks ranges, the wheel and every phrase.
    ///
    /// # Errors
    ///
    /// The first problem found, as a [`ConfigError`].
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !ROUND_RANGE.contains(&self.total_rounds) {
            return Err(ConfigErrorKind::RoundCount(self.total_rounds).into());
        }
        if !TURN_SECONDS_RANGE.contains(&self.turn_seconds) {
            return Err(ConfigErrorKind::TurnSeconds(self.turn_seconds).into());
        }
        self.wheel.validate()?;

        if self.phrases.is_empty() {
            return Err(ConfigErrorKind::NoCategories.into());
        }
        for (category, phrases) in &self.phrases {
            if phrases.is_empty() {
                return Err(ConfigErrorKind::EmptyCategory(category.clone()).into());
            }
            for phrase in phrases {
                BoardState::new(phrase)?;
            }
        }
        Ok(())
    }

    /// Rules the engine plays by.
    #[instrument(skip(self))]
    pub fn rules(&self) -> GameRules {
        let limit = self
            .timer
            .then(|| Duration::from_secs(self.turn_seconds));
        GameRules::new(self.vowel_cost, self.solve_bonus, limit, self.wheel.clone())
    }

    /// Builds the phrase book, seeded when `seed` is given.
    #[instrument(skip(self))]
    pub fn phrase_book(&self, seed: Option<u64>) -> PhraseBook {
        match seed {
            Some(seed) => PhraseBook::with_seed(self.phrases.clone(), seed),
            None => PhraseBook::new(self.phrases.clone()),
        }
    }
}

/// Scoring and timing rules for one match.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct GameRules {
    /// Price of one vowel.
    vowel_cost: u32,
    /// Bonus paid on a successful solve.
    solve_bonus: u32,
    /// Time a player has to act, if turns are timed.
    turn_time_limit: Option<Duration>,
    /// Base prize table copied into every round.
    wheel: WheelConfig,
    /// Letter value after drawing a free-spin token.
    #[new(value = "FREE_SPIN_LETTER_VALUE")]
    token_letter_value: u32,
}

impl GameRules {
    /// Per-turn subset of the rules.
    pub fn turn_rules(&self) -> TurnRules {
        TurnRules {
            vowel_cost: self.vowel_cost,
            token_letter_value: self.token_letter_value,
        }
    }

    /// Same rules with a different solve bonus.
    pub fn with_solve_bonus(mut self, solve_bonus: u32) -> Self {
        self.solve_bonus = solve_bonus;
        self
    }

    /// Same rules with a different turn time limit.
    pub fn with_turn_time_limit(mut self, limit: Option<Duration>) -> Self {
        self.turn_time_limit = limit;
        self
    }
}

impl Default for GameRules {
    fn default() -> Self {
        GameConfig::default().rules()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wheel::Outcome;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(*config.total_rounds(), 3);
        assert_eq!(*config.vowel_cost(), 500);
        assert_eq!(*config.solve_bonus(), 2000);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = GameConfig::from_toml_str("").unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let config = GameConfig::from_toml_str(
            r#"
            total_rounds = 1
            timer = false

            [wheel]
            prizes = [250, "BANKRUPT", "jolly"]
            jolly_replacements = [300]

            [phrases]
            animals = ["cat", "dog"]
            "#,
        )
        .unwrap();
        assert_eq!(*config.total_rounds(), 1);
        assert_eq!(
            config.wheel().prizes(),
            &vec![Outcome::Cash(250), Outcome::Bankrupt, Outcome::FreeSpinToken]
        );
        assert_eq!(config.rules().turn_time_limit(), &None);
    }

    #[test]
    fn test_timer_limit() {
        let rules = GameConfig::default().rules();
        assert_eq!(rules.turn_time_limit(), &Some(Duration::from_secs(7)));
        assert_eq!(*rules.token_letter_value(), FREE_SPIN_LETTER_VALUE);
    }

    #[test]
    fn test_out_of_range_rounds() {
        let err = GameConfig::default()
            .with_total_rounds(11)
            .validate()
            .unwrap_err();
        assert_eq!(err.kind(), &ConfigErrorKind::RoundCount(11));
    }

    #[test]
    fn test_turn_seconds_range() {
        let err = GameConfig::from_toml_str("turn_seconds = 2").unwrap_err();
        assert_eq!(err.kind(), &ConfigErrorKind::TurnSeconds(2));
    }

    #[test]
    fn test_bad_phrase_rejected() {
        let err = GameConfig::from_toml_str("[phrases]\nnumbers = [\"123\"]").unwrap_err();
        assert!(matches!(err.kind(), ConfigErrorKind::PhraseWithoutLetters(_)));
    }

    #[test]
    fn test_malformed_toml() {
        let err = GameConfig::from_toml_str("total_rounds = \"three\"").unwrap_err();
        assert!(matches!(err.kind(), ConfigErrorKind::Parse(_)));
    }
}
