//! The secret phrase and which of its letters are showing.

use crate::action::ActionError;
use crate::error::{ConfigError, ConfigErrorKind};
use crate::types::Letter;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, instrument};

/// Glyph shown in place of a hidden letter.
pub const PLACEHOLDER: char = '_';

/// Trims, collapses whitespace runs to one space and upper-cases.
pub fn normalize_phrase(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// Board for one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    pub(crate) phrase: String,
    pub(crate) guessed: BTreeSet<Letter>,
}

impl BoardState {
    /// Creates a board with every letter hidden.
    ///
    /// # Errors
    ///
    /// Returns `PhraseWithoutLetters` if the normalized phrase has no
    /// alphabetic character.
    #[instrument(skip(raw))]
    pub fn new(raw: &str) -> Result<Self, ConfigError> {
        let phrase = normalize_phrase(raw);
        if !phrase.chars().any(|c| Letter::from_char(c).is_some()) {
            return Err(ConfigErrorKind::PhraseWithoutLetters(raw.to_string()).into());
        }
        Ok(Self {
            phrase,
            guessed: BTreeSet::new(),
        })
    }

    /// Returns the normalized phrase.
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// Letters called so far, hits and misses alike.
    pub fn guessed(&self) -> &BTreeSet<Letter> {
        &self.guessed
    }

    /// Returns true if the letter has been called.
    pub fn is_guessed(&self, letter: Letter) -> bool {
        self.guessed.contains(&letter)
    }

    /// Counts occurrences of a letter in the phrase.
    pub fn occurrences(&self, letter: Letter) -> usize {
        self.phrase
            .chars()
            .filter(|c| *c == letter.as_char())
            .count()
    }

    /// Marks a letter as called and returns how many times it appears.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyGuessed` without touching the board if the letter was
    /// called before.
    #[instrument(skip(self), fields(letter = %letter))]
    pub fn reveal(&mut self, letter: Letter) -> Result<usize, ActionError> {
        if !self.guessed.insert(letter) {
            return Err(ActionError::AlreadyGuessed(letter));
        }
        let count = self.occurrences(letter);
        debug!(count, "Letter revealed");
        Ok(count)
    }

    /// Shows every letter at once.
    #[instrument(skip(self))]
    pub fn reveal_all(&mut self) {
        let letters: Vec<Letter> = self.phrase.chars().filter_map(Letter::from_char).collect();
        self.guessed.extend(letters);
    }

    /// Number of letter positions still hidden.
    pub fn hidden_count(&self) -> usize {
        self.phrase
            .chars()
            .filter_map(Letter::from_char)
            .filter(|l| !self.guessed.contains(l))
            .count()
    }

    /// Returns true once every letter of the phrase is showing.
    pub fn is_complete(&self) -> bool {
        self.hidden_count() == 0
    }

    /// Phrase with hidden letters replaced by [`PLACEHOLDER`].
    pub fn masked_display(&self) -> String {
        self.phrase
            .chars()
            .map(|c| match Letter::from_char(c) {
                Some(letter) if !self.guessed.contains(&letter) => PLACEHOLDER,
                _ => c,
            })
            .collect()
    }

    /// Compares a solve attempt against the phrase, ignoring case and
    /// whitespace differences.
    #[instrument(skip(self, candidate))]
    pub fn solve_attempt(&self, candidate: &str) -> bool {
        normalize_phrase(candidate) == self.phrase
    }
}


#[cfg(test)]
mod props {
    use super::*;
    use crate::invariants::{Invariant, MaskedBoardConsistent};
    use crate::session::Round;
    use crate::wheel::WheelConfig;
    use proptest::prelude::*;

    /// Raise locally with `PROPTEST_CASES=1000`.
    fn proptest_config() -> ProptestConfig {
        let cases = std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(64);
        ProptestConfig {
            cases,
            ..ProptestConfig::default()
        }
    }

    fn phrase() -> impl Strategy<Value = String> {
        "[a-zA-Z][a-zA-Z ,.'!?-]{0,24}"
    }

    fn calls() -> impl Strategy<Value = Vec<char>> {
        prop::collection::vec(proptest::char::range('A', 'Z'), 0..60)
    }

    fn letter(c: char) -> Letter {
        Letter::from_char(c).unwrap()
    }

    /// Mask computed straight from the phrase and the called letters.
    fn oracle_mask(phrase: &str, called: &BTreeSet<char>) -> String {
        phrase
            .chars()
            .map(|c| {
                if c.is_ascii_alphabetic() && !called.contains(&c) {
                    PLACEHOLDER
                } else {
                    c
                }
            })
            .collect()
    }

    proptest! {
        #![proptest_config(proptest_config())]

        #[test]
        fn prop_mask_never_leaks(raw in phrase(), letters in calls()) {
            let mut round = Round::new(1, "TEST".to_string(), &raw, &WheelConfig::default()).unwrap();
            let mut called = BTreeSet::new();
            prop_assert!(MaskedBoardConsistent::holds(&round));

            for c in letters {
                let first = called.insert(c);
                let result = round.board.reveal(letter(c));
                prop_assert_eq!(result.is_ok(), first, "only a first call reveals {}", c);
                prop_assert!(MaskedBoardConsistent::holds(&round));
                prop_assert_eq!(
                    round.board().masked_display(),
                    oracle_mask(round.board().phrase(), &called)
                );
            }
        }

        #[test]
        fn prop_completion_is_monotone(raw in phrase(), letters in calls()) {
            let mut board = BoardState::new(&raw).unwrap();
            prop_assert!(!board.is_complete());
            let mut was_complete = false;
            let mut flips = 0;

            for c in &letters {
                let hidden_before = board.hidden_count();
                let revealed = board.reveal(letter(*c)).unwrap_or(0);
                prop_assert_eq!(board.hidden_count(), hidden_before - revealed);

                let complete = board.is_complete();
                prop_assert!(!was_complete || complete, "board hid letters again after {}", c);
                if complete && !was_complete {
                    flips += 1;
                }
                was_complete = complete;
            }

            prop_assert!(flips <= 1);
            let needed: BTreeSet<char> = board.phrase().chars().filter(char::is_ascii_alphabetic).collect();
            let called: BTreeSet<char> = letters.iter().copied().collect();
            prop_assert_eq!(board.is_complete(), needed.is_subset(&called));
        }

        #[test]
        fn prop_full_alphabet_completes_exactly_once(
            raw in phrase(),
            alphabet in Just(('A'..='Z').collect::<Vec<char>>()).prop_shuffle(),
        ) {
            let mut board = BoardState::new(&raw).unwrap();
            let mut flips = 0;
            for c in alphabet {
                let was_complete = board.is_complete();
                prop_assert!(board.reveal(letter(c)).is_ok());
                if board.is_complete() && !was_complete {
                    flips += 1;
                }
            }
            prop_assert_eq!(flips, 1);
            prop_assert_eq!(board.masked_display(), board.phrase());
        }
    }
}
