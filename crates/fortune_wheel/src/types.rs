//! Core domain types: letters, players and seat identifiers.

use crate::action::InvalidInput;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Vowels a player must buy instead of calling after a spin.
const VOWELS: &[char] = &['A', 'E', 'I', 'O', 'U', 'À', 'È', 'É', 'Ì', 'Ò', 'Ù'];

/// Whether a letter is called after a spin or bought.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum LetterClass {
    /// Called after a spin; pays the wheel value per occurrence.
    Consonant,
    /// Bought at a flat cost; never pays wheel value.
    Vowel,
}

/// A single upper-case alphabetic character.
///
/// Construction is the only place input is validated, so every `Letter`
/// in the engine is guaranteed guessable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Letter(char);

impl Letter {
    /// Builds a letter from a character, upper-casing it.
    ///
    /// Returns `None` for non-alphabetic characters and for characters whose
    /// upper-case form is more than one character.
    pub fn from_char(c: char) -> Option<Self> {
        if !c.is_alphabetic() {
            return None;
        }
        let mut upper = c.to_uppercase();
        match (upper.next(), upper.next()) {
            (Some(u), None) => Some(Self(u)),
            _ => None,
        }
    }

    /// Parses player input: exactly one alphabetic character, surrounding
    /// whitespace ignored.
    #[instrument]
    pub fn parse(input: &str) -> Result<Self, InvalidInput> {
        let trimmed = input.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Err(InvalidInput::Empty),
            (Some(c), None) => Self::from_char(c).ok_or(InvalidInput::NotAlphabetic(c)),
            (Some(_), Some(_)) => Err(InvalidInput::NotSingleLetter(trimmed.to_string())),
        }
    }

    /// Returns the underlying character.
    pub fn as_char(self) -> char {
        self.0
    }

    /// Returns true for vowels.
    pub fn is_vowel(self) -> bool {
        VOWELS.contains(&self.0)
    }

    /// Returns the class this letter belongs to.
    pub fn class(self) -> LetterClass {
        if self.is_vowel() {
            LetterClass::Vowel
        } else {
            LetterClass::Consonant
        }
    }
}

impl std::fmt::Display for Letter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Seat identifier, assigned 1..=n in registration order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[display("P{}", _0)]
pub struct PlayerId(u32);

impl PlayerId {
    /// Returns the raw seat number.
    pub fn get(self) -> u32 {
        self.0
    }
}

/// A contestant and their money.
///
/// Only [`ScoreLedger`](crate::ScoreLedger) mutates the money fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub(crate) id: PlayerId,
    pub(crate) name: String,
    pub(crate) round_pot: u32,
    pub(crate) total_score: u32,
    pub(crate) jolly_count: u32,
}

impl Player {
    /// Registers a player. Blank names fall back to `PLAYER <seat>`.
    #[instrument(skip(name))]
    pub fn new(id: PlayerId, name: impl AsRef<str>) -> Self {
        let name = name.as_ref().trim().to_uppercase();
        let name = if name.is_empty() {
            format!("PLAYER {}", id.get())
        } else {
            name
        };
        Self {
            id,
            name,
            round_pot: 0,
            total_score: 0,
            jolly_count: 0,
        }
    }

    /// Returns the seat identifier.
    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Winnings in the current round.
    pub fn round_pot(&self) -> u32 {
        self.round_pot
    }

    /// Banked winnings across the match.
    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    /// Unused free-spin tokens.
    pub fn jolly_count(&self) -> u32 {
        self.jolly_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_uppercases_and_trims() {
        assert_eq!(Letter::parse(" c ").unwrap().as_char(), 'C');
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        assert_eq!(Letter::parse(""), Err(InvalidInput::Empty));
        assert_eq!(Letter::parse("7"), Err(InvalidInput::NotAlphabetic('7')));
        assert!(matches!(Letter::parse("AB"), Err(InvalidInput::NotSingleLetter(_))));
    }

    #[test]
    fn test_letter_classes() {
        assert_eq!(Letter::parse("a").unwrap().class(), LetterClass::Vowel);
        assert_eq!(Letter::parse("è").unwrap().class(), LetterClass::Vowel);
        assert_eq!(Letter::parse("t").unwrap().class(), LetterClass::Consonant);
    }

    #[test]
    fn test_blank_name_defaults_to_seat() {
        let player = Player::new(PlayerId::from(2), "   ");
        assert_eq!(player.name(), "PLAYER 2");
        assert_eq!(Player::new(PlayerId::from(1), " ada ").name(), "ADA");
    }
}
