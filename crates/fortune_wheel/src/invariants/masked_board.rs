//! Masked board invariant: what players see agrees with what was called.

use super::Invariant;
use crate::board::PLACEHOLDER;
use crate::session::Round;
use crate::types::Letter;

/// Invariant: the masked phrase hides exactly the uncalled letters.
///
/// Every position keeps its place, spaces and punctuation always show,
/// and the number of placeholders equals the hidden letter count.
pub struct MaskedBoardConsistent;

impl Invariant<Round> for MaskedBoardConsistent {
    fn holds(round: &Round) -> bool {
        let board = round.board();
        let masked: Vec<char> = board.masked_display().chars().collect();
        let phrase: Vec<char> = board.phrase().chars().collect();

        if masked.len() != phrase.len() {
            return false;
        }

        let positions_agree = phrase.iter().zip(&masked).all(|(&shown, &seen)| {
            match Letter::from_char(shown) {
                Some(letter) if board.is_guessed(letter) => seen == shown,
                Some(_) => seen == PLACEHOLDER,
                None => seen == shown,
            }
        });

        let placeholders = masked.iter().filter(|c| **c == PLACEHOLDER).count();
        positions_agree && placeholders == board.hidden_count()
    }

    fn description() -> &'static str {
        "Masked board hides exactly the uncalled letters"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wheel::WheelConfig;

    fn round(phrase: &str) -> Round {
        Round::new(1, "TEST".into(), phrase, &WheelConfig::default()).unwrap()
    }

    #[test]
    fn test_fresh_and_partial_boards_hold() {
        let mut round = round("HELLO, WORLD");
        assert!(MaskedBoardConsistent::holds(&round));
        round.board.reveal(Letter::from_char('L').unwrap()).unwrap();
        assert!(MaskedBoardConsistent::holds(&round));
        round.board.reveal_all();
        assert!(MaskedBoardConsistent::holds(&round));
    }

    #[test]
    fn test_placeholder_in_phrase_violates() {
        let mut round = round("CAT");
        // A literal placeholder in the phrase breaks the count.
        round.board.phrase = "CA_T".into();
        assert!(!MaskedBoardConsistent::holds(&round));
    }
}
