//! Match and round state owned by the engine.

use crate::board::BoardState;
use crate::error::{ConfigError, ConfigErrorKind};
use crate::ledger::ScoreLedger;
use crate::types::{Player, PlayerId};
use crate::wheel::{PrizeTable, WheelConfig};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Players, round counter and whose turn it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    players: Vec<Player>,
    total_rounds: u32,
    pub(crate) current_round: u32,
    pub(crate) active: usize,
}

impl Match {
    /// Creates a match at round 1 with the first player to act.
    ///
    /// # Errors
    ///
    /// `NoPlayers` for an empty roster, `RoundCount` for zero rounds.
    #[instrument(skip(players), fields(players = players.len()))]
    pub fn new(players: Vec<Player>, total_rounds: u32) -> Result<Self, ConfigError> {
        if players.is_empty() {
            return Err(ConfigErrorKind::NoPlayers.into());
        }
        if total_rounds == 0 {
            return Err(ConfigErrorKind::RoundCount(total_rounds).into());
        }
        Ok(Self {
            players,
            total_rounds,
            current_round: 1,
            active: 0,
        })
    }

    /// Registers players by name, assigning seats 1..=n.
    pub fn from_names<S: AsRef<str>>(names: &[S], total_rounds: u32) -> Result<Self, ConfigError> {
        let players = names
            .iter()
            .enumerate()
            .map(|(seat, name)| Player::new(PlayerId::from(seat as u32 + 1), name))
            .collect();
        Self::new(players, total_rounds)
    }

    /// Players in registration order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Number of rounds in the match.
    pub fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    /// Round being played (1-based). Exceeds `total_rounds` once the match ends.
    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    /// Index of the player whose turn it is.
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// The player whose turn it is.
    pub fn active_player(&self) -> &Player {
        &self.players[self.active]
    }

    pub(crate) fn player_mut(&mut self, index: usize) -> &mut Player {
        &mut self.players[index]
    }

    /// Finds a player by seat.
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }

    /// Banked totals in registration order.
    pub fn totals(&self) -> Vec<u32> {
        self.players.iter().map(Player::total_score).collect()
    }

    /// Hands the turn to the next seat. The only mutator of the active index.
    #[instrument(skip(self), fields(from = self.active))]
    pub fn advance_turn(&mut self) -> usize {
        self.active = (self.active + 1) % self.players.len();
        debug!(to = self.active, "Turn advanced");
        self.active
    }

    pub(crate) fn reset_round_pots(&mut self) {
        self.players.iter_mut().for_each(ScoreLedger::reset_round);
    }

    pub(crate) fn finish_round(&mut self) -> u32 {
        self.current_round += 1;
        self.current_round
    }

    /// Returns true once every round has been played.
    pub fn is_complete(&self) -> bool {
        self.current_round > self.total_rounds
    }
}

/// One round: category, board and the round's copy of the prize table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    number: u32,
    category: String,
    pub(crate) board: BoardState,
    pub(crate) prizes: PrizeTable,
}

impl Round {
    /// Sets up a round from a drawn phrase.
    #[instrument(skip(phrase, wheel))]
    pub fn new(
        number: u32,
        category: String,
        phrase: &str,
        wheel: &WheelConfig,
    ) -> Result<Self, ConfigError> {
        let board = BoardState::new(phrase)?;
        let prizes = PrizeTable::for_round(wheel)?;
        info!(number, category = %category, letters = board.hidden_count(), "Round ready");
        Ok(Self {
            number,
            category,
            board,
            prizes,
        })
    }

    /// Round number (1-based).
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Category shown to the players.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// The board.
    pub fn board(&self) -> &BoardState {
        &self.board
    }

    /// The round's prize table.
    pub fn prizes(&self) -> &PrizeTable {
        &self.prizes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_wraps_around() {
        let mut session = Match::from_names(&["A", "B", "C"], 1).unwrap();
        assert_eq!(session.advance_turn(), 1);
        assert_eq!(session.advance_turn(), 2);
        assert_eq!(session.advance_turn(), 0);
    }

    #[test]
    fn test_empty_roster_rejected() {
        let names: [&str; 0] = [];
        let err = Match::from_names(&names, 3).unwrap_err();
        assert_eq!(err.kind(), &ConfigErrorKind::NoPlayers);
    }

    #[test]
    fn test_seats_numbered_from_one() {
        let session = Match::from_names(&["ada", ""], 2).unwrap();
        let ids: Vec<u32> = session.players().iter().map(|p| p.id().get()).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(session.players()[1].name(), "PLAYER 2");
    }

    #[test]
    fn test_round_rejects_unusable_phrase() {
        let err = Round::new(1, "X".into(), "  ", &WheelConfig::default()).unwrap_err();
        assert!(matches!(err.kind(), ConfigErrorKind::PhraseWithoutLetters(_)));
    }
}
