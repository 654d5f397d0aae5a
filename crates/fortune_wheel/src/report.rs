//! Result objects handed to the presentation layer after every action.

use crate::action::TurnEvent;
use crate::turn::TurnState;
use crate::types::{Player, PlayerId};
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};

/// What one engine action did.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, new)]
pub struct ActionReport {
    /// What happened.
    event: TurnEvent,
    /// Board of the round the action was played in, masked.
    board: String,
    /// Player who acted.
    actor: PlayerId,
    /// Change of the actor's round pot caused by the action.
    pot_delta: i64,
    /// Player whose turn it is now.
    active_player: PlayerId,
    /// Turn state now.
    state: TurnState,
    /// Set when the action ended the round.
    #[new(default)]
    round_over: Option<RoundSummary>,
    /// Set when the action ended the match.
    #[new(default)]
    standings: Option<Vec<Standing>>,
}

impl ActionReport {
    pub(crate) fn with_round_over(mut self, summary: RoundSummary) -> Self {
        self.round_over = Some(summary);
        self
    }

    pub(crate) fn with_standings(mut self, standings: Vec<Standing>) -> Self {
        self.standings = Some(standings);
        self
    }

    /// Returns true if the action ended the match.
    pub fn is_match_over(&self) -> bool {
        self.standings.is_some()
    }
}

/// How a round ended.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, new)]
pub struct RoundSummary {
    /// Round number.
    round: u32,
    /// Player who completed or solved the phrase.
    winner: PlayerId,
    /// The phrase, fully revealed.
    phrase: String,
    /// Amount banked by the winner.
    banked: u32,
    /// Whether the phrase was solved rather than completed letter by letter.
    solved: bool,
}

/// One line of the final ranking.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Standing {
    /// 1-based rank; tied players share a rank.
    rank: usize,
    /// Seat.
    player: PlayerId,
    /// Display name.
    name: String,
    /// Banked total.
    total: u32,
}

/// Ranks players by total, highest first. Ties keep registration order and
/// share the rank of the first tied player.
pub fn rank_players(players: &[Player]) -> Vec<Standing> {
    let mut ordered: Vec<&Player> = players.iter().collect();
    ordered.sort_by(|a, b| b.total_score().cmp(&a.total_score()));

    let mut standings: Vec<Standing> = Vec::with_capacity(ordered.len());
    for (position, player) in ordered.into_iter().enumerate() {
        let rank = match standings.last() {
            Some(previous) if previous.total == player.total_score() => previous.rank,
            _ => position + 1,
        };
        standings.push(Standing {
            rank,
            player: player.id(),
            name: player.name().to_string(),
            total: player.total_score(),
        });
    }
    standings
}
