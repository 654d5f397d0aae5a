//! Seat and round counter invariants of the match.

use super::Invariant;
use crate::session::Match;

/// Invariant: the active index always points at a registered player.
pub struct ActiveSeatInBounds;

impl Invariant<Match> for ActiveSeatInBounds {
    fn holds(session: &Match) -> bool {
        session.active_index() < session.players().len()
    }

    fn description() -> &'static str {
        "Active player index is within the roster"
    }
}

/// Invariant: the round counter never runs past one beyond the final round.
///
/// `total_rounds + 1` is the resting value once the final ranking is out.
pub struct RoundWithinMatch;

impl Invariant<Match> for RoundWithinMatch {
    fn holds(session: &Match) -> bool {
        (1..=session.total_rounds() + 1).contains(&session.current_round())
    }

    fn description() -> &'static str {
        "Current round is within 1..=total_rounds + 1"
    }
}
