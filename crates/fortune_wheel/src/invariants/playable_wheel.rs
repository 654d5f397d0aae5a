//! Playable wheel invariant.

use super::Invariant;
use crate::session::Round;

/// Invariant: the live prize table can always be spun for money.
pub struct PlayableWheel;

impl Invariant<Round> for PlayableWheel {
    fn holds(round: &Round) -> bool {
        !round.prizes().entries().is_empty() && round.prizes().has_cash()
    }

    fn description() -> &'static str {
        "Prize table is non-empty and holds a cash wedge"
    }
}
