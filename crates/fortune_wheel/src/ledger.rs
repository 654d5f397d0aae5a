//! Money and jolly bookkeeping for the active player.

use crate::types::Player;
use tracing::{debug, instrument, warn};

/// Default price of a vowel.
pub const DEFAULT_VOWEL_COST: u32 = 500;

/// Applies monetary consequences to a player.
///
/// Stateless; every operation works on the [`Player`] it is handed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreLedger;

impl ScoreLedger {
    /// Pays `value` for each occurrence of a called consonant.
    #[instrument(skip(player), fields(player = %player.id))]
    pub fn credit_letter_hit(player: &mut Player, value: u32, occurrences: usize) -> u32 {
        let occurrences = u32::try_from(occurrences).unwrap_or(u32::MAX);
        let credit = value.saturating_mul(occurrences);
        player.round_pot = player.round_pot.saturating_add(credit);
        debug!(credit, pot = player.round_pot, "Letter credited");
        credit
    }

    /// Empties the round pot and returns what was lost.
    #[instrument(skip(player), fields(player = %player.id))]
    pub fn apply_bankrupt(player: &mut Player) -> u32 {
        let forfeited = std::mem::take(&mut player.round_pot);
        warn!(forfeited, "Bankrupt");
        forfeited
    }

    /// Deducts the vowel price, or does nothing and returns false if the pot
    /// cannot cover it.
    #[instrument(skip(player), fields(player = %player.id, pot = player.round_pot))]
    pub fn charge_vowel_purchase(player: &mut Player, cost: u32) -> bool {
        if player.round_pot < cost {
            return false;
        }
        player.round_pot -= cost;
        true
    }

    /// Adds the flat solve bonus to the round pot.
    #[instrument(skip(player), fields(player = %player.id))]
    pub fn award_solve_bonus(player: &mut Player, bonus: u32) {
        player.round_pot = player.round_pot.saturating_add(bonus);
    }

    /// Banks the round pot into the total. The pot stays visible until the
    /// next round resets it.
    #[instrument(skip(player), fields(player = %player.id))]
    pub fn settle_round_win(player: &mut Player) -> u32 {
        player.total_score = player.total_score.saturating_add(player.round_pot);
        debug!(banked = player.round_pot, total = player.total_score, "Round settled");
        player.round_pot
    }

    /// Clears the round pot for a new round.
    pub fn reset_round(player: &mut Player) {
        player.round_pot = 0;
    }

    /// Gives the player a jolly.
    #[instrument(skip(player), fields(player = %player.id))]
    pub fn grant_jolly(player: &mut Player) {
        player.jolly_count = player.jolly_count.saturating_add(1);
    }

    /// Spends a jolly; false if the player has none.
    #[instrument(skip(player), fields(player = %player.id, jollies = player.jolly_count))]
    pub fn consume_jolly(player: &mut Player) -> bool {
        match player.jolly_count.checked_sub(1) {
            Some(left) => {
                player.jolly_count = left;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PlayerId;

    fn player_with_pot(pot: u32) -> Player {
        let mut player = Player::new(PlayerId::from(1), "ADA");
        player.round_pot = pot;
        player
    }

    #[test]
    fn test_credit_multiplies_by_occurrences() {
        let mut player = player_with_pot(100);
        assert_eq!(ScoreLedger::credit_letter_hit(&mut player, 300, 3), 900);
        assert_eq!(player.round_pot(), 1000);
    }

    #[test]
    fn test_vowel_purchase_needs_full_cost() {
        let mut player = player_with_pot(499);
        assert!(!ScoreLedger::charge_vowel_purchase(&mut player, DEFAULT_VOWEL_COST));
        assert_eq!(player.round_pot(), 499);

        let mut player = player_with_pot(500);
        assert!(ScoreLedger::charge_vowel_purchase(&mut player, DEFAULT_VOWEL_COST));
        assert_eq!(player.round_pot(), 0);
    }

    #[test]
    fn test_bankrupt_zeroes_pot_only() {
        let mut player = player_with_pot(750);
        player.total_score = 2000;
        assert_eq!(ScoreLedger::apply_bankrupt(&mut player), 750);
        assert_eq!(player.round_pot(), 0);
        assert_eq!(player.total_score(), 2000);
    }

    #[test]
    fn test_settle_keeps_pot_as_record() {
        let mut player = player_with_pot(1200);
        ScoreLedger::settle_round_win(&mut player);
        assert_eq!(player.total_score(), 1200);
        assert_eq!(player.round_pot(), 1200);
    }

    #[test]
    fn test_jolly_consumption() {
        let mut player = player_with_pot(0);
        assert!(!ScoreLedger::consume_jolly(&mut player));
        ScoreLedger::grant_jolly(&mut player);
        ScoreLedger::grant_jolly(&mut player);
        assert!(ScoreLedger::consume_jolly(&mut player));
        assert_eq!(player.jolly_count(), 1);
    }
}
