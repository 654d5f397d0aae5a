//! Top-level orchestrator and the only entry point for callers.
//!
//! The engine owns the match, the live round and the turn controller. Every
//! action method returns an [`ActionReport`] or an [`ActionError`]; a refused
//! action leaves every piece of state as it was.

use crate::action::{ActionError, TurnAction, TurnEvent};
use crate::config::{GameRules, ROUND_RANGE};
use crate::contracts::{ActionAccepted, check_postconditions};
use crate::error::{ConfigError, ConfigErrorKind};
use crate::ledger::ScoreLedger;
use crate::phrase::PhraseRepository;
use crate::report::{ActionReport, RoundSummary, Standing, rank_players};
use crate::session::{Match, Round};
use crate::turn::{TurnController, TurnState};
use crate::types::Player;
use crate::wheel::WheelConfig;
use rand::Rng;
use rand::rngs::StdRng;
use std::time::Duration;
use tracing::{error, info, instrument, warn};

/// Runs one match of rounds over a phrase repository and a random source.
pub struct GameEngine<P, R = StdRng> {
    rules: GameRules,
    phrases: P,
    rng: R,
    session: Match,
    round: Round,
    turn: TurnController,
    standings: Option<Vec<Standing>>,
    halted: bool,
}

impl<P, R> GameEngine<P, R>
where
    P: PhraseRepository,
    R: Rng,
{
    /// Registers the players and starts round 1 with the first player.
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`]: no players, a round count outside 1..=10, an
    /// empty repository or an unplayable wheel.
    #[instrument(skip(rules, phrases, rng, names), fields(players = names.len()))]
    pub fn start_match<S: AsRef<str>>(
        rules: GameRules,
        mut phrases: P,
        mut rng: R,
        names: &[S],
        total_rounds: u32,
    ) -> Result<Self, ConfigError> {
        let session = Self::new_session(names, total_rounds)?;
        let round = Self::draw_round(&mut phrases, &mut rng, rules.wheel(), 1)?;
        let turn = TurnController::new(rules.turn_rules());
        info!(total_rounds, "Match started");
        Ok(Self {
            rules,
            phrases,
            rng,
            session,
            round,
            turn,
            standings: None,
            halted: false,
        })
    }

    fn new_session<S: AsRef<str>>(names: &[S], total_rounds: u32) -> Result<Match, ConfigError> {
        if !ROUND_RANGE.contains(&total_rounds) {
            return Err(ConfigErrorKind::RoundCount(total_rounds).into());
        }
        Match::from_names(names, total_rounds)
    }

    fn draw_round(
        phrases: &mut P,
        rng: &mut R,
        wheel: &WheelConfig,
        number: u32,
    ) -> Result<Round, ConfigError> {
        let (category, phrase) = phrases.draw_phrase(rng)?;
        Round::new(number, category, &phrase, wheel)
    }

    /// Draws a fresh phrase for the current round number and resets pots.
    /// The active player is kept.
    #[instrument(skip(self), fields(round = self.session.current_round()))]
    fn start_round(&mut self) -> Result<(), ConfigError> {
        self.round = Self::draw_round(
            &mut self.phrases,
            &mut self.rng,
            self.rules.wheel(),
            self.session.current_round(),
        )?;
        self.session.reset_round_pots();
        self.turn = TurnController::new(self.rules.turn_rules());
        Ok(())
    }

    /// Banks the winner's pot and moves on to the next round or the ranking.
    ///
    /// The next round is drawn before anything is settled. If the draw fails
    /// the engine halts and refuses every action until a restart.
    #[instrument(skip(self), fields(round = self.round.number()))]
    fn end_round(&mut self, winner_index: usize, solved: bool) -> Result<RoundSummary, ConfigError> {
        let next_number = self.session.current_round() + 1;
        let next_round = if next_number > self.session.total_rounds() {
            None
        } else {
            let drawn = Self::draw_round(
                &mut self.phrases,
                &mut self.rng,
                self.rules.wheel(),
                next_number,
            );
            match drawn {
                Ok(round) => Some(round),
                Err(err) => {
                    error!(%err, next_number, "Next round could not be drawn, halting");
                    self.halted = true;
                    self.turn.close();
                    return Err(err);
                }
            }
        };

        let winner = self.session.player_mut(winner_index);
        let banked = ScoreLedger::settle_round_win(winner);
        let summary = RoundSummary::new(
            self.round.number(),
            winner.id(),
            self.round.board().phrase().to_string(),
            banked,
            solved,
        );
        info!(winner = %summary.winner(), banked, solved, "Round over");

        self.session.finish_round();
        self.session.advance_turn();
        match next_round {
            Some(round) => {
                self.round = round;
                self.session.reset_round_pots();
                self.turn = TurnController::new(self.rules.turn_rules());
            }
            None => {
                let standings = rank_players(self.session.players());
                info!(leader = ?standings.first().map(Standing::player), "Match over");
                self.turn.close();
                self.standings = Some(standings);
            }
        }
        Ok(summary)
    }

    fn ensure_live(&self) -> Result<(), ActionError> {
        if self.halted {
            return Err(ActionError::Halted);
        }
        if self.standings.is_some() {
            return Err(ActionError::MatchOver);
        }
        Ok(())
    }

    fn next_turn(&mut self) {
        self.session.advance_turn();
        self.turn = TurnController::new(self.rules.turn_rules());
    }

    /// Applies one action for the active player.
    ///
    /// # Errors
    ///
    /// `MatchOver` after the final ranking, `IllegalAction` when the turn
    /// state has no transition for the action, `InsufficientFunds` and
    /// `AlreadyGuessed` as the turn rules dictate. None of these change state.
    /// `Configuration` when the next round cannot be drawn; the engine is
    /// then halted and answers `Halted` until [`restart_match`] succeeds.
    ///
    /// [`restart_match`]: Self::restart_match
    #[instrument(skip(self), fields(player = %self.session.active_player().id(), state = self.turn.state().label()))]
    pub fn apply(&mut self, action: TurnAction) -> Result<ActionReport, ActionError> {
        self.ensure_live()
            .inspect_err(|err| warn!(%action, %err, "Action after play stopped"))?;
        ActionAccepted::check(&action, self.turn.state())?;

        let totals_before = self.session.totals();
        let actor_index = self.session.active_index();
        let pot_before = self.session.active_player().round_pot();

        let player = self.session.player_mut(actor_index);
        let board = &mut self.round.board;
        let event = match &action {
            TurnAction::Spin => self.turn.spin(player, &mut self.round.prizes, &mut self.rng),
            TurnAction::BuyVowel => self.turn.buy_vowel(player),
            TurnAction::GuessLetter(input) => self.turn.guess_letter(player, board, input),
            TurnAction::Solve(candidate) => self.turn.solve(board, candidate),
            TurnAction::Pass => self.turn.pass(),
            TurnAction::UseJolly(use_it) => self.turn.use_jolly(player, *use_it),
            TurnAction::Timeout => self.turn.timeout(player),
        }
        .inspect_err(|err| warn!(%action, %err, "Action refused"))?;

        let solved = event == TurnEvent::Solved;
        if solved {
            ScoreLedger::award_solve_bonus(
                self.session.player_mut(actor_index),
                *self.rules.solve_bonus(),
            );
        }

        let actor = &self.session.players()[actor_index];
        let actor_id = actor.id();
        let pot_delta = i64::from(actor.round_pot()) - i64::from(pot_before);
        let masked = self.round.board().masked_display();

        let summary = if self.round.board().is_complete() {
            Some(self.end_round(actor_index, solved)?)
        } else {
            if self.turn.is_over() {
                self.next_turn();
            }
            None
        };

        if cfg!(debug_assertions) {
            check_postconditions(&totals_before, &self.session, &self.round)?;
        }

        let mut report = ActionReport::new(
            event,
            masked,
            actor_id,
            pot_delta,
            self.session.active_player().id(),
            *self.turn.state(),
        );
        if let Some(summary) = summary {
            report = report.with_round_over(summary);
        }
        if let Some(standings) = &self.standings {
            report = report.with_standings(standings.clone());
        }
        Ok(report)
    }

    /// Spins the wheel.
    pub fn spin(&mut self) -> Result<ActionReport, ActionError> {
        self.apply(TurnAction::Spin)
    }

    /// Buys a vowel.
    pub fn buy_vowel(&mut self) -> Result<ActionReport, ActionError> {
        self.apply(TurnAction::BuyVowel)
    }

    /// Calls a letter at the open prompt.
    pub fn guess_letter(&mut self, input: &str) -> Result<ActionReport, ActionError> {
        self.apply(TurnAction::GuessLetter(input.to_string()))
    }

    /// Attempts the whole phrase.
    pub fn solve(&mut self, candidate: &str) -> Result<ActionReport, ActionError> {
        self.apply(TurnAction::Solve(candidate.to_string()))
    }

    /// Gives the turn away.
    pub fn pass(&mut self) -> Result<ActionReport, ActionError> {
        self.apply(TurnAction::Pass)
    }

    /// Answers the jolly offer.
    pub fn use_jolly(&mut self, use_it: bool) -> Result<ActionReport, ActionError> {
        self.apply(TurnAction::UseJolly(use_it))
    }

    /// Ends the active turn because time ran out.
    pub fn timeout(&mut self) -> Result<ActionReport, ActionError> {
        self.apply(TurnAction::Timeout)
    }

    /// Delivers a timeout once `elapsed` reaches the turn time limit.
    ///
    /// Returns `Ok(None)` while time remains, when turns are untimed, or when
    /// the current state cannot time out.
    #[instrument(skip(self))]
    pub fn poll_deadline(&mut self, elapsed: Duration) -> Result<Option<ActionReport>, ActionError> {
        self.ensure_live()?;
        let Some(limit) = self.turn_time_limit() else {
            return Ok(None);
        };
        if elapsed < limit || !self.turn.state().accepts(&TurnAction::Timeout) {
            return Ok(None);
        }
        info!(?elapsed, ?limit, "Turn deadline passed");
        self.timeout().map(Some)
    }

    /// Replaces the current phrase with a new one. The round number, the
    /// active player and banked totals stay; round pots reset.
    #[instrument(skip(self))]
    pub fn skip_phrase(&mut self) -> Result<(), ActionError> {
        self.ensure_live()?;
        info!(round = self.round.number(), "Phrase skipped");
        self.start_round()?;
        Ok(())
    }

    /// Starts a new match with the same rules and repository.
    #[instrument(skip(self, names), fields(players = names.len()))]
    pub fn restart_match<S: AsRef<str>>(
        &mut self,
        names: &[S],
        total_rounds: u32,
    ) -> Result<(), ConfigError> {
        let session = Self::new_session(names, total_rounds)?;
        let round = Self::draw_round(&mut self.phrases, &mut self.rng, self.rules.wheel(), 1)?;
        self.session = session;
        self.round = round;
        self.turn = TurnController::new(self.rules.turn_rules());
        self.standings = None;
        self.halted = false;
        info!(total_rounds, "Match restarted");
        Ok(())
    }

    /// The match: players, round counter and active seat.
    pub fn session(&self) -> &Match {
        &self.session
    }

    /// Players in registration order.
    pub fn players(&self) -> &[Player] {
        self.session.players()
    }

    /// The player whose turn it is.
    pub fn active_player(&self) -> &Player {
        self.session.active_player()
    }

    /// The live round. After the match ends, the final round.
    pub fn round(&self) -> &Round {
        &self.round
    }

    /// Current turn state.
    pub fn turn_state(&self) -> &TurnState {
        self.turn.state()
    }

    /// Rules in force.
    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    /// Time a player has to act, or `None` for untimed turns.
    pub fn turn_time_limit(&self) -> Option<Duration> {
        *self.rules.turn_time_limit()
    }

    /// Final ranking, once the match is over.
    pub fn standings(&self) -> Option<&[Standing]> {
        self.standings.as_deref()
    }

    /// Returns true once the final ranking has been issued.
    pub fn is_match_over(&self) -> bool {
        self.standings.is_some()
    }

    /// Returns true after the next round failed to load. Only a restart
    /// clears it.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// The phrase repository.
    pub fn phrases(&self) -> &P {
        &self.phrases
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wheel::Outcome;
    use rand::SeedableRng;

    struct OnePhrase(&'static str);

    impl PhraseRepository for OnePhrase {
        fn categories(&self) -> Vec<String> {
            vec!["ANIMALS".to_string()]
        }

        fn pick_phrase(&mut self, _category: &str) -> Option<String> {
            Some(self.0.to_string())
        }
    }

    fn engine(prizes: Vec<Outcome>, names: &[&str], rounds: u32) -> GameEngine<OnePhrase> {
        let rules = GameRules::new(500, 0, None, WheelConfig::new(prizes, vec![300]));
        GameEngine::start_match(rules, OnePhrase("CAT"), StdRng::seed_from_u64(1), names, rounds)
            .unwrap()
    }

    #[test]
    fn test_illegal_action_changes_nothing() {
        let mut game = engine(vec![Outcome::Cash(300)], &["A", "B"], 1);
        let err = game.guess_letter("C").unwrap_err();
        assert!(matches!(err, ActionError::IllegalAction { .. }));
        assert_eq!(game.turn_state(), &TurnState::AwaitingAction);
        assert_eq!(game.session().active_index(), 0);
    }

    #[test]
    fn test_miss_passes_turn() {
        let mut game = engine(vec![Outcome::Cash(300)], &["A", "B"], 1);
        game.spin().unwrap();
        let report = game.guess_letter("Z").unwrap();
        assert_eq!(report.event(), &TurnEvent::LetterMiss(crate::types::Letter::from_char('Z').unwrap()));
        assert_eq!(report.active_player().get(), 2);
        assert_eq!(game.turn_state(), &TurnState::AwaitingAction);
    }

    #[test]
    fn test_empty_repository_rejected() {
        struct Empty;
        impl PhraseRepository for Empty {
            fn categories(&self) -> Vec<String> {
                Vec::new()
            }
            fn pick_phrase(&mut self, _category: &str) -> Option<String> {
                None
            }
        }
        let result = GameEngine::start_match(
            GameRules::default(),
            Empty,
            StdRng::seed_from_u64(0),
            &["A"],
            1,
        );
        assert_eq!(result.err().map(|e| e.kind().clone()), Some(ConfigErrorKind::NoCategories));
    }

    #[test]
    fn test_round_count_range() {
        let result = GameEngine::start_match(
            GameRules::default(),
            OnePhrase("CAT"),
            StdRng::seed_from_u64(0),
            &["A"],
            11,
        );
        assert_eq!(result.err().map(|e| e.kind().clone()), Some(ConfigErrorKind::RoundCount(11)));
    }
}
