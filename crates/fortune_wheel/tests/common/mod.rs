//! Shared fixtures for engine integration tests.

#![allow(dead_code)]

use fortune_wheel::{GameEngine, GameRules, Outcome, PhraseRepository, WheelConfig};
use std::cell::Cell;
use std::rc::Rc;

/// Random source pinned to the lowest or highest value of every draw.
///
/// Uniform range sampling maps an all-zero draw to the first index and an
/// all-ones draw to the last, so flipping the switch decides which wedge of
/// the prize table the next spin lands on.
pub struct LeverRng {
    last: Rc<Cell<bool>>,
}

impl LeverRng {
    /// Returns the rng and the switch that steers it (starts on "first").
    pub fn new() -> (Self, Rc<Cell<bool>>) {
        let last = Rc::new(Cell::new(false));
        (Self { last: last.clone() }, last)
    }
}

impl rand::RngCore for LeverRng {
    fn next_u32(&mut self) -> u32 {
        if self.last.get() { u32::MAX } else { 0 }
    }

    fn next_u64(&mut self) -> u64 {
        if self.last.get() { u64::MAX } else { 0 }
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let byte = if self.last.get() { u8::MAX } else { 0 };
        dest.fill(byte);
    }
}

/// One category whose phrases are handed out in order, cycling.
pub struct ScriptedPhrases {
    phrases: Vec<&'static str>,
    next: usize,
}

impl ScriptedPhrases {
    pub fn new(phrases: &[&'static str]) -> Self {
        Self {
            phrases: phrases.to_vec(),
            next: 0,
        }
    }
}

impl PhraseRepository for ScriptedPhrases {
    fn categories(&self) -> Vec<String> {
        vec!["TEST".to_string()]
    }

    fn pick_phrase(&mut self, _category: &str) -> Option<String> {
        let phrase = self.phrases.get(self.next % self.phrases.len().max(1))?;
        self.next += 1;
        Some(phrase.to_string())
    }
}

/// Untimed rules over the given wheel.
pub fn rules(prizes: Vec<Outcome>, solve_bonus: u32) -> GameRules {
    GameRules::new(500, solve_bonus, None, WheelConfig::new(prizes, vec![300, 600]))
}

/// Starts a match steered by a [`LeverRng`].
pub fn lever_game(
    prizes: Vec<Outcome>,
    solve_bonus: u32,
    phrases: &[&'static str],
    players: &[&str],
    rounds: u32,
) -> (GameEngine<ScriptedPhrases, LeverRng>, Rc<Cell<bool>>) {
    let (rng, lever) = LeverRng::new();
    let game = GameEngine::start_match(
        rules(prizes, solve_bonus),
        ScriptedPhrases::new(phrases),
        rng,
        players,
        rounds,
    )
    .unwrap();
    (game, lever)
}
