//! Turns a typed line into an engine call.

use fortune_wheel::{TurnAction, TurnState};

/// What a line of input asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Forward to the engine.
    Action(TurnAction),
    /// Draw a different phrase for this round.
    Skip,
    /// Start a new match with the same players.
    Restart,
    /// Show the command list.
    Help,
    /// Leave the program.
    Quit,
    /// Nothing recognisable.
    Unknown(String),
}

/// Interprets `line` in light of what the engine is waiting for.
///
/// At a letter prompt single characters are letters, so only the long
/// forms of `quit` and `help` are recognised there.
pub fn parse(line: &str, state: &TurnState, match_over: bool) -> Input {
    let trimmed = line.trim();
    let lower = trimmed.to_lowercase();

    match lower.as_str() {
        "quit" | "exit" => return Input::Quit,
        "help" | "?" => return Input::Help,
        _ => {}
    }

    if match_over {
        return match lower.as_str() {
            "q" => Input::Quit,
            "h" => Input::Help,
            "r" | "restart" => Input::Restart,
            _ => Input::Unknown(trimmed.to_string()),
        };
    }

    match state {
        TurnState::LetterPrompt { .. } => Input::Action(TurnAction::GuessLetter(trimmed.to_string())),
        TurnState::Resolving(_) => match lower.as_str() {
            "y" | "yes" => Input::Action(TurnAction::UseJolly(true)),
            "n" | "no" => Input::Action(TurnAction::UseJolly(false)),
            "q" => Input::Quit,
            _ => Input::Unknown(trimmed.to_string()),
        },
        _ => parse_turn_command(trimmed, &lower),
    }
}

fn parse_turn_command(trimmed: &str, lower: &str) -> Input {
    const SOLVE: &str = "solve ";

    if let Some(rest) = trimmed.strip_prefix('!') {
        return Input::Action(TurnAction::Solve(rest.to_string()));
    }
    if trimmed
        .get(..SOLVE.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(SOLVE))
    {
        return Input::Action(TurnAction::Solve(trimmed[SOLVE.len()..].to_string()));
    }
    match lower {
        "s" | "spin" | "" => Input::Action(TurnAction::Spin),
        "v" | "vowel" => Input::Action(TurnAction::BuyVowel),
        "p" | "pass" => Input::Action(TurnAction::Pass),
        "k" | "skip" => Input::Skip,
        "h" => Input::Help,
        "q" => Input::Quit,
        _ => Input::Unknown(trimmed.to_string()),
    }
}

/// Command list shown on `help`.
pub const HELP: &str = "\
  s, spin          spin the wheel (or just press enter)
  v, vowel         buy a vowel
  !PHRASE          solve (also: solve PHRASE)
  p, pass          pass the turn
  k, skip          draw a different phrase for this round
  y / n            use or keep a jolly after BANKRUPT or PASS
  r, restart       new match once the ranking is shown
  q, quit          leave (type quit at a letter prompt)";
