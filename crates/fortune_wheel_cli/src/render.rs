//! Plain-text rendering of engine state and reports.

use fortune_wheel::{
    ActionReport, GameEngine, LetterClass, Outcome, PhraseRepository, Standing, TurnEvent,
    TurnState,
};
use rand::Rng;

/// Spreads the masked phrase out so placeholders are countable.
pub fn spaced(board: &str) -> String {
    board
        .split(' ')
        .map(|word| {
            word.chars()
                .map(String::from)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("   ")
}

/// Round header, board, scoreboard and the prompt for the active player.
pub fn status<P: PhraseRepository, R: Rng>(game: &GameEngine<P, R>) -> String {
    let round = game.round();
    let session = game.session();

    let mut lines = vec![
        format!(
            "\n== Round {}/{} · {} ==",
            round.number(),
            session.total_rounds(),
            round.category()
        ),
        format!("   {}\n", spaced(&round.board().masked_display())),
    ];

    let guessed: String = round
        .board()
        .guessed()
        .iter()
        .map(|l| l.as_char())
        .collect();
    if !guessed.is_empty() {
        lines.push(format!("   called: {guessed}"));
    }

    lines.extend(game.players().iter().enumerate().map(|(index, player)| {
        let marker = if index == session.active_index() && !game.is_match_over() {
            '>'
        } else {
            ' '
        };
        let jollies = "*".repeat(player.jolly_count() as usize);
        format!(
            " {marker} {:<12} pot {:>6}  total {:>7} {jollies}",
            player.name(),
            player.round_pot(),
            player.total_score()
        )
    }));

    lines.push(prompt(game));
    lines.join("\n")
}

fn prompt<P: PhraseRepository, R: Rng>(game: &GameEngine<P, R>) -> String {
    if game.is_match_over() {
        return "match over: r to restart, q to quit > ".to_string();
    }
    let name = game.active_player().name();
    let timer = game
        .turn_time_limit()
        .map(|limit| format!(" [{}s]", limit.as_secs()))
        .unwrap_or_default();
    match game.turn_state() {
        TurnState::LetterPrompt {
            value,
            class: LetterClass::Consonant,
        } => format!("{name}, consonant for {value}{timer} > "),
        TurnState::LetterPrompt {
            class: LetterClass::Vowel,
            ..
        } => format!("{name}, vowel{timer} > "),
        TurnState::Resolving(hazard) => format!("{name}, use a jolly against {hazard}? (y/n){timer} > "),
        _ => format!("{name}: spin, vowel, !solve, pass (h for help){timer} > "),
    }
}

/// One line describing what happened.
pub fn describe(event: &TurnEvent) -> String {
    match event {
        TurnEvent::Spun(Outcome::FreeSpinToken) => {
            "JOLLY! You keep it for later. Consonants pay the token value.".to_string()
        }
        TurnEvent::Spun(outcome) => format!("The wheel stops on {outcome}."),
        TurnEvent::JollyOffered(hazard) => format!("{hazard}! You hold a jolly."),
        TurnEvent::JollyUsed(hazard) => format!("The jolly cancels {hazard}. Spin again."),
        TurnEvent::Bankrupt { forfeited } => format!("BANKRUPT. {forfeited} lost."),
        TurnEvent::LostTurn => "PASS. The turn moves on.".to_string(),
        TurnEvent::VowelBought { cost } => format!("Vowel bought for {cost}."),
        TurnEvent::LetterHit {
            letter,
            occurrences: 1,
            credited,
        } => format!("{letter} appears once. +{credited}"),
        TurnEvent::LetterHit {
            letter,
            occurrences,
            credited,
        } => format!("{letter} appears {occurrences} times. +{credited}"),
        TurnEvent::LetterMiss(letter) => format!("No {letter}."),
        TurnEvent::InvalidInput(problem) => format!("Invalid: {problem}. Turn lost."),
        TurnEvent::Solved => "Solved!".to_string(),
        TurnEvent::WrongSolution => "Wrong solution.".to_string(),
        TurnEvent::Passed => "Passed.".to_string(),
        TurnEvent::TimedOut => "Time is up!".to_string(),
    }
}

/// Event, round result and ranking of a report.
pub fn report(report: &ActionReport) -> String {
    let mut lines = vec![format!("  {}", describe(report.event()))];
    if let Some(summary) = report.round_over() {
        lines.push(format!(
            "  Round {} goes to {} with {}: {}",
            summary.round(),
            summary.winner(),
            summary.banked(),
            summary.phrase()
        ));
    }
    if let Some(standings) = report.standings() {
        lines.push(ranking(standings));
    }
    lines.join("\n")
}

/// Final ranking table.
pub fn ranking(standings: &[Standing]) -> String {
    std::iter::once("  FINAL RANKING".to_string())
        .chain(standings.iter().map(|standing| {
            format!(
                "  {:>2}. {:<12} {:>7}",
                standing.rank(),
                standing.name(),
                standing.total()
            )
        }))
        .collect::<Vec<_>>()
        .join("\n")
}
