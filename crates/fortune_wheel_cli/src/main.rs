//! Fortune Wheel - terminal front end
//!
//! Reads one command per line from stdin and prints the board after every
//! action. The turn timer is checked when a line arrives: input that comes
//! in after the deadline is discarded and the turn times out instead.

#![warn(missing_docs)]

mod cli;
mod input;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, PlayArgs};
use fortune_wheel::{ActionError, GameConfig, GameEngine, PhraseRepository};
use input::{HELP, Input};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so they never interleave with the board
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Play(args) => run_play(config, args),
        Command::Categories => list_categories(&config),
    }
}

/// Loads the configuration file, or the built-in defaults when none is given.
#[instrument]
fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    match path {
        Some(path) => GameConfig::from_file(path)
            .with_context(|| format!("Failed to load {}", path.display())),
        None => {
            debug!("No config file given, using defaults");
            Ok(GameConfig::default())
        }
    }
}

/// Prints every category with its phrase count.
fn list_categories(config: &GameConfig) -> Result<()> {
    let book = config.phrase_book(None);
    for category in book.categories() {
        let count = book.phrases(&category).map_or(0, <[String]>::len);
        println!("{category:<24} {count:>3} phrases");
    }
    Ok(())
}

/// Runs matches until the players quit or stdin closes.
#[instrument(skip(config))]
fn run_play(config: GameConfig, args: PlayArgs) -> Result<()> {
    let mut config = config.with_timer(!args.no_timer);
    if let Some(rounds) = args.rounds {
        config = config.with_total_rounds(rounds);
    }
    config.validate()?;

    let names = if args.players.is_empty() {
        vec![String::new(), String::new()]
    } else {
        args.players.clone()
    };
    let total_rounds = *config.total_rounds();
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut game = GameEngine::start_match(
        config.rules(),
        config.phrase_book(args.seed),
        rng,
        &names,
        total_rounds,
    )?;
    info!(players = names.len(), total_rounds, "Match ready");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stdout = io::stdout();
    let mut turn_started = Instant::now();

    loop {
        write!(stdout, "{}", render::status(&game))?;
        stdout.flush()?;

        let Some(line) = lines.next() else {
            info!("Input closed");
            break;
        };
        let line = line?;

        if !game.is_match_over() {
            if let Some(report) = game.poll_deadline(turn_started.elapsed())? {
                println!("{}", render::report(&report));
                turn_started = Instant::now();
                continue;
            }
        }

        match input::parse(&line, game.turn_state(), game.is_match_over()) {
            Input::Quit => break,
            Input::Help => println!("{HELP}"),
            Input::Unknown(text) => println!("  ? {text:?} (h for help)"),
            Input::Restart => {
                game.restart_match(&names, total_rounds)?;
                turn_started = Instant::now();
            }
            Input::Skip => match game.skip_phrase() {
                Ok(()) => {
                    println!("  New phrase for this round.");
                    turn_started = Instant::now();
                }
                Err(err) => println!("  ! {err}"),
            },
            Input::Action(action) => match game.apply(action) {
                Ok(report) => {
                    println!("{}", render::report(&report));
                    turn_started = Instant::now();
                }
                Err(ActionError::Configuration(err)) => {
                    return Err(err).context("Failed to set up the next round");
                }
                Err(err) => println!("  ! {err}"),
            },
        }
    }

    Ok(())
}
