//! Command-line interface for fortune_wheel.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Fortune Wheel - spin, call letters, solve the phrase
#[derive(Parser, Debug)]
#[command(name = "fortune_wheel")]
#[command(about = "Terminal wheel-of-fortune game", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML game configuration (built-in defaults when absent)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a match in this terminal
    Play(PlayArgs),

    /// List the phrase categories of the configuration
    Categories,
}

/// Options for a match
#[derive(Args, Debug, Clone)]
pub struct PlayArgs {
    /// Player name, repeat once per player (two unnamed players by default)
    #[arg(short, long = "player")]
    pub players: Vec<String>,

    /// Number of rounds, overriding the configuration
    #[arg(short, long)]
    pub rounds: Option<u32>,

    /// Seed for reproducible spins and phrase draws
    #[arg(long)]
    pub seed: Option<u64>,

    /// Disable the turn timer
    #[arg(long)]
    pub no_timer: bool,
}
