//! Command-line interface for strictly_checkers.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Checkers - checkers rules, match bookkeeping and replays
#[derive(Parser, Debug)]
#[command(name = "strictly_checkers")]
#[command(about = "Plays and replays recorded checkers games", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a transcript and print every outcome and the final board
    Play {
        /// JSON transcript of the game
        transcript: PathBuf,
    },

    /// Play a transcript, then step through its replay
    Replay {
        /// JSON transcript of the game
        transcript: PathBuf,

        /// Step back to the first move after reaching the last
        #[arg(long)]
        backward: bool,
    },
}
