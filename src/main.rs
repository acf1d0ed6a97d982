//! Strictly Checkers - command line
//!
//! Plays recorded games through the match service and steps through their
//! replays.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::path::Path;
use strictly_checkers::{CheckersConfig, Color, MatchManager, Player, Transcript};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

/// Reason recorded for a transcript that ends before anyone wins.
const STOPPED_REASON: &str = "The game was stopped.";

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => CheckersConfig::from_file(path)?,
        None => CheckersConfig::default(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .init();

    match cli.command {
        Command::Play { transcript } => run_play(&config, &transcript),
        Command::Replay {
            transcript,
            backward,
        } => run_replay(&config, &transcript, backward),
    }
}

/// Plays a transcript and prints what happened.
#[instrument(skip(config))]
fn run_play(config: &CheckersConfig, path: &Path) -> Result<()> {
    let manager = MatchManager::from_config(config);
    let transcript = Transcript::from_file(path)?;
    let (match_id, reports) = transcript.play(&manager)?;

    for (number, report) in reports.iter().enumerate() {
        println!("Turn {} ({})", number + 1, report.color);
        for (mv, outcome) in &report.moves {
            println!("  {mv}: {}", outcome.text());
        }
        println!("  end: {}", report.end.text());
    }

    println!("{}", manager.board(match_id, Color::Red)?);
    let (_, status) = manager.is_done(match_id)?;
    println!("{status}");
    info!(match_id, "Play finished");
    Ok(())
}

/// Plays a transcript, saves it and walks through the replay.
#[instrument(skip(config))]
fn run_replay(config: &CheckersConfig, path: &Path, backward: bool) -> Result<()> {
    let manager = MatchManager::from_config(config);
    let transcript = Transcript::from_file(path)?;
    let (match_id, _) = transcript.play(&manager)?;
    manager.force_end(match_id, STOPPED_REASON)?;

    let viewer = Player::new("viewer");
    manager.open_replay(match_id, &viewer)?;
    let mut step = 0;
    println!("Move {step}\n{}", manager.replay_board(match_id, &viewer, Color::Red)?);

    while manager.step_forward(match_id, &viewer)? {
        step += 1;
        println!("Move {step}\n{}", manager.replay_board(match_id, &viewer, Color::Red)?);
    }

    if backward {
        while manager.step_backward(match_id, &viewer)? {
            step -= 1;
            println!("Move {step}\n{}", manager.replay_board(match_id, &viewer, Color::Red)?);
        }
    }

    manager.close_replay(match_id, &viewer)?;
    let (_, status) = manager.is_done(match_id)?;
    println!("{status}");
    info!(match_id, steps = step, "Replay finished");
    Ok(())
}
