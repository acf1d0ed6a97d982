//! Recorded games played back through a [`MatchManager`].
//!
//! A transcript is JSON:
//!
//! ```json
//! { "red": "rosa", "white": "walt",
//!   "turns": [[{"start": {"row": 5, "cell": 2}, "end": {"row": 4, "cell": 3}}]] }
//! ```
//!
//! Each turn lists the active player's sub-moves in that player's own
//! perspective.

use crate::games::checkers::{Color, MatchId, Move, MoveOutcome, Player};
use crate::session::{MatchManager, SessionError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Failure to load or play a transcript.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum TranscriptError {
    /// The file could not be read.
    #[display("Failed to read transcript {path}: {source}")]
    Read {
        /// Transcript path.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not a valid transcript.
    #[display("Failed to parse transcript: {source}")]
    Parse {
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// The match service refused a request.
    #[display("{_0}")]
    #[from]
    Session(SessionError),
}

/// Players and turns of a recorded game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    red: String,
    white: String,
    turns: Vec<Vec<Move>>,
}

/// What happened to one recorded turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    /// Color that played the turn.
    pub color: Color,
    /// Outcome of each sub-move, in order.
    pub moves: Vec<(Move, MoveOutcome)>,
    /// Outcome of ending the turn.
    pub end: MoveOutcome,
}

impl Transcript {
    /// Creates a transcript.
    pub fn new(red: impl Into<String>, white: impl Into<String>, turns: Vec<Vec<Move>>) -> Self {
        Self {
            red: red.into(),
            white: white.into(),
            turns,
        }
    }

    /// Loads a transcript from a JSON file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TranscriptError> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|source| TranscriptError::Read {
                path: path.as_ref().display().to_string(),
                source,
            })?;
        let transcript: Self =
            serde_json::from_str(&content).map_err(|source| TranscriptError::Parse { source })?;
        info!(turns = transcript.turns.len(), "Transcript loaded");
        Ok(transcript)
    }

    /// Red player.
    pub fn red(&self) -> Player {
        Player::new(self.red.as_str())
    }

    /// White player.
    pub fn white(&self) -> Player {
        Player::new(self.white.as_str())
    }

    /// Recorded turns.
    pub fn turns(&self) -> &[Vec<Move>] {
        &self.turns
    }

    /// Plays every turn in a new match.
    ///
    /// Each sub-move is submitted and the turn is then ended, whatever the
    /// outcomes. Playing stops early once the match is over.
    #[instrument(skip(self, manager), fields(red = %self.red, white = %self.white))]
    pub fn play(&self, manager: &MatchManager) -> Result<(MatchId, Vec<TurnReport>), TranscriptError> {
        let match_id = manager.create_match(self.red(), self.white())?;
        let mut reports = Vec::with_capacity(self.turns.len());

        for turn in &self.turns {
            if manager.is_done(match_id)?.0 {
                debug!("Match over, skipping remaining turns");
                break;
            }
            let color = manager.active_color(match_id)?;
            let mut moves = Vec::with_capacity(turn.len());
            for &mv in turn {
                let outcome = manager.submit_move(match_id, mv)?;
                if !outcome.is_accepted() {
                    warn!(%mv, text = outcome.text(), "Recorded move rejected");
                }
                moves.push((mv, outcome));
            }
            let end = manager.end_turn(match_id)?;
            reports.push(TurnReport { color, moves, end });
        }

        info!(match_id, turns = reports.len(), "Transcript played");
        Ok((match_id, reports))
    }
}
