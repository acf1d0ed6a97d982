//! Finished matches and step-by-step replay.
//!
//! A [`MatchSnapshot`] is the immutable record of a match. A
//! [`ReplayCursor`] walks one snapshot in either direction on its own board,
//! so any number of viewers can replay the same match independently.

use super::game::MatchId;
use super::rules::{AppliedMove, apply_move, revert_move};
use super::{BoardView, Color, Move, Player};
use chrono::{DateTime, Utc};
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Why a replay step or lookup failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, derive_more::Error)]
pub enum ReplayError {
    /// Stepped forward past the last move.
    #[display("The replay is already at its last move")]
    AtEnd,

    /// Stepped back before the first move.
    #[display("The replay is already at its first move")]
    AtStart,

    /// No snapshot was saved for the match.
    #[display("No replay saved for match {match_id}")]
    NotFound {
        /// Requested match.
        match_id: MatchId,
    },
}

/// The immutable record of a finished match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct MatchSnapshot {
    id: MatchId,
    red: Player,
    white: Player,
    /// Moves in red's perspective.
    moves: Vec<Move>,
    reason: String,
    /// Position before the first move, in red's layout.
    #[new(value = "BoardView::new(Color::Red)")]
    initial_board: BoardView,
    #[new(value = "Utc::now()")]
    finished_at: DateTime<Utc>,
}

impl MatchSnapshot {
    /// Match identifier.
    pub fn id(&self) -> MatchId {
        self.id
    }

    /// Player holding `color`.
    pub fn player(&self, color: Color) -> &Player {
        match color {
            Color::Red => &self.red,
            Color::White => &self.white,
        }
    }

    /// Every move of the match, in red's perspective.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Replaces the starting position, given in either layout.
    pub fn with_initial_board(mut self, board: BoardView) -> Self {
        self.initial_board = board.view_for(Color::Red);
        self
    }

    /// Position before the first move, in red's layout.
    pub fn initial_board(&self) -> &BoardView {
        &self.initial_board
    }

    /// Why the match ended.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// When the snapshot was taken.
    pub fn finished_at(&self) -> DateTime<Utc> {
        self.finished_at
    }
}

impl std::fmt::Display for MatchSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} vs {}", self.id, self.red, self.white)
    }
}

/// A viewer's position within a replay.
#[derive(Debug, Clone)]
pub struct ReplayCursor {
    snapshot: Arc<MatchSnapshot>,
    board: BoardView,
    applied: Vec<AppliedMove>,
}

impl ReplayCursor {
    /// Starts before the first move, on the snapshot's starting position.
    #[instrument(skip(snapshot), fields(match_id = snapshot.id()))]
    pub fn new(snapshot: Arc<MatchSnapshot>) -> Self {
        Self {
            board: snapshot.initial_board.clone(),
            snapshot,
            applied: Vec::new(),
        }
    }

    /// The replayed match.
    pub fn snapshot(&self) -> &Arc<MatchSnapshot> {
        &self.snapshot
    }

    /// Number of moves replayed so far.
    pub fn cursor(&self) -> usize {
        self.applied.len()
    }

    /// Total number of moves.
    pub fn len(&self) -> usize {
        self.snapshot.moves.len()
    }

    /// True for a match without moves.
    pub fn is_empty(&self) -> bool {
        self.snapshot.moves.is_empty()
    }

    /// True if a move remains to replay.
    pub fn has_next(&self) -> bool {
        self.cursor() < self.len()
    }

    /// True if a move can be taken back.
    pub fn has_previous(&self) -> bool {
        self.cursor() > 0
    }

    /// The board as `color` sees it at the cursor.
    pub fn board(&self, color: Color) -> BoardView {
        self.board.view_for(color)
    }

    /// Color of the piece that made the most recently replayed move.
    pub fn last_mover(&self) -> Option<Color> {
        self.applied.last().and_then(AppliedMove::mover_color)
    }

    /// Replays the next move.
    #[instrument(skip(self), fields(match_id = self.snapshot.id, cursor = self.cursor()))]
    pub fn next_move(&mut self) -> Result<(), ReplayError> {
        let Some(&mv) = self.snapshot.moves.get(self.cursor()) else {
            warn!("Stepped past the end of the replay");
            return Err(ReplayError::AtEnd);
        };
        let applied = apply_move(&mut self.board, mv);
        self.applied.push(applied);
        debug!(%mv, "Replayed move");
        Ok(())
    }

    /// Takes back the most recently replayed move.
    #[instrument(skip(self), fields(match_id = self.snapshot.id, cursor = self.cursor()))]
    pub fn last_move(&mut self) -> Result<(), ReplayError> {
        let Some(applied) = self.applied.pop() else {
            warn!("Stepped before the start of the replay");
            return Err(ReplayError::AtStart);
        };
        revert_move(&mut self.board, &applied);
        debug!(mv = %applied.mv(), "Reverted replayed move");
        Ok(())
    }
}
