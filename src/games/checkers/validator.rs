//! Per-match move validation and turn bookkeeping.

use super::action::{Move, MoveError};
use super::contracts::{LegalMove, MandatoryCapture, MoveCheck};
use super::rules::piece_can_capture;
use super::{BoardView, Color};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Judges sub-moves and decides when a turn may end.
///
/// Holds the sub-moves accepted during the current turn, in the mover's
/// perspective. The list is cleared when the turn is committed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveValidator {
    moves: Vec<Move>,
}

impl MoveValidator {
    /// Creates a validator with an empty turn.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates one sub-move of `color` on `board`, the mover's own view.
    ///
    /// Accepted moves are appended to the current turn; the caller is
    /// expected to apply them.
    #[instrument(skip(self, board), fields(turn_len = self.moves.len()))]
    pub fn validate_move(
        &mut self,
        mv: Move,
        color: Color,
        board: &BoardView,
    ) -> Result<(), MoveError> {
        LegalMove::check(&MoveCheck::new(mv, color, board, &self.moves))?;
        self.moves.push(mv);
        debug!(%mv, "Sub-move accepted");
        Ok(())
    }

    /// True when `color` must capture on `board`.
    ///
    /// Once the turn has started, only the continuing piece is considered.
    #[instrument(skip(self, board))]
    pub fn is_available_capture(&self, board: &BoardView, color: Color) -> bool {
        MandatoryCapture::available(board, color, self.moves.last().map(Move::end))
    }

    /// Decides whether the turn of `color` may end on `board`, the mover's
    /// view after the sub-moves were applied.
    ///
    /// On success the turn is committed and the sub-move list cleared.
    #[instrument(skip(self, board))]
    pub fn validate_turn(&mut self, board: &BoardView, color: Color) -> Result<(), MoveError> {
        let Some(last) = self.moves.last() else {
            warn!("Turn ended before any move");
            return Err(MoveError::NoMoveMade);
        };

        if last.is_jump() && piece_can_capture(board, color, last.end()) {
            warn!(at = %last.end(), "Capture chain left unfinished");
            return Err(MoveError::MustContinueCapture);
        }

        info!(sub_moves = self.moves.len(), "Turn committed");
        self.turn_done();
        Ok(())
    }

    /// The most recent sub-move of this turn.
    pub fn last_move(&self) -> Option<&Move> {
        self.moves.last()
    }

    /// Sub-moves accepted this turn.
    pub fn turn_moves(&self) -> &[Move] {
        &self.moves
    }

    /// Drops the newest sub-move of this turn.
    pub fn undo_last(&mut self) -> Option<Move> {
        self.moves.pop()
    }

    /// Reopens a committed turn with the sub-moves that are still on the
    /// board, in the mover's perspective.
    #[instrument(skip(self, moves), fields(sub_moves = moves.len()))]
    pub fn resume_turn(&mut self, moves: Vec<Move>) {
        debug!("Turn reopened");
        self.moves = moves;
    }

    /// Clears the turn.
    pub fn turn_done(&mut self) {
        self.moves.clear();
    }
}
