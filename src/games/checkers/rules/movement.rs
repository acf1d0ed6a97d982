//! Applying and reverting moves on a board.
//!
//! Applying a move returns an [`AppliedMove`] record holding everything the
//! move destroyed, so that reverting it restores the previous position
//! exactly, kings and captured pieces included.

use super::super::{BoardView, Color, Move, Piece, Position};
use super::promotion::promote_pieces;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// A move as it was applied to a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AppliedMove {
    mv: Move,
    mover: Option<Piece>,
    captured: Option<Piece>,
    promoted: bool,
}

impl AppliedMove {
    /// The move, in the perspective of the board it was applied to.
    pub fn mv(&self) -> Move {
        self.mv
    }

    /// The moving piece as it stood before the move.
    pub fn mover(&self) -> Option<Piece> {
        self.mover
    }

    /// Color of the moving piece.
    pub fn mover_color(&self) -> Option<Color> {
        self.mover.map(|piece| piece.color())
    }

    /// The piece removed from the jumped square.
    pub fn captured(&self) -> Option<Piece> {
        self.captured
    }

    /// True if the move crowned the moving piece.
    pub fn promoted(&self) -> bool {
        self.promoted
    }

    /// Jumped square of a capture.
    pub fn captured_at(&self) -> Option<Position> {
        self.captured.and(self.mv.middle())
    }

    /// The same record seen from the other side of the table.
    pub fn reflect(&self) -> Self {
        Self {
            mv: self.mv.reflect(),
            ..*self
        }
    }
}

/// Moves the piece, removes any jumped piece and crowns as needed.
#[instrument(skip(board))]
pub fn apply_move(board: &mut BoardView, mv: Move) -> AppliedMove {
    let mover = board.make_move(&mv);
    let captured = mv.middle().and_then(|middle| board.remove_piece(middle));
    let promoted = promote_pieces(board).contains(&mv.end());

    debug!(
        %mv,
        mover = ?mover.map(|p| p.color()),
        captured = captured.is_some(),
        promoted,
        "Move applied"
    );

    AppliedMove {
        mv,
        mover,
        captured,
        promoted,
    }
}

/// Takes an applied move back.
///
/// The piece walks the reciprocal move with its pre-move type, and a
/// captured piece reappears on the jumped square, which the forward move
/// always left empty.
#[instrument(skip(board))]
pub fn revert_move(board: &mut BoardView, applied: &AppliedMove) {
    let back = applied.mv.reciprocal();
    board.remove_piece(back.start());
    if let Some(mover) = applied.mover {
        board.place_piece(back.end(), mover);
    }
    if let (Some(middle), Some(captured)) = (back.middle(), applied.captured)
        && !board.piece_at(middle)
    {
        board.place_piece(middle, captured);
    }
    debug!(mv = %applied.mv, "Move reverted");
}
