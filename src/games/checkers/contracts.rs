//! Precondition checks for a single sub-move.
//!
//! Each rule is its own check so it can be tested in isolation;
//! [`LegalMove`] composes them in the order players see the messages: the
//! first failing check decides the rejection.

use super::action::{Move, MoveError};
use super::rules::{is_capture, piece_can_capture};
use super::{BoardView, Color, Position};
use tracing::{instrument, warn};

/// Everything a rule needs to judge one sub-move.
#[derive(Debug, Clone, Copy)]
pub struct MoveCheck<'a> {
    /// The proposed sub-move.
    pub mv: Move,
    /// Color of the player moving.
    pub color: Color,
    /// The mover's view of the board.
    pub board: &'a BoardView,
    /// Sub-moves already accepted this turn.
    pub turn: &'a [Move],
    /// The sub-move jumps an opposing piece.
    pub is_capture: bool,
    /// A king stands on the start square.
    pub is_king: bool,
}

impl<'a> MoveCheck<'a> {
    /// Gathers the facts about `mv` once.
    #[instrument(skip(board, turn))]
    pub fn new(mv: Move, color: Color, board: &'a BoardView, turn: &'a [Move]) -> Self {
        Self {
            mv,
            color,
            board,
            turn,
            is_capture: is_capture(&mv, color, board),
            is_king: board.is_king(mv.start()),
        }
    }

    /// Landing square of the previous sub-move, if the turn has started.
    pub fn continuing_from(&self) -> Option<Position> {
        self.turn.last().map(|previous| previous.end())
    }
}

/// Singles only move toward the far row.
pub struct ForwardUnlessKing;

impl ForwardUnlessKing {
    /// Rejects backward moves by singles.
    pub fn check(ctx: &MoveCheck<'_>) -> Result<(), MoveError> {
        if ctx.mv.is_backward() && !ctx.is_king {
            Err(MoveError::BackwardSingle)
        } else {
            Ok(())
        }
    }
}

/// Pieces move along diagonals.
pub struct DiagonalOnly;

impl DiagonalOnly {
    /// Rejects horizontal and vertical moves.
    pub fn check(ctx: &MoveCheck<'_>) -> Result<(), MoveError> {
        if ctx.mv.is_horizontal() || ctx.mv.is_vertical() {
            Err(MoveError::NotDiagonal)
        } else {
            Ok(())
        }
    }
}

/// Pieces only land on empty squares.
pub struct DestinationEmpty;

impl DestinationEmpty {
    /// Rejects a move whose landing square holds a piece of either color.
    pub fn check(ctx: &MoveCheck<'_>) -> Result<(), MoveError> {
        if ctx.board.piece_at(ctx.mv.end()) {
            Err(MoveError::DestinationOccupied)
        } else {
            Ok(())
        }
    }
}

/// A move is one diagonal step or a capture.
pub struct StepOrCapture;

impl StepOrCapture {
    /// Rejects anything longer than a step that takes nothing.
    pub fn check(ctx: &MoveCheck<'_>) -> Result<(), MoveError> {
        if !ctx.mv.is_step() && !ctx.is_capture {
            Err(MoveError::IllegalDistance)
        } else {
            Ok(())
        }
    }
}

/// After the first sub-move, a turn only continues by capturing.
pub struct ContinuesByCapture;

impl ContinuesByCapture {
    /// Rejects a plain step once the turn has started.
    pub fn check(ctx: &MoveCheck<'_>) -> Result<(), MoveError> {
        if !ctx.turn.is_empty() && ctx.mv.is_step() {
            Err(MoveError::StepAfterMove)
        } else {
            Ok(())
        }
    }
}

/// Only the piece that moved first may continue the turn.
pub struct SamePieceContinues;

impl SamePieceContinues {
    /// Rejects a sub-move that does not start where the previous one ended.
    pub fn check(ctx: &MoveCheck<'_>) -> Result<(), MoveError> {
        match ctx.continuing_from() {
            Some(end) if end != ctx.mv.start() => Err(MoveError::DifferentPiece),
            _ => Ok(()),
        }
    }
}

/// Captures are compulsory.
pub struct MandatoryCapture;

impl MandatoryCapture {
    /// True when `color` has any capture on `board`.
    ///
    /// With `continuing_from` set, the turn has started and only the piece
    /// standing there counts.
    pub fn available(board: &BoardView, color: Color, continuing_from: Option<Position>) -> bool {
        match continuing_from {
            Some(pos) => {
                board.piece(pos).is_some_and(|piece| piece.color() == color)
                    && piece_can_capture(board, color, pos)
            }
            None => board
                .pieces()
                .any(|(pos, piece)| piece.color() == color && piece_can_capture(board, color, pos)),
        }
    }

    /// Rejects a non-capture while a capture is available.
    pub fn check(ctx: &MoveCheck<'_>) -> Result<(), MoveError> {
        if !ctx.is_capture && Self::available(ctx.board, ctx.color, ctx.continuing_from()) {
            Err(MoveError::CaptureAvailable)
        } else {
            Ok(())
        }
    }
}

/// Composite precondition for a sub-move.
pub struct LegalMove;

impl LegalMove {
    /// Runs every rule in order; the first violation wins.
    #[instrument(skip(ctx), fields(mv = %ctx.mv, color = %ctx.color))]
    pub fn check(ctx: &MoveCheck<'_>) -> Result<(), MoveError> {
        let result = ForwardUnlessKing::check(ctx)
            .and_then(|()| DiagonalOnly::check(ctx))
            .and_then(|()| DestinationEmpty::check(ctx))
            .and_then(|()| StepOrCapture::check(ctx))
            .and_then(|()| ContinuesByCapture::check(ctx))
            .and_then(|()| SamePieceContinues::check(ctx))
            .and_then(|()| MandatoryCapture::check(ctx));

        if let Err(err) = &result {
            warn!(kind = %err.kind(), reason = %err, "Move rejected");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::checkers::Piece;

    fn mv(r1: u8, c1: u8, r2: u8, c2: u8) -> Move {
        Move::new(Position::new(r1, c1), Position::new(r2, c2))
    }

    #[test]
    fn test_forward_unless_king() {
        let mut board = BoardView::empty(Color::Red);
        board.place_piece(Position::new(4, 1), Piece::new(Color::Red));
        let back = mv(4, 1, 5, 2);
        let ctx = MoveCheck::new(back, Color::Red, &board, &[]);
        assert_eq!(ForwardUnlessKing::check(&ctx), Err(MoveError::BackwardSingle));

        board.place_piece(Position::new(4, 1), Piece::king(Color::Red));
        let ctx = MoveCheck::new(back, Color::Red, &board, &[]);
        assert!(ForwardUnlessKing::check(&ctx).is_ok());
    }

    #[test]
    fn test_diagonal_only_rejects_straight_lines() {
        let board = BoardView::empty(Color::Red);
        for straight in [mv(4, 1, 4, 3), mv(4, 1, 3, 1), mv(4, 1, 4, 1)] {
            let ctx = MoveCheck::new(straight, Color::Red, &board, &[]);
            assert_eq!(DiagonalOnly::check(&ctx), Err(MoveError::NotDiagonal));
        }
    }

    #[test]
    fn test_step_or_capture() {
        let board = BoardView::new(Color::Red);
        let ctx = MoveCheck::new(mv(5, 0, 3, 2), Color::Red, &board, &[]);
        assert_eq!(StepOrCapture::check(&ctx), Err(MoveError::IllegalDistance));
    }

    #[test]
    fn test_continuation_rules() {
        let board = BoardView::new(Color::Red);
        let turn = [mv(5, 0, 4, 1)];

        let ctx = MoveCheck::new(mv(4, 1, 3, 2), Color::Red, &board, &turn);
        assert_eq!(ContinuesByCapture::check(&ctx), Err(MoveError::StepAfterMove));

        let ctx = MoveCheck::new(mv(5, 2, 3, 4), Color::Red, &board, &turn);
        assert_eq!(SamePieceContinues::check(&ctx), Err(MoveError::DifferentPiece));
    }

    #[test]
    fn test_mandatory_capture_follows_continuing_piece() {
        let mut board = BoardView::empty(Color::Red);
        board.place_piece(Position::new(5, 2), Piece::new(Color::Red));
        board.place_piece(Position::new(4, 3), Piece::new(Color::White));
        board.place_piece(Position::new(6, 7), Piece::new(Color::Red));

        assert!(MandatoryCapture::available(&board, Color::Red, None));

        // The turn is continuing with a piece that has nothing to take.
        let continuing = Some(Position::new(6, 7));
        assert!(!MandatoryCapture::available(&board, Color::Red, continuing));
        assert!(MandatoryCapture::available(&board, Color::Red, Some(Position::new(5, 2))));

        let turn = [mv(7, 6, 6, 7)];
        let ctx = MoveCheck::new(mv(6, 7, 5, 6), Color::Red, &board, &turn);
        assert!(MandatoryCapture::check(&ctx).is_ok());
    }

    #[test]
    fn test_destination_must_be_empty() {
        let board = BoardView::new(Color::Red);

        // Own piece on the landing square.
        let ctx = MoveCheck::new(mv(6, 1, 5, 0), Color::Red, &board, &[]);
        assert_eq!(DestinationEmpty::check(&ctx), Err(MoveError::DestinationOccupied));
        assert_eq!(LegalMove::check(&ctx), Err(MoveError::DestinationOccupied));

        // Opposing piece on the landing square.
        let mut board = BoardView::empty(Color::Red);
        board.place_piece(Position::new(4, 3), Piece::new(Color::Red));
        board.place_piece(Position::new(3, 4), Piece::new(Color::White));
        let ctx = MoveCheck::new(mv(4, 3, 3, 4), Color::Red, &board, &[]);
        assert_eq!(LegalMove::check(&ctx), Err(MoveError::DestinationOccupied));

        let ctx = MoveCheck::new(mv(4, 3, 3, 2), Color::Red, &board, &[]);
        assert!(DestinationEmpty::check(&ctx).is_ok());
    }
}
