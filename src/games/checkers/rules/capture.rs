//! Capture detection.

use super::super::{BoardView, Color, Move, Position};
use tracing::instrument;

/// The four diagonal jump offsets.
const JUMP_OFFSETS: [(i8, i8); 4] = [(2, 2), (2, -2), (-2, 2), (-2, -2)];

/// Checks whether `mv` is a legal capture for `color` on `board`.
///
/// A capture travels two diagonal squares onto an empty space, over a piece
/// of the other color. Singles may only capture forward.
#[instrument(skip(board))]
pub fn is_capture(mv: &Move, color: Color, board: &BoardView) -> bool {
    if !mv.is_jump() || board.piece_at(mv.end()) {
        return false;
    }
    let Some(middle) = mv.middle() else {
        return false;
    };
    if mv.is_backward() && !board.is_king(mv.start()) {
        return false;
    }
    board
        .piece(middle)
        .is_some_and(|jumped| jumped.color() != color)
}

/// Checks whether the piece on `position` has any capture available.
#[instrument(skip(board))]
pub fn piece_can_capture(board: &BoardView, color: Color, position: Position) -> bool {
    JUMP_OFFSETS.iter().any(|&(rows, cells)| {
        position
            .offset(rows, cells)
            .is_some_and(|end| is_capture(&Move::new(position, end), color, board))
    })
}

/// Lists every position holding a `color` piece that can capture.
#[instrument(skip(board))]
pub fn capturing_pieces(board: &BoardView, color: Color) -> Vec<Position> {
    board
        .pieces()
        .filter(|(pos, piece)| piece.color() == color && piece_can_capture(board, color, *pos))
        .map(|(pos, _)| pos)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::checkers::Piece;

    fn setup() -> BoardView {
        let mut board = BoardView::empty(Color::Red);
        board.place_piece(Position::new(5, 2), Piece::new(Color::Red));
        board.place_piece(Position::new(4, 3), Piece::new(Color::White));
        board
    }

    #[test]
    fn test_forward_capture() {
        let board = setup();
        let mv = Move::new(Position::new(5, 2), Position::new(3, 4));
        assert!(is_capture(&mv, Color::Red, &board));
        assert!(piece_can_capture(&board, Color::Red, Position::new(5, 2)));
    }

    #[test]
    fn test_cannot_capture_own_piece() {
        let mut board = setup();
        board.place_piece(Position::new(4, 3), Piece::new(Color::Red));
        let mv = Move::new(Position::new(5, 2), Position::new(3, 4));
        assert!(!is_capture(&mv, Color::Red, &board));
    }

    #[test]
    fn test_landing_square_must_be_empty() {
        let mut board = setup();
        board.place_piece(Position::new(3, 4), Piece::new(Color::White));
        let mv = Move::new(Position::new(5, 2), Position::new(3, 4));
        assert!(!is_capture(&mv, Color::Red, &board));
    }

    #[test]
    fn test_single_cannot_capture_backward() {
        let mut board = BoardView::empty(Color::Red);
        board.place_piece(Position::new(3, 4), Piece::new(Color::Red));
        board.place_piece(Position::new(4, 3), Piece::new(Color::White));
        let mv = Move::new(Position::new(3, 4), Position::new(5, 2));
        assert!(!is_capture(&mv, Color::Red, &board));

        board.place_piece(Position::new(3, 4), Piece::king(Color::Red));
        assert!(is_capture(&mv, Color::Red, &board));
    }

    #[test]
    fn test_edge_pieces_do_not_wrap() {
        let mut board = BoardView::empty(Color::Red);
        board.place_piece(Position::new(1, 0), Piece::new(Color::Red));
        board.place_piece(Position::new(0, 1), Piece::new(Color::White));
        assert!(!piece_can_capture(&board, Color::Red, Position::new(1, 0)));
    }

    #[test]
    fn test_capturing_pieces_lists_only_attackers() {
        let mut board = setup();
        board.place_piece(Position::new(7, 0), Piece::new(Color::Red));
        assert_eq!(capturing_pieces(&board, Color::Red), vec![Position::new(5, 2)]);
        assert!(capturing_pieces(&BoardView::new(Color::Red), Color::Red).is_empty());
    }
}
