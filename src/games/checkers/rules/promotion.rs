//! Promotion of singles that reach the far row.

use super::super::{BoardView, Position};
use crate::games::checkers::position::BOARD_SIZE;
use tracing::{debug, instrument};

/// Crowns every single standing on its far row.
///
/// On a view built for color P, P's singles are crowned on row 0 and the
/// opponent's on row 7, which is row 0 of the opponent's own view. Returns
/// the positions that were promoted.
#[instrument(skip(board))]
pub fn promote_pieces(board: &mut BoardView) -> Vec<Position> {
    let perspective = board.perspective();
    let candidates: Vec<Position> = board
        .pieces()
        .filter(|(pos, piece)| {
            let far_row = if piece.color() == perspective {
                0
            } else {
                BOARD_SIZE - 1
            };
            !piece.is_king() && pos.row() == far_row
        })
        .map(|(pos, _)| pos)
        .collect();

    for pos in &candidates {
        board.king_piece(*pos);
        debug!(%pos, "Piece crowned");
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::checkers::{Color, Piece};

    #[test]
    fn test_viewer_single_crowned_on_row_zero() {
        let mut board = BoardView::empty(Color::Red);
        board.place_piece(Position::new(0, 1), Piece::new(Color::Red));
        assert_eq!(promote_pieces(&mut board), vec![Position::new(0, 1)]);
        assert!(board.is_king(Position::new(0, 1)));
    }

    #[test]
    fn test_opponent_single_crowned_on_row_seven() {
        let mut board = BoardView::empty(Color::Red);
        board.place_piece(Position::new(7, 0), Piece::new(Color::White));
        board.place_piece(Position::new(0, 3), Piece::new(Color::White));
        assert_eq!(promote_pieces(&mut board), vec![Position::new(7, 0)]);
        assert!(!board.is_king(Position::new(0, 3)));
    }

    #[test]
    fn test_starting_position_has_no_promotions() {
        let mut board = BoardView::new(Color::White);
        assert!(promote_pieces(&mut board).is_empty());
    }
}
