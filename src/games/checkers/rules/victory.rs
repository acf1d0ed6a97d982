//! Total-capture victory detection.
//!
//! Only the loss of every piece ends a game; a side left without a legal
//! move is not detected.

use super::super::{BoardView, Color};
use tracing::instrument;

/// Returns the winner if one color has no pieces left.
///
/// Both views of a match hold the same pieces, so either one will do.
#[instrument(skip(board))]
pub fn check_winner(board: &BoardView) -> Option<Color> {
    if board.count(Color::Red) == 0 {
        Some(Color::White)
    } else if board.count(Color::White) == 0 {
        Some(Color::Red)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::checkers::{Piece, Position};

    #[test]
    fn test_no_winner_at_start() {
        assert_eq!(check_winner(&BoardView::new(Color::Red)), None);
    }

    #[test]
    fn test_red_wins_when_white_is_gone() {
        let mut board = BoardView::empty(Color::White);
        board.place_piece(Position::new(3, 2), Piece::new(Color::Red));
        assert_eq!(check_winner(&board), Some(Color::Red));
    }

    #[test]
    fn test_white_wins_when_red_is_gone() {
        let mut board = BoardView::empty(Color::Red);
        board.place_piece(Position::new(3, 2), Piece::king(Color::White));
        assert_eq!(check_winner(&board), Some(Color::White));
    }
}
