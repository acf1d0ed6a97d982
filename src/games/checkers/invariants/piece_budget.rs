//! Neither side ever has more pieces than it started with.

use super::super::{Color, Match};
use super::Invariant;
use strum::IntoEnumIterator;

/// Pieces each color places at the start of a game.
pub const PIECES_PER_COLOR: usize = 12;

/// Invariant: each color has at most twelve pieces on the board.
pub struct PieceBudgetInvariant;

impl Invariant<Match> for PieceBudgetInvariant {
    fn holds(game: &Match) -> bool {
        Color::iter().all(|color| game.canonical_board().count(color) <= PIECES_PER_COLOR)
    }

    fn description() -> &'static str {
        "Each color has at most twelve pieces"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::checkers::{BoardView, Player};

    #[test]
    fn test_starting_position_is_full_budget() {
        let board = BoardView::new(Color::Red);
        assert_eq!(board.count(Color::Red), PIECES_PER_COLOR);
        assert_eq!(board.count(Color::White), PIECES_PER_COLOR);

        let game = Match::new(3, Player::new("a"), Player::new("b"));
        assert!(PieceBudgetInvariant::holds(&game));
    }
}
