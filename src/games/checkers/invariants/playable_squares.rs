//! Pieces stand only on dark squares.

use super::super::Match;
use super::Invariant;

/// Invariant: no piece sits on a square where `(row + cell)` is even.
pub struct PlayableSquaresInvariant;

impl Invariant<Match> for PlayableSquaresInvariant {
    fn holds(game: &Match) -> bool {
        game.canonical_board()
            .pieces()
            .all(|(pos, _)| pos.is_playable())
    }

    fn description() -> &'static str {
        "Pieces only occupy playable squares"
    }
}
