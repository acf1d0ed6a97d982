//! Log consistency: every missing piece was captured by a logged move.

use super::super::Match;
use super::Invariant;

/// Invariant: pieces on the board plus captures in the log equal the
/// pieces the match started with.
pub struct LogConsistentInvariant;

impl Invariant<Match> for LogConsistentInvariant {
    fn holds(game: &Match) -> bool {
        let on_board = game.canonical_board().pieces().count();
        let captured = game
            .applied_log()
            .iter()
            .filter(|applied| applied.captured().is_some())
            .count();
        on_board + captured == game.initial_pieces()
    }

    fn description() -> &'static str {
        "Pieces on the board plus logged captures match the starting count"
    }
}
