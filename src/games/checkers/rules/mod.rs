//! Game rules for checkers.
//!
//! Pure functions over a [`BoardView`](super::BoardView). Rules are kept
//! apart from the match bookkeeping so the validator, the live match and the
//! replay cursor all share one definition of a legal capture, of applying a
//! move, and of promotion.

pub mod capture;
pub mod movement;
pub mod promotion;
pub mod victory;

pub use capture::{capturing_pieces, is_capture, piece_can_capture};
pub use movement::{AppliedMove, apply_move, revert_move};
pub use promotion::promote_pieces;
pub use victory::check_winner;
