//! Checkers rule engine and match history.
//!
//! Layering, leaf first:
//!
//! - [`Position`], [`Piece`], [`Move`]: value types with derived geometry.
//! - [`BoardView`]: the 8×8 board as seen by one color.
//! - [`rules`]: capture detection, applying and reverting moves, promotion
//!   and victory, as pure functions over a board.
//! - [`MoveValidator`]: the capture and turn-continuation rules.
//! - [`Match`]: a live game with one canonical board and a permanent log.
//! - [`MatchSnapshot`] and [`ReplayCursor`]: stepping through a finished game.

mod action;
mod board;
mod contracts;
mod game;
mod position;
mod replay;
mod types;
mod validator;

pub mod invariants;
pub mod rules;

pub use action::{
    JUMP_DISTANCE, Move, MoveError, MoveOutcome, OutcomeKind, STEP_DISTANCE, ViolationKind,
};
pub use board::{BoardView, Row, Space};
pub use contracts::{
    ContinuesByCapture, DestinationEmpty, DiagonalOnly, ForwardUnlessKing, LegalMove,
    MandatoryCapture, MoveCheck, SamePieceContinues, StepOrCapture,
};
pub use game::{IN_PROGRESS_TEXT, Match, MatchId, MatchStatus};
pub use position::{BOARD_SIZE, Position, PositionError};
pub use replay::{MatchSnapshot, ReplayCursor, ReplayError};
pub use types::{Color, Piece, PieceType, Player};
pub use validator::MoveValidator;
