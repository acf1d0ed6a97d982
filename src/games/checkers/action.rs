//! First-class action types for checkers.
//!
//! A [`Move`] is one sub-move of a turn: a start and an end square seen from
//! the mover's side of the table. All derived geometry is computed on demand.

use super::position::Position;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Manhattan distance of a single diagonal step.
pub const STEP_DISTANCE: u8 = 2;
/// Manhattan distance of a diagonal jump.
pub const JUMP_DISTANCE: u8 = 4;

/// A start/end pair, serialized as
/// `{"start": {"row": r, "cell": c}, "end": {"row": r, "cell": c}}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    start: Position,
    end: Position,
}

impl Move {
    /// Creates a move.
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Square the piece leaves.
    pub fn start(&self) -> Position {
        self.start
    }

    /// Square the piece lands on.
    pub fn end(&self) -> Position {
        self.end
    }

    fn row_delta(&self) -> i16 {
        i16::from(self.end.row()) - i16::from(self.start.row())
    }

    fn cell_delta(&self) -> i16 {
        i16::from(self.end.cell()) - i16::from(self.start.cell())
    }

    /// City-block distance between start and end.
    pub fn manhattan_distance(&self) -> u8 {
        (self.row_delta().unsigned_abs() + self.cell_delta().unsigned_abs()) as u8
    }

    /// Square jumped over, present only for genuine distance-4 jumps.
    #[instrument]
    pub fn middle(&self) -> Option<Position> {
        if self.manhattan_distance() != JUMP_DISTANCE
            || self.row_delta() % 2 != 0
            || self.cell_delta() % 2 != 0
        {
            return None;
        }
        let middle = Position::new(
            (self.start.row() + self.end.row()) / 2,
            (self.start.cell() + self.end.cell()) / 2,
        );
        (middle != self.start && middle != self.end).then_some(middle)
    }

    /// Moving away from the far row (toward higher row indices).
    pub fn is_backward(&self) -> bool {
        self.end.row() > self.start.row()
    }

    /// No row change.
    pub fn is_horizontal(&self) -> bool {
        self.row_delta() == 0
    }

    /// No column change.
    pub fn is_vertical(&self) -> bool {
        self.cell_delta() == 0
    }

    /// One diagonal square.
    pub fn is_step(&self) -> bool {
        self.manhattan_distance() == STEP_DISTANCE
    }

    /// Two squares along a diagonal or a straight line.
    pub fn is_jump(&self) -> bool {
        self.manhattan_distance() == JUMP_DISTANCE
    }

    /// The same move seen from the other side of the table.
    pub fn reflect(&self) -> Self {
        Self {
            start: self.start.reflect(),
            end: self.end.reflect(),
        }
    }

    /// The move that takes the piece back.
    pub fn reciprocal(&self) -> Self {
        Self {
            start: self.end,
            end: self.start,
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.start, self.end)
    }
}

/// Rule families a rejected move can violate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum ViolationKind {
    /// Backward single, a non-diagonal move, or a move onto a piece.
    InvalidGeometry,
    /// Neither a step nor a capture.
    IllegalDistance,
    /// Breaks the one-piece, capture-chain shape of a turn.
    TurnContinuityViolation,
    /// Ignores a capture that must be taken.
    MandatoryCaptureViolation,
    /// Undo with nothing to undo.
    NoHistory,
}

/// Why a move, turn or undo was refused.
///
/// The display strings are shown to players verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    /// A single tried to move toward its own side.
    #[display("You can only move backwards if your a king!")]
    BackwardSingle,

    /// Horizontal or vertical move.
    #[display("You can only move diagonally!")]
    NotDiagonal,

    /// The landing square already holds a piece.
    #[display("You can only move onto an empty space!")]
    DestinationOccupied,

    /// Longer than one step without capturing.
    #[display("You can only move one space unless you take!")]
    IllegalDistance,

    /// Plain step after something already moved this turn.
    #[display("You can only move once a turn without a capture!")]
    StepAfterMove,

    /// A different piece tried to continue the turn.
    #[display("You can only move one piece a turn!")]
    DifferentPiece,

    /// A capture is available and must be taken.
    #[display("You must make available capture!")]
    CaptureAvailable,

    /// Turn ended while the capturing piece can still jump.
    #[display("Invalid Turn Legal Capture available")]
    MustContinueCapture,

    /// Turn ended before anything moved.
    #[display("You must make a move before ending your turn!")]
    NoMoveMade,

    /// Nothing to back up.
    #[display("You have no moves to back up?")]
    NoHistory,
}

impl MoveError {
    /// Rule family of this rejection.
    pub fn kind(&self) -> ViolationKind {
        match self {
            MoveError::BackwardSingle | MoveError::NotDiagonal | MoveError::DestinationOccupied => {
                ViolationKind::InvalidGeometry
            }
            MoveError::IllegalDistance => ViolationKind::IllegalDistance,
            MoveError::StepAfterMove
            | MoveError::DifferentPiece
            | MoveError::MustContinueCapture
            | MoveError::NoMoveMade => ViolationKind::TurnContinuityViolation,
            MoveError::CaptureAvailable => ViolationKind::MandatoryCaptureViolation,
            MoveError::NoHistory => ViolationKind::NoHistory,
        }
    }
}

/// Tag of a [`MoveOutcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OutcomeKind {
    /// Accepted.
    Info,
    /// Rejected.
    Error,
}

/// Tagged result returned to clients: `{"type": "INFO" | "ERROR", "text": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveOutcome {
    #[serde(rename = "type")]
    kind: OutcomeKind,
    text: String,
}

impl MoveOutcome {
    /// Text sent when a sub-move is accepted.
    pub const VALID_MOVE: &'static str = "Yay a valid move.";
    /// Text sent when a turn is committed.
    pub const VALID_TURN: &'static str = "Valid Turn";
    /// Text sent when a move is backed up.
    pub const BACKED_UP: &'static str = "Yay you backed up your move!";

    /// Accepted outcome.
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: OutcomeKind::Info,
            text: text.into(),
        }
    }

    /// Rejected outcome.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: OutcomeKind::Error,
            text: text.into(),
        }
    }

    /// Outcome tag.
    pub fn kind(&self) -> OutcomeKind {
        self.kind
    }

    /// User-facing text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// True for INFO outcomes.
    pub fn is_accepted(&self) -> bool {
        self.kind == OutcomeKind::Info
    }

    /// Converts a rule check into an outcome with `accepted` as the INFO text.
    pub fn from_result(result: Result<(), MoveError>, accepted: &str) -> Self {
        match result {
            Ok(()) => Self::info(accepted),
            Err(err) => err.into(),
        }
    }
}

impl From<MoveError> for MoveOutcome {
    fn from(err: MoveError) -> Self {
        Self::error(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(r1: u8, c1: u8, r2: u8, c2: u8) -> Move {
        Move::new(Position::new(r1, c1), Position::new(r2, c2))
    }

    #[test]
    fn test_reflect_is_involution() {
        let m = mv(5, 2, 3, 4);
        assert_eq!(m.reflect().reflect(), m);
        assert_eq!(m.reflect(), mv(2, 5, 4, 3));
    }

    #[test]
    fn test_reciprocal_swaps_ends() {
        let m = mv(5, 2, 4, 3);
        assert_eq!(m.reciprocal(), mv(4, 3, 5, 2));
        assert_eq!(m.reciprocal().reciprocal(), m);
    }

    #[test]
    fn test_middle_of_diagonal_jump() {
        assert_eq!(mv(5, 2, 3, 4).middle(), Some(Position::new(4, 3)));
        assert_eq!(mv(2, 5, 4, 3).middle(), Some(Position::new(3, 4)));
    }

    #[test]
    fn test_no_middle_for_steps_and_odd_shapes() {
        assert_eq!(mv(5, 2, 4, 3).middle(), None);
        assert_eq!(mv(0, 0, 1, 3).middle(), None);
        assert_eq!(mv(3, 3, 3, 3).middle(), None);
    }

    #[test]
    fn test_direction_and_orientation() {
        assert!(!mv(1, 3, 0, 2).is_backward());
        assert!(mv(0, 2, 1, 3).is_backward());
        assert!(mv(4, 1, 4, 3).is_horizontal());
        assert!(mv(4, 1, 2, 1).is_vertical());
        assert!(mv(4, 1, 3, 2).is_step());
        assert!(mv(4, 1, 2, 3).is_jump());
    }

    #[test]
    fn test_wire_shape() {
        let json = serde_json::to_value(mv(1, 3, 0, 2)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"start": {"row": 1, "cell": 3}, "end": {"row": 0, "cell": 2}})
        );
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(MoveError::BackwardSingle.kind(), ViolationKind::InvalidGeometry);
        assert_eq!(MoveError::NotDiagonal.kind(), ViolationKind::InvalidGeometry);
        assert_eq!(MoveError::DestinationOccupied.kind(), ViolationKind::InvalidGeometry);
        assert_eq!(MoveError::CaptureAvailable.kind(), ViolationKind::MandatoryCaptureViolation);
        assert_eq!(MoveError::NoHistory.kind(), ViolationKind::NoHistory);
    }

    #[test]
    fn test_outcome_wire_shape() {
        let outcome = MoveOutcome::from(MoveError::NotDiagonal);
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "ERROR", "text": "You can only move diagonally!"})
        );
        assert!(MoveOutcome::info(MoveOutcome::VALID_MOVE).is_accepted());
    }
}
