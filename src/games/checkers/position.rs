//! Board coordinates.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Number of rows and cells on a checkers board.
pub const BOARD_SIZE: u8 = 8;

/// A (row, cell) coordinate on the 8×8 grid.
///
/// Always on the board: every constructor that accepts untrusted input goes
/// through [`Position::try_new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawPosition")]
pub struct Position {
    row: u8,
    cell: u8,
}

/// Wire form of a position before range checking.
#[derive(Debug, Deserialize)]
struct RawPosition {
    row: i64,
    cell: i64,
}

/// Coordinate outside the 8×8 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Position ({row}, {cell}) is off the board")]
pub struct PositionError {
    /// Offending row.
    pub row: i64,
    /// Offending cell.
    pub cell: i64,
}

impl TryFrom<RawPosition> for Position {
    type Error = PositionError;

    fn try_from(raw: RawPosition) -> Result<Self, Self::Error> {
        Position::try_new(raw.row, raw.cell)
    }
}

impl Position {
    /// Creates a position from coordinates known to be on the board.
    ///
    /// Coordinates are reduced modulo the board size in release builds;
    /// use [`Position::try_new`] for anything that came off the wire.
    pub const fn new(row: u8, cell: u8) -> Self {
        debug_assert!(row < BOARD_SIZE && cell < BOARD_SIZE);
        Self {
            row: row % BOARD_SIZE,
            cell: cell % BOARD_SIZE,
        }
    }

    /// Creates a position, rejecting coordinates outside [0, 7].
    #[instrument]
    pub fn try_new(row: i64, cell: i64) -> Result<Self, PositionError> {
        let range = 0..i64::from(BOARD_SIZE);
        if range.contains(&row) && range.contains(&cell) {
            Ok(Self {
                row: row as u8,
                cell: cell as u8,
            })
        } else {
            Err(PositionError { row, cell })
        }
    }

    /// Returns the row index.
    pub fn row(&self) -> u8 {
        self.row
    }

    /// Returns the cell (column) index.
    pub fn cell(&self) -> u8 {
        self.cell
    }

    /// Point reflection through the board center: (r, c) → (7 − r, 7 − c).
    pub fn reflect(&self) -> Self {
        Self {
            row: BOARD_SIZE - 1 - self.row,
            cell: BOARD_SIZE - 1 - self.cell,
        }
    }

    /// Shifts the position, returning `None` when it would leave the board.
    pub fn offset(&self, rows: i8, cells: i8) -> Option<Self> {
        Self::try_new(
            i64::from(self.row) + i64::from(rows),
            i64::from(self.cell) + i64::from(cells),
        )
        .ok()
    }

    /// Dark squares, the only ones pieces ever stand on.
    pub fn is_playable(&self) -> bool {
        (self.row + self.cell) % 2 == 1
    }

    /// Iterates over all 64 positions in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |cell| Position { row, cell }))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.cell)
    }
}
