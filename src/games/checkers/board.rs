//! Board storage: spaces, rows and perspective views.
//!
//! A [`BoardView`] is laid out for one viewing color: that color's pieces
//! start on rows 5–7 and advance toward row 0, the opponent's start on rows
//! 0–2. The two perspectives of a match are related by point reflection, so
//! only one view is ever stored and the other is derived with
//! [`BoardView::reflected`].

use super::action::Move;
use super::position::{BOARD_SIZE, Position};
use super::types::{Color, Piece};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Rows seeded with the opponent's pieces.
const OPPONENT_HOME_ROWS: std::ops::Range<u8> = 0..3;
/// Rows seeded with the viewer's pieces.
const VIEWER_HOME_ROWS: std::ops::Range<u8> = 5..8;

/// One cell of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Space {
    index: u8,
    playable: bool,
    piece: Option<Piece>,
}

impl Space {
    fn new(index: u8, row: u8, piece: Option<Piece>) -> Self {
        Self {
            index,
            playable: Position::new(row, index).is_playable(),
            piece,
        }
    }

    /// Column of this space within its row.
    pub fn index(&self) -> u8 {
        self.index
    }

    /// Dark square that pieces may stand on.
    pub fn is_playable(&self) -> bool {
        self.playable
    }

    /// Returns the occupant, if any.
    pub fn piece(&self) -> Option<Piece> {
        self.piece
    }

    /// A playable square with nobody on it.
    pub fn is_open(&self) -> bool {
        self.playable && self.piece.is_none()
    }

    fn symbol(&self) -> char {
        match self.piece {
            Some(piece) => {
                let c = match piece.color() {
                    Color::Red => 'r',
                    Color::White => 'w',
                };
                if piece.is_king() { c.to_ascii_uppercase() } else { c }
            }
            None if self.playable => '.',
            None => ' ',
        }
    }
}

/// Eight spaces sharing a row index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Row {
    index: u8,
    spaces: [Space; 8],
}

impl Row {
    /// Creates the starting row `index` for a board seen by `viewer`.
    fn starting(index: u8, viewer: Color) -> Self {
        let occupant = if OPPONENT_HOME_ROWS.contains(&index) {
            Some(viewer.opponent())
        } else if VIEWER_HOME_ROWS.contains(&index) {
            Some(viewer)
        } else {
            None
        };

        let spaces = std::array::from_fn(|cell| {
            let cell = cell as u8;
            let piece = occupant
                .filter(|_| Position::new(index, cell).is_playable())
                .map(Piece::new);
            Space::new(cell, index, piece)
        });

        Self { index, spaces }
    }

    fn empty(index: u8) -> Self {
        Self {
            index,
            spaces: std::array::from_fn(|cell| Space::new(cell as u8, index, None)),
        }
    }

    /// Row index on its board.
    pub fn index(&self) -> u8 {
        self.index
    }

    /// Returns the space at `cell`.
    pub fn space(&self, cell: u8) -> &Space {
        &self.spaces[usize::from(cell)]
    }

    /// Returns all spaces, left to right.
    pub fn spaces(&self) -> &[Space; 8] {
        &self.spaces
    }

    /// Iterates over the spaces.
    pub fn iter(&self) -> std::slice::Iter<'_, Space> {
        self.spaces.iter()
    }
}

impl<'a> IntoIterator for &'a Row {
    type Item = &'a Space;
    type IntoIter = std::slice::Iter<'a, Space>;

    fn into_iter(self) -> Self::IntoIter {
        self.spaces.iter()
    }
}

/// The 8×8 board as seen by one color.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardView {
    perspective: Color,
    rows: [Row; 8],
}

impl BoardView {
    /// Creates the starting position seen by `perspective`.
    #[instrument]
    pub fn new(perspective: Color) -> Self {
        Self {
            perspective,
            rows: std::array::from_fn(|index| Row::starting(index as u8, perspective)),
        }
    }

    /// Creates a board without pieces. Useful for setting up positions.
    pub fn empty(perspective: Color) -> Self {
        Self {
            perspective,
            rows: std::array::from_fn(|index| Row::empty(index as u8)),
        }
    }

    /// Color this view is laid out for.
    pub fn perspective(&self) -> Color {
        self.perspective
    }

    /// Returns all rows, row 0 first.
    pub fn rows(&self) -> &[Row; 8] {
        &self.rows
    }

    /// Returns one row.
    pub fn row(&self, index: u8) -> &Row {
        &self.rows[usize::from(index)]
    }

    /// Last row of the board (row 7).
    pub fn last_row(&self) -> &Row {
        &self.rows[usize::from(BOARD_SIZE - 1)]
    }

    /// Iterates over the rows.
    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    /// Returns the space at `pos`.
    pub fn space(&self, pos: Position) -> &Space {
        self.row(pos.row()).space(pos.cell())
    }

    fn space_mut(&mut self, pos: Position) -> &mut Space {
        &mut self.rows[usize::from(pos.row())].spaces[usize::from(pos.cell())]
    }

    /// Returns the piece at `pos`, if any.
    pub fn piece(&self, pos: Position) -> Option<Piece> {
        self.space(pos).piece
    }

    /// True when a piece stands on `pos`.
    pub fn piece_at(&self, pos: Position) -> bool {
        self.piece(pos).is_some()
    }

    /// True when a king stands on `pos`.
    pub fn is_king(&self, pos: Position) -> bool {
        self.piece(pos).is_some_and(|piece| piece.is_king())
    }

    /// Puts `piece` on `pos`, replacing any occupant.
    pub fn place_piece(&mut self, pos: Position, piece: Piece) {
        debug_assert!(pos.is_playable(), "pieces only stand on dark squares");
        self.space_mut(pos).piece = Some(piece);
    }

    /// Clears `pos`, returning what stood there.
    pub fn remove_piece(&mut self, pos: Position) -> Option<Piece> {
        self.space_mut(pos).piece.take()
    }

    /// Promotes the piece on `pos`. Returns true if a single became a king.
    pub fn king_piece(&mut self, pos: Position) -> bool {
        match self.space_mut(pos).piece.as_mut() {
            Some(piece) if !piece.is_king() => {
                piece.promote();
                true
            }
            _ => false,
        }
    }

    /// Carries the occupant of `mv.start()` to `mv.end()`.
    ///
    /// Jumped pieces are not touched here.
    pub fn make_move(&mut self, mv: &Move) -> Option<Piece> {
        let piece = self.remove_piece(mv.start());
        if let Some(piece) = piece {
            self.place_piece(mv.end(), piece);
        }
        piece
    }

    /// Iterates over every occupied position.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Position::all().filter_map(|pos| self.piece(pos).map(|piece| (pos, piece)))
    }

    /// Number of pieces of `color` on the board.
    pub fn count(&self, color: Color) -> usize {
        self.pieces().filter(|(_, piece)| piece.color() == color).count()
    }

    /// The same position seen from the other side of the table.
    pub fn reflected(&self) -> Self {
        let mut mirror = Self::empty(self.perspective.opponent());
        for (pos, piece) in self.pieces() {
            mirror.place_piece(pos.reflect(), piece);
        }
        mirror
    }

    /// This board seen by `color`, reflecting only when needed.
    pub fn view_for(&self, color: Color) -> Self {
        if color == self.perspective {
            self.clone()
        } else {
            self.reflected()
        }
    }
}

impl<'a> IntoIterator for &'a BoardView {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl std::fmt::Display for BoardView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.rows {
            write!(f, "{} ", row.index)?;
            for space in row {
                write!(f, "|{}", space.symbol())?;
            }
            writeln!(f, "|")?;
        }
        write!(f, "   0 1 2 3 4 5 6 7")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_layout() {
        let board = BoardView::new(Color::Red);
        assert_eq!(board.count(Color::Red), 12);
        assert_eq!(board.count(Color::White), 12);

        // Viewer's pieces sit on the rows nearest the viewer.
        assert_eq!(board.piece(Position::new(5, 0)), Some(Piece::new(Color::Red)));
        assert_eq!(board.piece(Position::new(0, 1)), Some(Piece::new(Color::White)));
        assert!(!board.piece_at(Position::new(3, 0)));
        assert!(!board.piece_at(Position::new(4, 1)));
    }

    #[test]
    fn test_pieces_only_on_playable_squares() {
        let board = BoardView::new(Color::White);
        for (pos, _) in board.pieces() {
            assert!(pos.is_playable(), "piece on light square {pos}");
        }
    }

    #[test]
    fn test_space_playable_parity() {
        let board = BoardView::empty(Color::Red);
        assert!(board.space(Position::new(0, 1)).is_playable());
        assert!(!board.space(Position::new(0, 0)).is_playable());
        assert!(board.space(Position::new(7, 0)).is_playable());
    }

    #[test]
    fn test_reflected_matches_other_starting_view() {
        assert_eq!(BoardView::new(Color::Red).reflected(), BoardView::new(Color::White));
        assert_eq!(BoardView::new(Color::White).reflected(), BoardView::new(Color::Red));
    }

    #[test]
    fn test_reflection_mirrors_every_square() {
        let mut red = BoardView::new(Color::Red);
        red.make_move(&Move::new(Position::new(5, 2), Position::new(4, 3)));
        red.king_piece(Position::new(4, 3));

        let white = red.reflected();
        for pos in Position::all() {
            assert_eq!(red.piece(pos), white.piece(pos.reflect()));
        }
    }

    #[test]
    fn test_make_move_carries_piece() {
        let mut board = BoardView::new(Color::Red);
        let moved = board.make_move(&Move::new(Position::new(5, 0), Position::new(4, 1)));
        assert_eq!(moved, Some(Piece::new(Color::Red)));
        assert!(!board.piece_at(Position::new(5, 0)));
        assert!(board.piece_at(Position::new(4, 1)));
    }

    #[test]
    fn test_king_piece_reports_promotion() {
        let mut board = BoardView::empty(Color::Red);
        board.place_piece(Position::new(0, 1), Piece::new(Color::Red));
        assert!(board.king_piece(Position::new(0, 1)));
        assert!(!board.king_piece(Position::new(0, 1)));
        assert!(board.is_king(Position::new(0, 1)));
    }

    #[test]
    fn test_display_marks_kings() {
        let mut board = BoardView::empty(Color::Red);
        board.place_piece(Position::new(0, 1), Piece::king(Color::White));
        let text = board.to_string();
        assert!(text.starts_with("0 | |W|"));
    }
}
