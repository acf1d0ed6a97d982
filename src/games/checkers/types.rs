//! Core domain types for checkers: colors, pieces and players.

use serde::{Deserialize, Serialize};

/// Side of the table.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Color {
    /// Red moves first.
    Red,
    /// White.
    White,
}

impl Color {
    /// Returns the other side.
    pub fn opponent(self) -> Self {
        match self {
            Color::Red => Color::White,
            Color::White => Color::Red,
        }
    }
}

/// Rank of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum PieceType {
    /// Ordinary piece, moves forward only.
    Single,
    /// Promoted piece, may also move backward.
    King,
}

/// A checker on a space.
///
/// Pieces compare by value: two red kings are equal wherever they stand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    color: Color,
    #[serde(rename = "type")]
    piece_type: PieceType,
}

impl Piece {
    /// Creates a single piece of the given color.
    pub fn new(color: Color) -> Self {
        Self {
            color,
            piece_type: PieceType::Single,
        }
    }

    /// Creates a king of the given color.
    pub fn king(color: Color) -> Self {
        Self {
            color,
            piece_type: PieceType::King,
        }
    }

    /// Returns the piece color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the piece type.
    pub fn piece_type(&self) -> PieceType {
        self.piece_type
    }

    /// Returns true for kings.
    pub fn is_king(&self) -> bool {
        self.piece_type == PieceType::King
    }

    /// Promotes the piece. Kings stay kings.
    pub fn promote(&mut self) {
        self.piece_type = PieceType::King;
    }
}

/// A signed-in participant, identified by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Player {
    name: String,
}

impl Player {
    /// Creates a player.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
