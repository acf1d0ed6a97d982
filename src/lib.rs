//! Strictly Checkers - checkers rules with match bookkeeping and replays
//!
//! The engine decides whether a proposed move is legal given board geometry,
//! capture rules and the turn in progress, applies accepted moves, detects
//! promotion and victory, and replays finished matches move by move in
//! either direction.
//!
//! # Architecture
//!
//! - **Games**: the checkers rule engine (board, moves, validator, match,
//!   replay cursor)
//! - **Session**: [`MatchManager`], the synchronized service used by callers
//! - **Replays**: [`ReplayRegistry`], finished matches and per-viewer cursors
//! - **Config**: [`CheckersConfig`] loaded from TOML
//!
//! # Example
//!
//! ```
//! use strictly_checkers::{Color, MatchManager, Move, Player, Position};
//!
//! # fn example() -> Result<(), strictly_checkers::SessionError> {
//! let manager = MatchManager::default();
//! let id = manager.create_match(Player::new("rosa"), Player::new("walt"))?;
//!
//! let opening = Move::new(Position::new(5, 2), Position::new(4, 3));
//! assert!(manager.submit_move(id, opening)?.is_accepted());
//! assert!(manager.end_turn(id)?.is_accepted());
//! assert_eq!(manager.active_color(id)?, Color::White);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod games;
mod replays;
mod session;
mod transcript;

// Crate-level exports - Configuration
pub use config::{CheckersConfig, ConfigError};

// Crate-level exports - Match service
pub use session::{MATCH_OVER_MOVE_TEXT, MATCH_OVER_TEXT, MatchManager, SessionError};

// Crate-level exports - Replays
pub use replays::ReplayRegistry;

// Crate-level exports - Transcripts
pub use transcript::{Transcript, TranscriptError, TurnReport};

// Crate-level exports - Checkers engine
pub use games::checkers::{
    BOARD_SIZE, BoardView, Color, IN_PROGRESS_TEXT, JUMP_DISTANCE, Match, MatchId, MatchSnapshot,
    MatchStatus, Move, MoveError, MoveOutcome, MoveValidator, OutcomeKind, Piece, PieceType,
    Player, Position, PositionError, ReplayCursor, ReplayError, Row, STEP_DISTANCE, Space,
    ViolationKind, invariants, rules,
};
