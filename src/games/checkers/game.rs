//! A live match between two players.
//!
//! The match owns one canonical board laid out for red. White's board is
//! the same position reflected on read, so the two views can never drift
//! apart. The permanent log is kept in red's perspective and remembers what
//! every move destroyed, which makes undo and replay exact.

use super::action::{Move, MoveError};
#[cfg(debug_assertions)]
use super::invariants::{CheckersInvariants, InvariantSet};
use super::replay::MatchSnapshot;
use super::rules::{AppliedMove, apply_move, check_winner, revert_move};
use super::validator::MoveValidator;
use super::{BoardView, Color, Player};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Identifier of a match, sequential from 0.
pub type MatchId = u64;

/// Text reported while a match is running.
pub const IN_PROGRESS_TEXT: &str = "The game is still in progress.";

/// Lifecycle of a match. `Done` is terminal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchStatus {
    /// Moves are being played; the color is the side to move.
    InProgress(Color),
    /// Finished, with the reason shown to both players.
    Done(String),
}

/// One game of checkers.
#[derive(Debug, Clone)]
pub struct Match {
    id: MatchId,
    red: Player,
    white: Player,
    board: BoardView,
    active: Color,
    validator: MoveValidator,
    log: Vec<AppliedMove>,
    /// Log length when the current turn began.
    turn_start: usize,
    /// Log length when each committed turn began, oldest first.
    committed_turns: Vec<usize>,
    initial_board: BoardView,
    status: MatchStatus,
}

impl Match {
    /// Creates a match in the starting position, red to move.
    #[instrument]
    pub fn new(id: MatchId, red: Player, white: Player) -> Self {
        Self::with_board(id, red, white, BoardView::new(Color::Red))
    }

    /// Creates a match from an arbitrary position, red to move.
    ///
    /// `board` may be laid out for either color; it is stored from red's side.
    #[instrument(skip(board))]
    pub fn with_board(id: MatchId, red: Player, white: Player, board: BoardView) -> Self {
        let board = board.view_for(Color::Red);
        info!(match_id = id, %red, %white, pieces = board.pieces().count(), "Match created");
        Self {
            id,
            red,
            white,
            initial_board: board.clone(),
            board,
            active: Color::Red,
            validator: MoveValidator::new(),
            log: Vec::new(),
            turn_start: 0,
            committed_turns: Vec::new(),
            status: MatchStatus::InProgress(Color::Red),
        }
    }

    /// Match identifier.
    pub fn id(&self) -> MatchId {
        self.id
    }

    /// Current lifecycle state.
    pub fn status(&self) -> &MatchStatus {
        &self.status
    }

    /// True once the match has finished.
    pub fn is_done(&self) -> bool {
        matches!(self.status, MatchStatus::Done(_))
    }

    /// The completion reason, or the in-progress text.
    pub fn status_text(&self) -> &str {
        match &self.status {
            MatchStatus::Done(reason) => reason,
            MatchStatus::InProgress(_) => IN_PROGRESS_TEXT,
        }
    }

    /// The board as `color` sees it.
    pub fn board(&self, color: Color) -> BoardView {
        self.board.view_for(color)
    }

    /// The board in red's layout, without copying.
    pub fn canonical_board(&self) -> &BoardView {
        &self.board
    }

    /// Color to move.
    pub fn active_color(&self) -> Color {
        self.active
    }

    /// Color waiting for its turn.
    pub fn inactive_color(&self) -> Color {
        self.active.opponent()
    }

    /// Player to move.
    pub fn active_player(&self) -> &Player {
        self.player(self.active)
    }

    /// Player holding `color`.
    pub fn player(&self, color: Color) -> &Player {
        match color {
            Color::Red => &self.red,
            Color::White => &self.white,
        }
    }

    /// Color held by `player`, if they play in this match.
    pub fn color_of(&self, player: &Player) -> Option<Color> {
        if *player == self.red {
            Some(Color::Red)
        } else if *player == self.white {
            Some(Color::White)
        } else {
            None
        }
    }

    /// True when `player` is one of the two participants.
    pub fn is_player_in_this_game(&self, player: &Player) -> bool {
        self.color_of(player).is_some()
    }

    /// True when `player` is the one to move in a running match.
    pub fn is_players_turn(&self, player: &Player) -> bool {
        !self.is_done() && self.color_of(player) == Some(self.active)
    }

    /// Every applied move, in red's perspective.
    pub fn log(&self) -> Vec<Move> {
        self.log.iter().map(AppliedMove::mv).collect()
    }

    /// The applied-move records behind [`Match::log`].
    pub fn applied_log(&self) -> &[AppliedMove] {
        &self.log
    }

    /// The position the match started from, in red's layout.
    pub fn initial_board(&self) -> &BoardView {
        &self.initial_board
    }

    /// Pieces on the board when the match was created.
    pub fn initial_pieces(&self) -> usize {
        self.initial_board.pieces().count()
    }

    /// Sub-moves accepted in the current turn, in the mover's perspective.
    pub fn turn_moves(&self) -> &[Move] {
        self.validator.turn_moves()
    }

    /// Judges a sub-move given in the active color's perspective.
    #[instrument(skip(self), fields(match_id = self.id, active = %self.active))]
    pub fn validate_move(&mut self, mv: Move) -> Result<(), MoveError> {
        let view = self.board(self.active);
        self.validator.validate_move(mv, self.active, &view)
    }

    /// Decides whether the active color may end its turn.
    #[instrument(skip(self), fields(match_id = self.id, active = %self.active))]
    pub fn validate_turn(&mut self) -> Result<(), MoveError> {
        let view = self.board(self.active);
        self.validator.validate_turn(&view, self.active)
    }

    /// True when the active color must capture.
    pub fn is_available_capture(&self) -> bool {
        self.validator
            .is_available_capture(&self.board(self.active), self.active)
    }

    /// Applies a sub-move given in the active color's perspective.
    ///
    /// The move is not validated here; see [`Match::validate_move`].
    #[instrument(skip(self), fields(match_id = self.id, active = %self.active))]
    pub fn make_move(&mut self, mv: Move) -> AppliedMove {
        let canonical = match self.active {
            Color::Red => mv,
            Color::White => mv.reflect(),
        };
        let applied = apply_move(&mut self.board, canonical);
        self.log.push(applied);
        debug!(%canonical, log_len = self.log.len(), "Move logged");

        #[cfg(debug_assertions)]
        self.assert_invariants();

        applied
    }

    /// Hands the move to the other color.
    #[instrument(skip(self), fields(match_id = self.id))]
    pub fn end_turn(&mut self) {
        self.committed_turns.push(self.turn_start);
        self.turn_start = self.log.len();
        self.pass_turn();
        info!(active = %self.active, "Turn ended");
    }

    fn pass_turn(&mut self) {
        self.active = self.active.opponent();
        if let MatchStatus::InProgress(active) = &mut self.status {
            *active = self.active;
        }
    }

    /// Finishes the match if one color has no pieces left.
    #[instrument(skip(self), fields(match_id = self.id))]
    pub fn check_for_victory(&mut self) -> bool {
        let Some(winner) = check_winner(&self.board) else {
            return false;
        };
        let reason = format!("{} has captured all the pieces.", self.player(winner));
        self.mark_done(reason);
        true
    }

    /// Ends the match. The first reason given is kept.
    #[instrument(skip(self, reason), fields(match_id = self.id))]
    pub fn mark_done(&mut self, reason: impl Into<String>) {
        if self.is_done() {
            debug!("Match already finished");
            return;
        }
        let reason = reason.into();
        info!(%reason, moves = self.log.len(), "Match finished");
        self.status = MatchStatus::Done(reason);
    }

    /// Takes back the newest move of the permanent log.
    ///
    /// If the current turn had no sub-moves, the move belonged to the
    /// previous turn: that turn is reopened for its mover with the sub-moves
    /// it still has, so the capture-chain rules apply to what follows.
    #[instrument(skip(self), fields(match_id = self.id))]
    pub fn undo_move(&mut self) -> Result<Move, MoveError> {
        let Some(applied) = self.log.pop() else {
            warn!("Nothing to undo");
            return Err(MoveError::NoHistory);
        };
        revert_move(&mut self.board, &applied);

        if self.log.len() < self.turn_start {
            self.turn_start = self.committed_turns.pop().unwrap_or(0);
            self.pass_turn();
            let resumed = self.log.get(self.turn_start..).unwrap_or_default();
            let resumed = resumed
                .iter()
                .map(|entry| match self.active {
                    Color::Red => entry.mv(),
                    Color::White => entry.mv().reflect(),
                })
                .collect();
            self.validator.resume_turn(resumed);
            info!(active = %self.active, "Previous turn reopened");
        } else {
            self.validator.undo_last();
        }
        info!(mv = %applied.mv(), "Move undone");

        #[cfg(debug_assertions)]
        self.assert_invariants();

        Ok(applied.mv())
    }

    /// Immutable record of this match for replays.
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot::new(
            self.id,
            self.red.clone(),
            self.white.clone(),
            self.log(),
            self.status_text().to_string(),
        )
        .with_initial_board(self.initial_board.clone())
    }

    #[cfg(debug_assertions)]
    fn assert_invariants(&self) {
        let result = CheckersInvariants::check_all(self);
        if let Err(violations) = &result {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            warn!(%descriptions, "Match invariants violated");
        }
        debug_assert!(result.is_ok(), "Match invariants violated");
    }
}

impl std::fmt::Display for Match {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} vs {}", self.id, self.red, self.white)
    }
}
