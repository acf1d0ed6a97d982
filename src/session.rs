//! Match management for concurrent callers.
//!
//! [`MatchManager`] is the service facade over the engine: it pairs players,
//! routes moves to the right match and hands finished matches to the
//! [`ReplayRegistry`]. Every match sits behind its own mutex, so requests for
//! different matches never wait on each other.

use crate::config::CheckersConfig;
use crate::games::checkers::{
    BoardView, Color, Match, MatchId, MatchSnapshot, Move, MoveOutcome, Player, ReplayError,
};
use crate::replays::ReplayRegistry;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use tracing::{debug, info, instrument, warn};

/// Sent when a move arrives for a finished match.
pub const MATCH_OVER_MOVE_TEXT: &str = " You can't make a move because your opponent already resigned. Click my home to enter a game.";

/// Sent when a finished match is asked to end a turn or back up.
pub const MATCH_OVER_TEXT: &str = "The game is already over.";

/// Caller errors from the match service.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum SessionError {
    /// No match has this id.
    #[display("No match with id {match_id}")]
    UnknownMatch {
        /// Requested match.
        match_id: MatchId,
    },

    /// The player does not play in the match.
    #[display("{player} does not play in match {match_id}")]
    NotAParticipant {
        /// Offending player.
        player: Player,
        /// Requested match.
        match_id: MatchId,
    },

    /// The player is still playing another match.
    #[display("{player} is already playing match {match_id}")]
    PlayerBusy {
        /// Busy player.
        player: Player,
        /// Match the player is in.
        match_id: MatchId,
    },

    /// Both seats were given to the same player.
    #[display("{player} cannot play against themselves")]
    SamePlayer {
        /// The duplicated player.
        player: Player,
    },

    /// A lock was poisoned by a panicking thread.
    #[display("Match state lock poisoned")]
    Poisoned,

    /// Replay lookup or step failed.
    #[display("{_0}")]
    #[from]
    Replay(ReplayError),
}

type MatchHandle = Arc<Mutex<Match>>;

/// Owns every live match and the shared replay registry.
///
/// Cloning shares the same matches.
#[derive(Debug, Clone)]
pub struct MatchManager {
    matches: Arc<RwLock<BTreeMap<MatchId, MatchHandle>>>,
    players: Arc<Mutex<HashMap<Player, MatchId>>>,
    next_id: Arc<AtomicU64>,
    replays: ReplayRegistry,
}

impl MatchManager {
    /// Creates a manager saving finished matches into `replays`.
    #[instrument(skip(replays))]
    pub fn new(replays: ReplayRegistry) -> Self {
        info!(capacity = ?replays.capacity(), "Creating match manager");
        Self {
            matches: Arc::new(RwLock::new(BTreeMap::new())),
            players: Arc::new(Mutex::new(HashMap::new())),
            next_id: Arc::new(AtomicU64::new(0)),
            replays,
        }
    }

    /// Creates a manager with a registry sized by `config`.
    #[instrument(skip(config))]
    pub fn from_config(config: &CheckersConfig) -> Self {
        Self::new(ReplayRegistry::with_capacity(*config.max_saved_replays()))
    }

    /// The registry finished matches are saved into.
    pub fn replay_registry(&self) -> &ReplayRegistry {
        &self.replays
    }

    fn handle(&self, match_id: MatchId) -> Result<MatchHandle, SessionError> {
        let matches = self.matches.read().map_err(|_| SessionError::Poisoned)?;
        matches.get(&match_id).cloned().ok_or_else(|| {
            warn!(match_id, "Unknown match");
            SessionError::UnknownMatch { match_id }
        })
    }

    /// Runs `f` while holding the match lock.
    fn with_match<T>(
        &self,
        match_id: MatchId,
        f: impl FnOnce(&mut Match) -> T,
    ) -> Result<T, SessionError> {
        let handle = self.handle(match_id)?;
        let mut game = handle.lock().map_err(|_| SessionError::Poisoned)?;
        Ok(f(&mut game))
    }

    fn save(&self, snapshot: Option<MatchSnapshot>) -> Result<(), SessionError> {
        match snapshot {
            Some(snapshot) => self.replays.save_replay(snapshot),
            None => Ok(()),
        }
    }

    /// Pairs `red` and `white` in a new match, red to move.
    #[instrument(skip(self))]
    pub fn create_match(&self, red: Player, white: Player) -> Result<MatchId, SessionError> {
        if red == white {
            warn!("Player paired with themselves");
            return Err(SessionError::SamePlayer { player: red });
        }

        let mut players = self.players.lock().map_err(|_| SessionError::Poisoned)?;
        for player in [&red, &white] {
            if let Some(&match_id) = players.get(player)
                && !self.is_done(match_id)?.0
            {
                warn!(%player, match_id, "Player already in a match");
                return Err(SessionError::PlayerBusy {
                    player: player.clone(),
                    match_id,
                });
            }
        }

        let match_id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let game = Match::new(match_id, red.clone(), white.clone());
        self.matches
            .write()
            .map_err(|_| SessionError::Poisoned)?
            .insert(match_id, Arc::new(Mutex::new(game)));
        players.insert(red, match_id);
        players.insert(white, match_id);

        info!(match_id, "Match registered");
        Ok(match_id)
    }

    /// Validates a sub-move for the active color and applies it if legal.
    #[instrument(skip(self))]
    pub fn submit_move(&self, match_id: MatchId, mv: Move) -> Result<MoveOutcome, SessionError> {
        self.with_match(match_id, |game| {
            if game.is_done() {
                warn!("Move submitted to a finished match");
                return MoveOutcome::error(MATCH_OVER_MOVE_TEXT);
            }
            match game.validate_move(mv) {
                Ok(()) => {
                    game.make_move(mv);
                    MoveOutcome::info(MoveOutcome::VALID_MOVE)
                }
                Err(err) => err.into(),
            }
        })
    }

    /// Commits the active color's turn and checks for victory.
    ///
    /// A won match is saved for replay.
    #[instrument(skip(self))]
    pub fn end_turn(&self, match_id: MatchId) -> Result<MoveOutcome, SessionError> {
        let (outcome, finished) = self.with_match(match_id, |game| {
            if game.is_done() {
                debug!("Turn ended on a finished match");
                return (MoveOutcome::info(MATCH_OVER_TEXT), None);
            }
            if let Err(err) = game.validate_turn() {
                return (err.into(), None);
            }
            game.end_turn();
            let finished = game.check_for_victory().then(|| game.snapshot());
            (MoveOutcome::info(MoveOutcome::VALID_TURN), finished)
        })?;
        self.save(finished)?;
        Ok(outcome)
    }

    /// Backs up the newest move of the match.
    #[instrument(skip(self))]
    pub fn undo(&self, match_id: MatchId) -> Result<MoveOutcome, SessionError> {
        self.with_match(match_id, |game| {
            if game.is_done() {
                return MoveOutcome::error(MATCH_OVER_TEXT);
            }
            MoveOutcome::from_result(game.undo_move().map(|_| ()), MoveOutcome::BACKED_UP)
        })
    }

    /// `player` gives up; the match ends and is saved for replay.
    #[instrument(skip(self))]
    pub fn resign(&self, match_id: MatchId, player: &Player) -> Result<(), SessionError> {
        let snapshot = self.with_match(match_id, |game| {
            if !game.is_player_in_this_game(player) {
                warn!(%player, "Resignation from a non-participant");
                return Err(SessionError::NotAParticipant {
                    player: player.clone(),
                    match_id,
                });
            }
            game.mark_done(format!("{player} has resigned."));
            Ok(game.snapshot())
        })??;
        self.replays.save_replay(snapshot)
    }

    /// Ends the match for `reason` and saves it for replay.
    ///
    /// A match that already finished keeps its first reason, but the saved
    /// snapshot is refreshed.
    #[instrument(skip(self))]
    pub fn force_end(&self, match_id: MatchId, reason: &str) -> Result<(), SessionError> {
        let snapshot = self.with_match(match_id, |game| {
            game.mark_done(reason);
            game.snapshot()
        })?;
        self.replays.save_replay(snapshot)
    }

    /// The board as `color` sees it.
    #[instrument(skip(self))]
    pub fn board(&self, match_id: MatchId, color: Color) -> Result<BoardView, SessionError> {
        self.with_match(match_id, |game| game.board(color))
    }

    /// The board as `player` sees it.
    #[instrument(skip(self))]
    pub fn board_for_player(
        &self,
        match_id: MatchId,
        player: &Player,
    ) -> Result<BoardView, SessionError> {
        self.with_match(match_id, |game| {
            game.color_of(player)
                .map(|color| game.board(color))
                .ok_or_else(|| SessionError::NotAParticipant {
                    player: player.clone(),
                    match_id,
                })
        })?
    }

    /// Color to move.
    #[instrument(skip(self))]
    pub fn active_color(&self, match_id: MatchId) -> Result<Color, SessionError> {
        self.with_match(match_id, |game| game.active_color())
    }

    /// True when `player` is to move in a running match.
    #[instrument(skip(self))]
    pub fn is_players_turn(&self, match_id: MatchId, player: &Player) -> Result<bool, SessionError> {
        self.with_match(match_id, |game| game.is_players_turn(player))
    }

    /// Whether the match is over, with its status text.
    #[instrument(skip(self))]
    pub fn is_done(&self, match_id: MatchId) -> Result<(bool, String), SessionError> {
        self.with_match(match_id, |game| (game.is_done(), game.status_text().to_string()))
    }

    /// The most recent match `player` was paired into.
    #[instrument(skip(self))]
    pub fn match_for_player(&self, player: &Player) -> Result<Option<MatchId>, SessionError> {
        let players = self.players.lock().map_err(|_| SessionError::Poisoned)?;
        Ok(players.get(player).copied())
    }

    /// Opens (or reuses) `viewer`'s replay of a saved match.
    #[instrument(skip(self))]
    pub fn open_replay(&self, match_id: MatchId, viewer: &Player) -> Result<(), SessionError> {
        self.replays.get_replay(match_id, viewer, |cursor| {
            debug!(cursor = cursor.cursor(), len = cursor.len(), "Replay open");
        })
    }

    /// Steps `viewer`'s replay forward. False when already at the end.
    #[instrument(skip(self))]
    pub fn step_forward(&self, match_id: MatchId, viewer: &Player) -> Result<bool, SessionError> {
        self.replays
            .get_replay(match_id, viewer, |cursor| cursor.next_move().is_ok())
    }

    /// Steps `viewer`'s replay back. False when already at the start.
    #[instrument(skip(self))]
    pub fn step_backward(&self, match_id: MatchId, viewer: &Player) -> Result<bool, SessionError> {
        self.replays
            .get_replay(match_id, viewer, |cursor| cursor.last_move().is_ok())
    }

    /// The board at `viewer`'s replay cursor, as `color` sees it.
    #[instrument(skip(self))]
    pub fn replay_board(
        &self,
        match_id: MatchId,
        viewer: &Player,
        color: Color,
    ) -> Result<BoardView, SessionError> {
        self.replays
            .get_replay(match_id, viewer, |cursor| cursor.board(color))
    }

    /// Closes `viewer`'s replay of a match.
    #[instrument(skip(self))]
    pub fn close_replay(&self, match_id: MatchId, viewer: &Player) -> Result<(), SessionError> {
        self.replays.end_replay(match_id, viewer).map(|_| ())
    }

    /// Every saved match, ordered by id.
    #[instrument(skip(self))]
    pub fn finished_matches(&self) -> Result<Vec<Arc<MatchSnapshot>>, SessionError> {
        self.replays.to_list()
    }
}

impl Default for MatchManager {
    fn default() -> Self {
        Self::new(ReplayRegistry::new())
    }
}
