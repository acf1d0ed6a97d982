//! Shared registry of finished matches and the viewers replaying them.

use crate::games::checkers::{MatchId, MatchSnapshot, Player, ReplayCursor, ReplayError};
use crate::session::SessionError;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, instrument};

#[derive(Debug, Default)]
struct RegistryState {
    saved: BTreeMap<MatchId, Arc<MatchSnapshot>>,
    viewers: HashMap<Player, HashMap<MatchId, ReplayCursor>>,
}

/// Saved snapshots plus one personal cursor per (viewer, match).
///
/// Cloning shares the same registry.
#[derive(Debug, Clone, Default)]
pub struct ReplayRegistry {
    state: Arc<Mutex<RegistryState>>,
    capacity: Option<usize>,
}

impl ReplayRegistry {
    /// Creates an unbounded registry.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry keeping at most `capacity` snapshots, when given.
    ///
    /// Past the limit the lowest match ids are evicted first. A capacity of
    /// zero keeps nothing; configuration files refuse it.
    #[instrument]
    pub fn with_capacity(capacity: Option<usize>) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    /// Maximum number of saved snapshots, if bounded.
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    fn lock(&self) -> Result<MutexGuard<'_, RegistryState>, SessionError> {
        self.state.lock().map_err(|_| SessionError::Poisoned)
    }

    /// Stores `snapshot`, replacing any earlier one for the same match.
    ///
    /// Viewers already replaying the match keep their cursor on the snapshot
    /// they opened.
    #[instrument(skip(self, snapshot), fields(match_id = snapshot.id()))]
    pub fn save_replay(&self, snapshot: MatchSnapshot) -> Result<(), SessionError> {
        let mut state = self.lock()?;
        let replaced = state
            .saved
            .insert(snapshot.id(), Arc::new(snapshot))
            .is_some();

        if let Some(capacity) = self.capacity {
            while state.saved.len() > capacity {
                if let Some((evicted, _)) = state.saved.pop_first() {
                    info!(evicted, "Evicted oldest replay");
                }
            }
        }

        info!(replaced, saved = state.saved.len(), "Replay saved");
        Ok(())
    }

    /// The saved snapshot of `match_id`, if any.
    #[instrument(skip(self))]
    pub fn saved(&self, match_id: MatchId) -> Result<Option<Arc<MatchSnapshot>>, SessionError> {
        Ok(self.lock()?.saved.get(&match_id).cloned())
    }

    /// Runs `f` against `viewer`'s cursor on `match_id`.
    ///
    /// The cursor is created at the start of the replay on first use.
    #[instrument(skip(self, f))]
    pub fn get_replay<T>(
        &self,
        match_id: MatchId,
        viewer: &Player,
        f: impl FnOnce(&mut ReplayCursor) -> T,
    ) -> Result<T, SessionError> {
        let mut state = self.lock()?;
        let RegistryState { saved, viewers } = &mut *state;

        let open = viewers
            .get(viewer)
            .is_some_and(|cursors| cursors.contains_key(&match_id));
        if !open {
            let Some(snapshot) = saved.get(&match_id) else {
                debug!("No saved replay");
                return Err(ReplayError::NotFound { match_id }.into());
            };
            debug!("Opening replay cursor");
            viewers
                .entry(viewer.clone())
                .or_default()
                .insert(match_id, ReplayCursor::new(Arc::clone(snapshot)));
        }

        let cursor = viewers
            .get_mut(viewer)
            .and_then(|cursors| cursors.get_mut(&match_id))
            .ok_or(ReplayError::NotFound { match_id })?;
        Ok(f(cursor))
    }

    /// Discards `viewer`'s cursor on `match_id`. Returns false if none was open.
    #[instrument(skip(self))]
    pub fn end_replay(&self, match_id: MatchId, viewer: &Player) -> Result<bool, SessionError> {
        let mut state = self.lock()?;
        let Some(cursors) = state.viewers.get_mut(viewer) else {
            return Ok(false);
        };
        let removed = cursors.remove(&match_id).is_some();
        if cursors.is_empty() {
            state.viewers.remove(viewer);
        }
        debug!(removed, "Replay closed");
        Ok(removed)
    }

    /// Every saved snapshot, ordered by match id.
    #[instrument(skip(self))]
    pub fn to_list(&self) -> Result<Vec<Arc<MatchSnapshot>>, SessionError> {
        Ok(self.lock()?.saved.values().cloned().collect())
    }

    /// Number of viewers with at least one open cursor.
    #[instrument(skip(self))]
    pub fn active_viewers(&self) -> Result<usize, SessionError> {
        Ok(self.lock()?.viewers.len())
    }
}
