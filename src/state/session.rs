//! Per-browser session state and the registry holding every live session.

use std::time::{Duration, Instant};

use dashmap::DashMap;
use rand::Rng;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::state::{
    game::{Track, shuffled_order},
    state_machine::{
        CollectingStatus, GamePhase, InvalidTransition, SessionEvent, SessionStateMachine,
        Snapshot,
    },
};

/// Identifier carried by clients to find their session again.
pub type SessionId = Uuid;

/// Reasons a session-level game action can be refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The event does not apply to the current phase.
    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),
    /// A game cannot start without any track.
    #[error("cannot start a game with an empty playlist")]
    EmptyPlaylist,
}

/// State kept for a single participant session.
#[derive(Debug, Clone)]
pub struct PlayerSession {
    id: SessionId,
    machine: SessionStateMachine,
    current_index: usize,
    shuffled_playlist: Option<Vec<Track>>,
    my_last_add: Option<Track>,
    registered_name: Option<String>,
    last_seen: Instant,
}

impl PlayerSession {
    /// Fresh session in the collecting phase.
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            machine: SessionStateMachine::new(),
            current_index: 0,
            shuffled_playlist: None,
            my_last_add: None,
            registered_name: None,
            last_seen: Instant::now(),
        }
    }

    /// Identifier of this session.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Current phase.
    pub fn phase(&self) -> GamePhase {
        self.machine.phase()
    }

    /// Phase together with the number of transitions applied so far.
    pub fn snapshot(&self) -> Snapshot {
        self.machine.snapshot()
    }

    /// Whether a game is playing or finished.
    pub fn game_started(&self) -> bool {
        self.machine.phase().game_started()
    }

    /// Zero-based position in the shuffled order.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Play order fixed at the last start, if any.
    pub fn shuffled_playlist(&self) -> Option<&[Track]> {
        self.shuffled_playlist.as_deref()
    }

    /// Last track submitted from this session, available for undo.
    pub fn my_last_add(&self) -> Option<&Track> {
        self.my_last_add.as_ref()
    }

    /// Display name registered for this session.
    pub fn registered_name(&self) -> Option<&str> {
        self.registered_name.as_deref()
    }

    /// Track at the current position of the play order, if any remains.
    pub fn current_track(&self) -> Option<&Track> {
        self.shuffled_playlist
            .as_ref()
            .and_then(|order| order.get(self.current_index))
    }

    /// Number of tracks in the play order (zero before the first start).
    pub fn order_len(&self) -> usize {
        self.shuffled_playlist.as_ref().map_or(0, Vec::len)
    }

    /// Launch a game over `playlist`, shuffled with `rng`. The index restarts at zero.
    pub fn start_game<R>(&mut self, playlist: &[Track], rng: &mut R) -> Result<GamePhase, SessionError>
    where
        R: Rng + ?Sized,
    {
        self.machine.check(SessionEvent::StartGame)?;
        if playlist.is_empty() {
            return Err(SessionError::EmptyPlaylist);
        }

        let phase = self.machine.apply(SessionEvent::StartGame)?;
        self.shuffled_playlist = Some(shuffled_order(playlist, rng));
        self.current_index = 0;
        Ok(phase)
    }

    /// Return to a paused game, keeping its order and index.
    pub fn resume_game(&mut self) -> Result<GamePhase, SessionError> {
        Ok(self.machine.apply(SessionEvent::ResumeGame)?)
    }

    /// Advance to the next track, finishing the game after the last one.
    pub fn next_track(&mut self) -> Result<GamePhase, SessionError> {
        let event = if self.current_index + 1 < self.order_len() {
            SessionEvent::NextTrack
        } else {
            SessionEvent::Finish
        };

        let phase = self.machine.apply(event)?;
        self.current_index += 1;
        Ok(phase)
    }

    /// Leave playback for the menu without losing progress.
    pub fn back_to_menu(&mut self) -> Result<GamePhase, SessionError> {
        Ok(self.machine.apply(SessionEvent::BackToMenu)?)
    }

    /// Close a finished game and reopen submissions.
    pub fn restart(&mut self) -> Result<GamePhase, SessionError> {
        let phase = self.machine.apply(SessionEvent::Restart)?;
        self.current_index = 0;
        self.shuffled_playlist = None;
        Ok(phase)
    }

    /// Whether submissions and undo are accepted right now.
    pub fn is_collecting(&self) -> bool {
        matches!(self.phase(), GamePhase::Collecting(_))
    }

    /// Whether a paused game is waiting to be resumed.
    pub fn is_paused(&self) -> bool {
        self.phase() == GamePhase::Collecting(CollectingStatus::Paused)
    }

    /// Remember `track` as this session's last submission.
    pub fn record_submission(&mut self, track: Track) {
        self.my_last_add = Some(track);
    }

    /// Forget the last submission.
    pub fn clear_last_add(&mut self) {
        self.my_last_add = None;
    }

    /// Store the display name used when a submission omits one.
    pub fn register_name(&mut self, name: String) {
        self.registered_name = Some(name);
    }

    fn touch(&mut self) {
        self.last_seen = Instant::now();
    }
}

/// Registry of live sessions keyed by their identifier.
///
/// Sessions are created on first access and evicted once idle for longer than the configured
/// timeout. Closures passed to the accessors run under the map's entry lock, so they must not
/// block or await.
pub struct SessionRegistry {
    sessions: DashMap<SessionId, PlayerSession>,
    idle_timeout: Duration,
}

impl SessionRegistry {
    /// Empty registry evicting sessions idle for longer than `idle_timeout`.
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            idle_timeout,
        }
    }

    /// Read a session, creating it first when unknown.
    pub fn with_session<T>(&self, id: SessionId, f: impl FnOnce(&PlayerSession) -> T) -> T {
        self.with_session_mut(id, |session| f(session))
    }

    /// Mutate a session, creating it first when unknown.
    pub fn with_session_mut<T>(&self, id: SessionId, f: impl FnOnce(&mut PlayerSession) -> T) -> T {
        let mut entry = self
            .sessions
            .entry(id)
            .or_insert_with(|| PlayerSession::new(id));
        entry.touch();
        f(entry.value_mut())
    }

    /// Drop every piece of state held for `id`. The next access starts from scratch.
    pub fn clear(&self, id: SessionId) {
        self.sessions.remove(&id);
    }

    /// Evict sessions idle for longer than the timeout, returning how many were removed.
    pub fn purge_idle(&self) -> usize {
        let before = self.sessions.len();
        self.sessions
            .retain(|_, session| session.last_seen.elapsed() <= self.idle_timeout);
        let removed = before.saturating_sub(self.sessions.len());
        if removed > 0 {
            debug!(removed, "evicted idle sessions");
        }
        removed
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no session is live.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn playlist(len: usize) -> Vec<Track> {
        (0..len)
            .map(|i| Track::new(format!("user{i}"), format!("vid{i}"), format!("https://youtu.be/vid{i}")))
            .collect()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn start_materialises_permutation_at_index_zero() {
        let tracks = playlist(5);
        let mut session = PlayerSession::new(Uuid::new_v4());

        session.start_game(&tracks, &mut rng()).unwrap();

        assert!(session.game_started());
        assert_eq!(session.current_index(), 0);
        let mut order = session.shuffled_playlist().unwrap().to_vec();
        order.sort_by(|a, b| a.video_id.cmp(&b.video_id));
        assert_eq!(order, tracks);
    }

    #[test]
    fn start_refuses_empty_playlist() {
        let mut session = PlayerSession::new(Uuid::new_v4());
        assert_eq!(
            session.start_game(&[], &mut rng()),
            Err(SessionError::EmptyPlaylist)
        );
        assert!(!session.game_started());
    }

    #[test]
    fn next_reaches_length_then_finishes_and_restart_resets() {
        let mut session = PlayerSession::new(Uuid::new_v4());
        session.start_game(&playlist(3), &mut rng()).unwrap();

        assert_eq!(session.next_track().unwrap(), GamePhase::Playing);
        assert_eq!(session.next_track().unwrap(), GamePhase::Playing);
        assert_eq!(session.next_track().unwrap(), GamePhase::Finished);
        assert_eq!(session.current_index(), 3);
        assert!(session.current_track().is_none());

        assert!(session.next_track().is_err());
        assert_eq!(session.current_index(), 3);

        assert_eq!(
            session.restart().unwrap(),
            GamePhase::Collecting(CollectingStatus::Fresh)
        );
        assert_eq!(session.current_index(), 0);
        assert!(!session.game_started());
        assert!(session.shuffled_playlist().is_none());
    }

    #[test]
    fn pause_preserves_index_and_order() {
        let mut session = PlayerSession::new(Uuid::new_v4());
        session.start_game(&playlist(4), &mut rng()).unwrap();
        session.next_track().unwrap();
        let order = session.shuffled_playlist().unwrap().to_vec();

        session.back_to_menu().unwrap();
        assert!(session.is_paused());
        assert!(session.is_collecting());

        session.resume_game().unwrap();
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.shuffled_playlist().unwrap(), order.as_slice());
        assert_eq!(session.snapshot().version, 4);
    }

    #[test]
    fn restart_is_rejected_mid_game() {
        let mut session = PlayerSession::new(Uuid::new_v4());
        session.start_game(&playlist(2), &mut rng()).unwrap();
        assert!(matches!(
            session.restart(),
            Err(SessionError::InvalidTransition(_))
        ));
        assert_eq!(session.phase(), GamePhase::Playing);
    }

    #[test]
    fn registry_creates_on_first_access_and_clears() {
        let registry = SessionRegistry::new(Duration::from_secs(60));
        let id = Uuid::new_v4();

        registry.with_session_mut(id, |session| session.register_name("Alice".into()));
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.with_session(id, |s| s.registered_name().map(str::to_owned)),
            Some("Alice".to_string())
        );

        registry.clear(id);
        assert!(registry.is_empty());
        assert!(registry.with_session(id, |s| s.registered_name().is_none()));
    }

    #[test]
    fn purge_evicts_idle_sessions() {
        let registry = SessionRegistry::new(Duration::ZERO);
        registry.with_session(Uuid::new_v4(), |_| ());
        std::thread::sleep(Duration::from_millis(5));

        assert_eq!(registry.purge_idle(), 1);
        assert!(registry.is_empty());
    }
}
