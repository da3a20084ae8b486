/// Track type and shuffling.
pub mod game;
/// Per-session state and the session registry.
pub mod session;
/// Phase transitions of a session's game.
pub mod state_machine;

use std::sync::Arc;

use crate::{
    config::AppConfig,
    dao::{
        cache::{PlaylistCache, TtlCache},
        playlist::PlaylistRepository,
        playlist_store::PlaylistStore,
    },
};

pub use self::session::{PlayerSession, SessionError, SessionId, SessionRegistry};
pub use self::state_machine::{CollectingStatus, GamePhase, Snapshot};

/// Application state shared across handlers.
pub type SharedState = Arc<AppState>;

/// Central application state: configuration, the shared playlist and the live sessions.
pub struct AppState {
    config: AppConfig,
    playlist: PlaylistRepository,
    sessions: SessionRegistry,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    ///
    /// Reads of the playlist go through a [`TtlCache`] sized from the configuration.
    pub fn new(config: AppConfig, store: Arc<dyn PlaylistStore>) -> SharedState {
        let cache = Arc::new(TtlCache::new(config.cache_ttl()));
        Self::with_cache(config, store, cache)
    }

    /// Same as [`AppState::new`] with an explicit cache implementation.
    pub fn with_cache(
        config: AppConfig,
        store: Arc<dyn PlaylistStore>,
        cache: Arc<dyn PlaylistCache>,
    ) -> SharedState {
        let playlist = PlaylistRepository::new(store, cache, config.record_layout());
        let sessions = SessionRegistry::new(config.session_idle_timeout());
        Arc::new(Self {
            config,
            playlist,
            sessions,
        })
    }

    /// Loaded configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Repository for the shared playlist document.
    pub fn playlist(&self) -> &PlaylistRepository {
        &self.playlist
    }

    /// Registry of per-participant sessions.
    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    /// Whether `passphrase` grants host privileges.
    pub fn is_host(&self, passphrase: Option<&str>) -> bool {
        passphrase.is_some_and(|value| self.config.is_admin_passphrase(value))
    }
}
