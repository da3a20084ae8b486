//! Host-only game lifecycle operations. Each one acts on the invoking session only.

use tracing::{info, warn};

use crate::{
    error::ServiceError,
    state::{SharedState, game::Track, session::SessionId, state_machine::GamePhase},
};

/// Shuffle the current shared playlist into this session's play order and start playing.
pub async fn start_game(state: &SharedState, session_id: SessionId) -> Result<GamePhase, ServiceError> {
    let playlist = state
        .playlist()
        .load()
        .await?
        .into_iter()
        .map(Track::from)
        .collect::<Vec<_>>();

    let phase = state.sessions().with_session_mut(session_id, |session| {
        session.start_game(&playlist, &mut rand::rng())
    })?;
    info!(%session_id, tracks = playlist.len(), "game started");
    Ok(phase)
}

/// Go back to a paused game where it was left.
pub fn resume_game(state: &SharedState, session_id: SessionId) -> Result<GamePhase, ServiceError> {
    let phase = state
        .sessions()
        .with_session_mut(session_id, |session| session.resume_game())?;
    info!(%session_id, "game resumed");
    Ok(phase)
}

/// Move to the next track of the shuffled order.
pub fn next_track(state: &SharedState, session_id: SessionId) -> Result<GamePhase, ServiceError> {
    let (phase, index) = state.sessions().with_session_mut(session_id, |session| {
        session
            .next_track()
            .map(|phase| (phase, session.current_index()))
    })?;
    info!(%session_id, index, ?phase, "advanced to next track");
    Ok(phase)
}

/// Leave playback for the menu, keeping the order and position for a later resume.
pub fn pause_game(state: &SharedState, session_id: SessionId) -> Result<GamePhase, ServiceError> {
    let phase = state
        .sessions()
        .with_session_mut(session_id, |session| session.back_to_menu())?;
    info!(%session_id, "game paused");
    Ok(phase)
}

/// Close a finished game and reopen submissions.
pub fn restart_game(state: &SharedState, session_id: SessionId) -> Result<GamePhase, ServiceError> {
    let phase = state
        .sessions()
        .with_session_mut(session_id, |session| session.restart())?;
    info!(%session_id, "game restarted");
    Ok(phase)
}

/// Empty the shared playlist and wipe the invoking session.
///
/// Other sessions keep whatever they hold in memory. When the store write fails the session is
/// left as it was.
pub async fn reset(state: &SharedState, session_id: SessionId) -> Result<(), ServiceError> {
    if let Err(err) = state.playlist().clear().await {
        warn!(%session_id, error = %err, "playlist reset failed");
        return Err(err.into());
    }

    state.sessions().clear(session_id);
    info!(%session_id, "playlist and session reset");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;
    use uuid::Uuid;

    use super::*;
    use crate::{
        config::AppConfig,
        dao::{cache::NoCache, playlist_store::memory::MemoryPlaylistStore},
        state::{AppState, state_machine::CollectingStatus},
    };

    fn setup(record: serde_json::Value) -> (SharedState, MemoryPlaylistStore) {
        let store = MemoryPlaylistStore::with_record(record);
        let state = AppState::with_cache(AppConfig::default(), Arc::new(store.clone()), Arc::new(NoCache));
        (state, store)
    }

    fn three_tracks() -> serde_json::Value {
        json!([
            {"user": "Alice", "id": "a1", "link": "https://youtu.be/a1"},
            {"user": "Bob", "id": "b2", "link": "https://youtu.be/b2"},
            {"user": "Carol", "id": "c3", "link": "https://youtu.be/c3"}
        ])
    }

    #[tokio::test]
    async fn start_shuffles_a_permutation_of_the_playlist() {
        let (state, _store) = setup(three_tracks());
        let id = Uuid::new_v4();

        assert_eq!(start_game(&state, id).await.unwrap(), GamePhase::Playing);

        let mut ids = state.sessions().with_session(id, |s| {
            assert_eq!(s.current_index(), 0);
            s.shuffled_playlist()
                .unwrap()
                .iter()
                .map(|t| t.video_id.clone())
                .collect::<Vec<_>>()
        });
        ids.sort();
        assert_eq!(ids, vec!["a1", "b2", "c3"]);
    }

    #[tokio::test]
    async fn start_with_empty_playlist_is_rejected() {
        let (state, _store) = setup(json!([]));
        let id = Uuid::new_v4();

        let err = start_game(&state, id).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidState(_)));
        assert!(!state.sessions().with_session(id, |s| s.game_started()));
    }

    #[tokio::test]
    async fn next_until_finished_then_restart() {
        let (state, _store) = setup(three_tracks());
        let id = Uuid::new_v4();
        start_game(&state, id).await.unwrap();

        assert_eq!(next_track(&state, id).unwrap(), GamePhase::Playing);
        assert_eq!(next_track(&state, id).unwrap(), GamePhase::Playing);
        assert_eq!(next_track(&state, id).unwrap(), GamePhase::Finished);
        assert_eq!(state.sessions().with_session(id, |s| s.current_index()), 3);
        assert!(next_track(&state, id).is_err());

        assert_eq!(
            restart_game(&state, id).unwrap(),
            GamePhase::Collecting(CollectingStatus::Fresh)
        );
        assert_eq!(state.sessions().with_session(id, |s| s.current_index()), 0);
    }

    #[tokio::test]
    async fn pause_then_resume_keeps_position() {
        let (state, _store) = setup(three_tracks());
        let id = Uuid::new_v4();
        start_game(&state, id).await.unwrap();
        next_track(&state, id).unwrap();

        assert_eq!(
            pause_game(&state, id).unwrap(),
            GamePhase::Collecting(CollectingStatus::Paused)
        );
        assert_eq!(resume_game(&state, id).unwrap(), GamePhase::Playing);
        assert_eq!(state.sessions().with_session(id, |s| s.current_index()), 1);
    }

    #[tokio::test]
    async fn reset_empties_store_and_clears_only_the_invoking_session() {
        let (state, store) = setup(three_tracks());
        let host = Uuid::new_v4();
        let guest = Uuid::new_v4();
        state
            .sessions()
            .with_session_mut(guest, |s| s.register_name("Guest".into()));
        start_game(&state, host).await.unwrap();

        reset(&state, host).await.unwrap();

        assert_eq!(store.record().await, json!([]));
        assert!(!state.sessions().with_session(host, |s| s.game_started()));
        assert_eq!(
            state
                .sessions()
                .with_session(guest, |s| s.registered_name().map(str::to_owned)),
            Some("Guest".to_string())
        );
    }
}
