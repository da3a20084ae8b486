//! Submission-side operations: registering a name, adding a track, undoing it.

use tracing::{debug, info};

use crate::{
    dto::track::{RegisterNameRequest, SubmitTrackRequest},
    error::ServiceError,
    services::youtube::extract_video_id,
    state::{SharedState, game::Track, session::SessionId},
};

fn ensure_collecting(state: &SharedState, session_id: SessionId) -> Result<(), ServiceError> {
    if state
        .sessions()
        .with_session(session_id, |session| session.is_collecting())
    {
        Ok(())
    } else {
        Err(ServiceError::InvalidState(
            "submissions are closed while a game is running".into(),
        ))
    }
}

/// Remember the display name used by this session for later submissions.
pub fn register_name(
    state: &SharedState,
    session_id: SessionId,
    request: RegisterNameRequest,
) -> String {
    let name = request.name.trim().to_string();
    state
        .sessions()
        .with_session_mut(session_id, |session| session.register_name(name.clone()));
    debug!(%session_id, %name, "display name registered");
    name
}

/// Validate a submission and append it to the shared playlist.
///
/// Input is checked before any store traffic; on failure nothing is written and the session
/// is left untouched.
pub async fn submit_track(
    state: &SharedState,
    session_id: SessionId,
    request: SubmitTrackRequest,
) -> Result<Track, ServiceError> {
    ensure_collecting(state, session_id)?;

    let name = match request.name.as_deref().map(str::trim) {
        Some("") => None,
        Some(name) => Some(name.to_owned()),
        None => state.sessions().with_session(session_id, |session| {
            session.registered_name().map(str::to_owned)
        }),
    }
    .ok_or_else(|| ServiceError::InvalidInput("a display name is required".into()))?;

    let video_id = extract_video_id(&request.link).ok_or_else(|| {
        ServiceError::InvalidInput("could not find a YouTube video id in the link".into())
    })?;

    let track = Track::new(name, video_id, request.link.as_str());
    let count = state.playlist().append(track.clone().into()).await?;

    state
        .sessions()
        .with_session_mut(session_id, |session| session.record_submission(track.clone()));
    info!(%session_id, user = %track.user, video_id = %track.video_id, count, "track submitted");

    Ok(track)
}

/// Remove this session's last submission from the shared playlist.
///
/// Every entry matching the same submitter and video is removed. Returns `None` without
/// touching the store when there is nothing to undo.
pub async fn undo_last_add(
    state: &SharedState,
    session_id: SessionId,
) -> Result<Option<Track>, ServiceError> {
    ensure_collecting(state, session_id)?;

    let Some(last) = state
        .sessions()
        .with_session(session_id, |session| session.my_last_add().cloned())
    else {
        return Ok(None);
    };

    let removed = state
        .playlist()
        .remove_matching(&last.user, &last.video_id)
        .await?;

    state.sessions().with_session_mut(session_id, |session| {
        if session.my_last_add() == Some(&last) {
            session.clear_last_add();
        }
    });
    info!(%session_id, user = %last.user, video_id = %last.video_id, removed, "submission undone");

    Ok(Some(last))
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
        state::AppState,
    };

    fn setup() -> (SharedState, MemoryPlaylistStore) {
        let store = MemoryPlaylistStore::new();
        let state = AppState::with_cache(AppConfig::default(), Arc::new(store.clone()), Arc::new(NoCache));
        (state, store)
    }

    fn submit(name: Option<&str>, link: &str) -> SubmitTrackRequest {
        SubmitTrackRequest {
            name: name.map(str::to_owned),
            link: link.into(),
        }
    }

    async fn stored_len(store: &MemoryPlaylistStore) -> usize {
        store.record().await.as_array().map_or(0, Vec::len)
    }

    #[tokio::test]
    async fn valid_submission_appends_and_records_last_add() {
        let (state, store) = setup();
        let id = Uuid::new_v4();

        let track = submit_track(&state, id, submit(Some("Alice"), "https://youtu.be/abc123"))
            .await
            .unwrap();

        assert_eq!(track.video_id, "abc123");
        assert_eq!(stored_len(&store).await, 1);
        assert_eq!(
            store.record().await,
            json!([{"user": "Alice", "id": "abc123", "link": "https://youtu.be/abc123"}])
        );
        assert_eq!(
            state.sessions().with_session(id, |s| s.my_last_add().cloned()),
            Some(track)
        );
    }

    #[tokio::test]
    async fn invalid_submissions_never_touch_the_store() {
        let (state, store) = setup();
        let id = Uuid::new_v4();

        for request in [
            submit(None, "https://youtu.be/abc123"),
            submit(Some(""), "https://youtu.be/abc123"),
            submit(Some("   "), "https://youtu.be/abc123"),
            submit(Some("Alice"), "https://example.com/song"),
            submit(Some("Alice"), ""),
        ] {
            let err = submit_track(&state, id, request).await.unwrap_err();
            assert!(matches!(err, ServiceError::InvalidInput(_)));
        }

        assert_eq!(store.reads(), 0);
        assert_eq!(store.writes(), 0);
        assert!(state.sessions().with_session(id, |s| s.my_last_add().is_none()));
    }

    #[tokio::test]
    async fn registered_name_is_used_when_name_is_omitted() {
        let (state, _store) = setup();
        let id = Uuid::new_v4();
        register_name(&state, id, RegisterNameRequest { name: "  Zoé ".into() });

        let track = submit_track(&state, id, submit(None, "https://www.youtube.com/watch?v=q1&t=2"))
            .await
            .unwrap();

        assert_eq!(track.user, "Zoé");
        assert_eq!(track.video_id, "q1");
    }

    #[tokio::test]
    async fn blank_name_is_rejected_even_with_a_registered_name() {
        let (state, store) = setup();
        let id = Uuid::new_v4();
        register_name(&state, id, RegisterNameRequest { name: "Zoé".into() });

        let err = submit_track(&state, id, submit(Some("  "), "https://youtu.be/abc123"))
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::InvalidInput(_)));
        assert_eq!(store.writes(), 0);
    }

    #[tokio::test]
    async fn undo_restores_length_and_second_undo_is_noop() {
        let (state, store) = setup();
        let id = Uuid::new_v4();
        submit_track(&state, id, submit(Some("Bob"), "https://youtu.be/keep"))
            .await
            .unwrap();
        let before = stored_len(&store).await;

        submit_track(&state, id, submit(Some("Alice"), "https://youtu.be/abc123"))
            .await
            .unwrap();
        assert_eq!(stored_len(&store).await, before + 1);

        let undone = undo_last_add(&state, id).await.unwrap();
        assert_eq!(undone.map(|t| t.video_id), Some("abc123".to_string()));
        assert_eq!(stored_len(&store).await, before);
        assert!(state.sessions().with_session(id, |s| s.my_last_add().is_none()));

        let writes = store.writes();
        assert_eq!(undo_last_add(&state, id).await.unwrap(), None);
        assert_eq!(store.writes(), writes);
        assert_eq!(stored_len(&store).await, before);
    }

    #[tokio::test]
    async fn undo_is_scoped_to_the_submitting_session() {
        let (state, store) = setup();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        submit_track(&state, alice, submit(Some("Alice"), "https://youtu.be/a1"))
            .await
            .unwrap();

        assert_eq!(undo_last_add(&state, bob).await.unwrap(), None);
        assert_eq!(stored_len(&store).await, 1);
    }
}
