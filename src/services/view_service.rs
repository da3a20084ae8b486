//! Builds the session view returned after every request.

use tracing::warn;

use crate::{
    dto::session::SessionView,
    state::{SharedState, session::SessionId},
};

/// Render the current view for `session_id`, creating the session on first access.
///
/// A playlist load failure does not fail the view: it is rendered with an empty playlist and
/// the error message, and the next view tries the store again.
pub async fn session_view(state: &SharedState, session_id: SessionId, is_host: bool) -> SessionView {
    let (track_count, store_error) = match state.playlist().load().await {
        Ok(tracks) => (tracks.len(), None),
        Err(err) => {
            warn!(%session_id, error = %err, "failed to load playlist for view");
            (0, Some(err.to_string()))
        }
    };

    state.sessions().with_session(session_id, |session| {
        SessionView::from_session(session, is_host, track_count, store_error)
    })
}
