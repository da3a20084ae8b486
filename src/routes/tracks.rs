use axum::{Json, Router, extract::State, routing::post};

use crate::{
    dto::{session::SessionView, track::SubmitTrackRequest},
    error::AppError,
    routes::extract::{HostAccess, SessionHeader, ValidatedJson},
    services::{track_service, view_service},
    state::SharedState,
};

/// Playlist submission endpoints.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/tracks", post(submit_track))
        .route("/tracks/undo", post(undo_last_add))
}

/// Append a YouTube link to the shared playlist.
#[utoipa::path(
    post,
    path = "/tracks",
    tag = "tracks",
    params(
        ("X-Session-Id" = Option<String>, Header, description = "Session identifier; omit to open a new session"),
        ("X-Admin-Passphrase" = Option<String>, Header, description = "Host passphrase")
    ),
    request_body = SubmitTrackRequest,
    responses(
        (status = 200, description = "Track added", body = SessionView),
        (status = 400, description = "Missing name or unrecognised link"),
        (status = 409, description = "Submissions are closed while a game runs"),
        (status = 503, description = "Playlist store unavailable")
    )
)]
pub async fn submit_track(
    State(state): State<SharedState>,
    SessionHeader(session_id): SessionHeader,
    HostAccess(is_host): HostAccess,
    ValidatedJson(payload): ValidatedJson<SubmitTrackRequest>,
) -> Result<Json<SessionView>, AppError> {
    track_service::submit_track(&state, session_id, payload).await?;
    Ok(Json(
        view_service::session_view(&state, session_id, is_host).await,
    ))
}

/// Remove the last track submitted from this session.
#[utoipa::path(
    post,
    path = "/tracks/undo",
    tag = "tracks",
    params(
        ("X-Session-Id" = Option<String>, Header, description = "Session identifier; omit to open a new session"),
        ("X-Admin-Passphrase" = Option<String>, Header, description = "Host passphrase")
    ),
    responses(
        (status = 200, description = "Last submission removed, or nothing to undo", body = SessionView),
        (status = 409, description = "Undo is closed while a game runs"),
        (status = 503, description = "Playlist store unavailable")
    )
)]
pub async fn undo_last_add(
    State(state): State<SharedState>,
    SessionHeader(session_id): SessionHeader,
    HostAccess(is_host): HostAccess,
) -> Result<Json<SessionView>, AppError> {
    track_service::undo_last_add(&state, session_id).await?;
    Ok(Json(
        view_service::session_view(&state, session_id, is_host).await,
    ))
}
