use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use crate::{
    dto::{session::SessionView, track::RegisterNameRequest},
    routes::extract::{HostAccess, SessionHeader, ValidatedJson},
    services::{track_service, view_service},
    state::SharedState,
};

/// Participant session endpoints.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/session", get(get_session))
        .route("/session/name", post(register_name))
}

/// Render the current view of the caller's session, creating it when needed.
#[utoipa::path(
    get,
    path = "/session",
    tag = "session",
    params(
        ("X-Session-Id" = Option<String>, Header, description = "Session identifier; omit to open a new session"),
        ("X-Admin-Passphrase" = Option<String>, Header, description = "Host passphrase")
    ),
    responses(
        (status = 200, description = "Current session view", body = SessionView),
        (status = 400, description = "Malformed session identifier")
    )
)]
pub async fn get_session(
    State(state): State<SharedState>,
    SessionHeader(session_id): SessionHeader,
    HostAccess(is_host): HostAccess,
) -> Json<SessionView> {
    Json(view_service::session_view(&state, session_id, is_host).await)
}

/// Remember a display name for later submissions from this session.
#[utoipa::path(
    post,
    path = "/session/name",
    tag = "session",
    params(
        ("X-Session-Id" = Option<String>, Header, description = "Session identifier; omit to open a new session"),
        ("X-Admin-Passphrase" = Option<String>, Header, description = "Host passphrase")
    ),
    request_body = RegisterNameRequest,
    responses(
        (status = 200, description = "Name registered", body = SessionView),
        (status = 400, description = "Blank or overly long name")
    )
)]
pub async fn register_name(
    State(state): State<SharedState>,
    SessionHeader(session_id): SessionHeader,
    HostAccess(is_host): HostAccess,
    ValidatedJson(payload): ValidatedJson<RegisterNameRequest>,
) -> Json<SessionView> {
    track_service::register_name(&state, session_id, payload);
    Json(view_service::session_view(&state, session_id, is_host).await)
}
