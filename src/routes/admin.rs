use axum::{
    Json, Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
    routing::post,
};

use crate::{
    dto::session::SessionView,
    error::AppError,
    routes::extract::{ADMIN_PASSPHRASE_HEADER, SessionHeader},
    services::{game_service, view_service},
    state::{SharedState, session::SessionId},
};

/// Host-only controls driving the caller's game.
pub fn router(state: SharedState) -> Router<SharedState> {
    Router::new()
        .route("/admin/game/start", post(start_game))
        .route("/admin/game/resume", post(resume_game))
        .route("/admin/game/next", post(next_track))
        .route("/admin/game/pause", post(pause_game))
        .route("/admin/game/restart", post(restart_game))
        .route("/admin/reset", post(reset))
        .route_layer(middleware::from_fn_with_state(
            state,
            require_admin_passphrase,
        ))
}

/// Shuffle the shared playlist and start playing it.
#[utoipa::path(
    post,
    path = "/admin/game/start",
    tag = "admin",
    params(
        ("X-Admin-Passphrase" = String, Header, description = "Host passphrase"),
        ("X-Session-Id" = Option<String>, Header, description = "Session identifier; omit to open a new session")
    ),
    responses(
        (status = 200, description = "Game started", body = SessionView),
        (status = 401, description = "Missing or wrong passphrase"),
        (status = 409, description = "Empty playlist or game already running"),
        (status = 503, description = "Playlist store unavailable")
    )
)]
pub async fn start_game(
    State(state): State<SharedState>,
    SessionHeader(session_id): SessionHeader,
) -> Result<Json<SessionView>, AppError> {
    game_service::start_game(&state, session_id).await?;
    Ok(host_view(&state, session_id).await)
}

/// Return to a paused game at the track where it was left.
#[utoipa::path(
    post,
    path = "/admin/game/resume",
    tag = "admin",
    params(
        ("X-Admin-Passphrase" = String, Header, description = "Host passphrase"),
        ("X-Session-Id" = Option<String>, Header, description = "Session identifier; omit to open a new session")
    ),
    responses(
        (status = 200, description = "Game resumed", body = SessionView),
        (status = 401, description = "Missing or wrong passphrase"),
        (status = 409, description = "No paused game")
    )
)]
pub async fn resume_game(
    State(state): State<SharedState>,
    SessionHeader(session_id): SessionHeader,
) -> Result<Json<SessionView>, AppError> {
    game_service::resume_game(&state, session_id)?;
    Ok(host_view(&state, session_id).await)
}

/// Skip to the next track, finishing the game after the last one.
#[utoipa::path(
    post,
    path = "/admin/game/next",
    tag = "admin",
    params(
        ("X-Admin-Passphrase" = String, Header, description = "Host passphrase"),
        ("X-Session-Id" = Option<String>, Header, description = "Session identifier; omit to open a new session")
    ),
    responses(
        (status = 200, description = "Advanced to the next track", body = SessionView),
        (status = 401, description = "Missing or wrong passphrase"),
        (status = 409, description = "No game playing")
    )
)]
pub async fn next_track(
    State(state): State<SharedState>,
    SessionHeader(session_id): SessionHeader,
) -> Result<Json<SessionView>, AppError> {
    game_service::next_track(&state, session_id)?;
    Ok(host_view(&state, session_id).await)
}

/// Go back to the menu, keeping the game for a later resume.
#[utoipa::path(
    post,
    path = "/admin/game/pause",
    tag = "admin",
    params(
        ("X-Admin-Passphrase" = String, Header, description = "Host passphrase"),
        ("X-Session-Id" = Option<String>, Header, description = "Session identifier; omit to open a new session")
    ),
    responses(
        (status = 200, description = "Game paused", body = SessionView),
        (status = 401, description = "Missing or wrong passphrase"),
        (status = 409, description = "No game playing")
    )
)]
pub async fn pause_game(
    State(state): State<SharedState>,
    SessionHeader(session_id): SessionHeader,
) -> Result<Json<SessionView>, AppError> {
    game_service::pause_game(&state, session_id)?;
    Ok(host_view(&state, session_id).await)
}

/// Close a finished game and reopen submissions.
#[utoipa::path(
    post,
    path = "/admin/game/restart",
    tag = "admin",
    params(
        ("X-Admin-Passphrase" = String, Header, description = "Host passphrase"),
        ("X-Session-Id" = Option<String>, Header, description = "Session identifier; omit to open a new session")
    ),
    responses(
        (status = 200, description = "Back to collecting", body = SessionView),
        (status = 401, description = "Missing or wrong passphrase"),
        (status = 409, description = "Game not finished")
    )
)]
pub async fn restart_game(
    State(state): State<SharedState>,
    SessionHeader(session_id): SessionHeader,
) -> Result<Json<SessionView>, AppError> {
    game_service::restart_game(&state, session_id)?;
    Ok(host_view(&state, session_id).await)
}

/// Empty the shared playlist and wipe the caller's session.
#[utoipa::path(
    post,
    path = "/admin/reset",
    tag = "admin",
    params(
        ("X-Admin-Passphrase" = String, Header, description = "Host passphrase"),
        ("X-Session-Id" = Option<String>, Header, description = "Session identifier; omit to open a new session")
    ),
    responses(
        (status = 200, description = "Playlist emptied, session reset", body = SessionView),
        (status = 401, description = "Missing or wrong passphrase"),
        (status = 503, description = "Playlist store unavailable")
    )
)]
pub async fn reset(
    State(state): State<SharedState>,
    SessionHeader(session_id): SessionHeader,
) -> Result<Json<SessionView>, AppError> {
    game_service::reset(&state, session_id).await?;
    Ok(host_view(&state, session_id).await)
}

async fn host_view(state: &SharedState, session_id: SessionId) -> Json<SessionView> {
    Json(view_service::session_view(state, session_id, true).await)
}

async fn require_admin_passphrase(
    State(state): State<SharedState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let provided = req
        .headers()
        .get(ADMIN_PASSPHRASE_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| {
            AppError::Unauthorized("missing host passphrase header `X-Admin-Passphrase`".into())
        })?;

    if state.is_host(Some(provided)) {
        Ok(next.run(req).await)
    } else {
        Err(AppError::Unauthorized("invalid host passphrase".into()))
    }
}
