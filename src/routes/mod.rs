use axum::Router;

use crate::state::SharedState;

/// Host-only game controls.
pub mod admin;
/// Swagger UI.
pub mod docs;
/// Header and body extractors.
pub mod extract;
/// Health check route.
pub mod health;
/// Session view and name registration.
pub mod session;
/// Track submission and undo.
pub mod tracks;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = health::router()
        .merge(session::router())
        .merge(tracks::router())
        .merge(admin::router(state.clone()));

    api_router.merge(docs::router()).with_state(state)
}
