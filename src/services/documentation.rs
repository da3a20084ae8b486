use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for Blind Test Back.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::session::get_session,
        crate::routes::session::register_name,
        crate::routes::tracks::submit_track,
        crate::routes::tracks::undo_last_add,
        crate::routes::admin::start_game,
        crate::routes::admin::resume_game,
        crate::routes::admin::next_track,
        crate::routes::admin::pause_game,
        crate::routes::admin::restart_game,
        crate::routes::admin::reset,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::health::HealthStatus,
            crate::dto::phase::VisibleGamePhase,
            crate::dto::session::SessionView,
            crate::dto::session::NowPlaying,
            crate::dto::track::TrackSummary,
            crate::dto::track::SubmitTrackRequest,
            crate::dto::track::RegisterNameRequest,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "session", description = "Per-participant session view and registration"),
        (name = "tracks", description = "Playlist submissions"),
        (name = "admin", description = "Host-only game controls"),
    )
)]
pub struct ApiDoc;
