/// OpenAPI documentation generation.
pub mod documentation;
/// Host-only game lifecycle operations.
pub mod game_service;
/// Health check service.
pub mod health_service;
/// Background eviction of idle sessions.
pub mod session_sweeper;
/// Submission, undo and name registration.
pub mod track_service;
/// Session view rendering.
pub mod view_service;
/// YouTube link parsing helpers.
pub mod youtube;
