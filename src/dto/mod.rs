/// Health check payloads.
pub mod health;
/// Client-facing game phase.
pub mod phase;
/// Session view returned by every endpoint.
pub mod session;
/// Track submission and name registration payloads.
pub mod track;
/// Custom validators.
pub mod validation;
