use serde::Serialize;
use utoipa::ToSchema;

/// Overall service status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    /// The playlist store answered the health check.
    Ok,
    /// The service runs but the playlist store is unreachable or refuses the credentials.
    Degraded,
}

/// Body of the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Overall status.
    pub status: HealthStatus,
    /// Failure reported by the store health check, when degraded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_error: Option<String>,
}

impl HealthResponse {
    /// Response for a reachable store.
    pub fn ok() -> Self {
        Self {
            status: HealthStatus::Ok,
            store_error: None,
        }
    }

    /// Response for a failed store health check.
    pub fn degraded(store_error: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Degraded,
            store_error: Some(store_error.into()),
        }
    }
}
