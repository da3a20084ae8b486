use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Probe the playlist store and report `ok` or `degraded`.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    match state.playlist().health_check().await {
        Ok(()) => HealthResponse::ok(),
        Err(err) => {
            warn!(error = %err, "playlist store health check failed");
            HealthResponse::degraded(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        config::AppConfig,
        dao::{cache::NoCache, playlist_store::memory::MemoryPlaylistStore},
        dto::health::HealthStatus,
        state::AppState,
    };

    #[tokio::test]
    async fn reachable_store_is_ok() {
        let state = AppState::with_cache(
            AppConfig::default(),
            Arc::new(MemoryPlaylistStore::new()),
            Arc::new(NoCache),
        );

        let health = health_status(&state).await;
        assert_eq!(health.status, HealthStatus::Ok);
        assert!(health.store_error.is_none());
    }
}
