use std::time::Duration;

use tokio::time::sleep;
use tracing::info;

use crate::state::SharedState;

/// Periodically evict sessions that have been idle longer than the configured timeout.
pub async fn run(state: SharedState, interval: Duration) {
    loop {
        sleep(interval).await;
        let removed = state.sessions().purge_idle();
        if removed > 0 {
            info!(removed, remaining = state.sessions().len(), "expired idle sessions");
        }
    }
}
