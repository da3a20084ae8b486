use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::dao::{
    cache::PlaylistCache,
    models::{RecordLayout, TrackEntity, is_sentinel},
    playlist_store::PlaylistStore,
    storage::{StorageError, StorageResult},
};

/// Data access object for the shared playlist document.
///
/// Reads go through the cache; every write invalidates it first. Writes always replace the
/// whole document, so concurrent read-modify-write cycles from different sessions race and
/// the last one wins.
#[derive(Clone)]
pub struct PlaylistRepository {
    store: Arc<dyn PlaylistStore>,
    cache: Arc<dyn PlaylistCache>,
    layout: RecordLayout,
}

impl PlaylistRepository {
    /// Build a repository over `store`, caching reads in `cache`.
    pub fn new(
        store: Arc<dyn PlaylistStore>,
        cache: Arc<dyn PlaylistCache>,
        layout: RecordLayout,
    ) -> Self {
        Self {
            store,
            cache,
            layout,
        }
    }

    /// Load the playlist, serving a cached copy when it is still fresh.
    pub async fn load(&self) -> StorageResult<Vec<TrackEntity>> {
        if let Some(tracks) = self.cache.get() {
            return Ok(tracks);
        }
        self.load_fresh().await
    }

    /// Load the playlist straight from the store and refresh the cache.
    ///
    /// A record that does not match the configured layout is treated as an uninitialised
    /// store: an empty playlist is written back and returned.
    pub async fn load_fresh(&self) -> StorageResult<Vec<TrackEntity>> {
        let record = self.store.fetch_record().await?;

        let tracks = match self.layout.unwrap_record(record) {
            Some(items) => decode_items(items),
            None => {
                warn!(layout = ?self.layout, "playlist record has unexpected shape; resetting store");
                if let Err(err) = self.save(&[]).await {
                    warn!(error = %err, "corrective playlist write failed");
                }
                Vec::new()
            }
        };

        self.cache.set(tracks.clone());
        Ok(tracks)
    }

    /// Replace the remote playlist with `tracks`.
    pub async fn save(&self, tracks: &[TrackEntity]) -> StorageResult<()> {
        let record = self
            .layout
            .wrap_record(tracks)
            .map_err(|err| StorageError::unavailable("failed to encode playlist".into(), err))?;

        self.cache.invalidate();
        self.store.replace_record(record).await?;
        debug!(count = tracks.len(), "playlist saved");
        Ok(())
    }

    /// Append `track` to the end of the playlist, returning the new length.
    pub async fn append(&self, track: TrackEntity) -> StorageResult<usize> {
        let mut tracks = self.load_fresh().await?;
        tracks.push(track);
        self.save(&tracks).await?;
        Ok(tracks.len())
    }

    /// Remove every entry submitted by `user` for video `id`, returning how many were removed.
    pub async fn remove_matching(&self, user: &str, id: &str) -> StorageResult<usize> {
        let tracks = self.load_fresh().await?;
        let before = tracks.len();
        let kept = tracks
            .into_iter()
            .filter(|track| !(track.id == id && track.user == user))
            .collect::<Vec<_>>();
        let removed = before - kept.len();

        self.save(&kept).await?;
        Ok(removed)
    }

    /// Overwrite the remote playlist with an empty one.
    pub async fn clear(&self) -> StorageResult<()> {
        self.save(&[]).await
    }

    /// Check that the underlying store answers.
    pub async fn health_check(&self) -> StorageResult<()> {
        self.store.health_check().await
    }
}

fn decode_items(items: Vec<Value>) -> Vec<TrackEntity> {
    items
        .into_iter()
        .filter(|item| !is_sentinel(item))
        .filter_map(|item| match serde_json::from_value::<TrackEntity>(item) {
            Ok(track) => Some(track),
            Err(err) => {
                warn!(error = %err, "skipping malformed playlist entry");
                None
            }
        })
        .collect()
}
