//! Short-lived read cache placed in front of the playlist store.

use std::{
    sync::{Mutex, MutexGuard, PoisonError},
    time::{Duration, Instant},
};

use crate::dao::models::TrackEntity;

/// Cache for the decoded playlist. Writers must call [`PlaylistCache::invalidate`] before
/// replacing the remote document so the next read goes back to the store.
pub trait PlaylistCache: Send + Sync {
    /// Return the cached playlist if one is present and still fresh.
    fn get(&self) -> Option<Vec<TrackEntity>>;
    /// Store a freshly loaded playlist.
    fn set(&self, tracks: Vec<TrackEntity>);
    /// Drop any cached playlist.
    fn invalidate(&self);
}

/// Single-slot cache whose content expires after a fixed time-to-live.
#[derive(Debug)]
pub struct TtlCache {
    ttl: Duration,
    slot: Mutex<Option<(Instant, Vec<TrackEntity>)>>,
}

impl TtlCache {
    /// Create an empty cache keeping entries for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: Mutex::new(None),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<(Instant, Vec<TrackEntity>)>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PlaylistCache for TtlCache {
    fn get(&self) -> Option<Vec<TrackEntity>> {
        let mut slot = self.lock();
        match slot.as_ref() {
            Some((stored_at, tracks)) if stored_at.elapsed() < self.ttl => Some(tracks.clone()),
            Some(_) => {
                slot.take();
                None
            }
            None => None,
        }
    }

    fn set(&self, tracks: Vec<TrackEntity>) {
        *self.lock() = Some((Instant::now(), tracks));
    }

    fn invalidate(&self) {
        self.lock().take();
    }
}

/// Cache that never holds anything; every read hits the store.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCache;

impl PlaylistCache for NoCache {
    fn get(&self) -> Option<Vec<TrackEntity>> {
        None
    }

    fn set(&self, _tracks: Vec<TrackEntity>) {}

    fn invalidate(&self) {}
}
