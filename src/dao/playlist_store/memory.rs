//! Process-local playlist store, used for tests and for running without network access.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use futures::future::BoxFuture;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::dao::{playlist_store::PlaylistStore, storage::StorageResult};

/// In-memory record shared by every clone of the store.
#[derive(Clone, Default)]
pub struct MemoryPlaylistStore {
    record: Arc<RwLock<Value>>,
    reads: Arc<AtomicUsize>,
    writes: Arc<AtomicUsize>,
}

impl MemoryPlaylistStore {
    /// Create a store holding an empty playlist array.
    pub fn new() -> Self {
        Self::with_record(Value::Array(Vec::new()))
    }

    /// Create a store seeded with an arbitrary record.
    pub fn with_record(record: Value) -> Self {
        Self {
            record: Arc::new(RwLock::new(record)),
            reads: Arc::new(AtomicUsize::new(0)),
            writes: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Current record content.
    pub async fn record(&self) -> Value {
        self.record.read().await.clone()
    }

    /// Number of fetches served so far.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of record replacements performed so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl PlaylistStore for MemoryPlaylistStore {
    fn fetch_record(&self) -> BoxFuture<'static, StorageResult<Value>> {
        let store = self.clone();
        Box::pin(async move {
            store.reads.fetch_add(1, Ordering::SeqCst);
            Ok(store.record.read().await.clone())
        })
    }

    fn replace_record(&self, record: Value) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store.writes.fetch_add(1, Ordering::SeqCst);
            *store.record.write().await = record;
            Ok(())
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }
}
