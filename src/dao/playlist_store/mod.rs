#[cfg(feature = "jsonbin-store")]
/// JSONBin HTTP backend.
pub mod jsonbin;
/// In-process backend.
pub mod memory;

use futures::future::BoxFuture;
use serde_json::Value;

use crate::dao::storage::StorageResult;

/// Abstraction over the remote document holding the shared playlist.
///
/// Backends only move whole records around; interpreting the record layout is the job of
/// [`crate::dao::playlist::PlaylistRepository`].
pub trait PlaylistStore: Send + Sync {
    /// Fetch the current record. A document without a record yields an empty array.
    fn fetch_record(&self) -> BoxFuture<'static, StorageResult<Value>>;
    /// Replace the whole record with `record`.
    fn replace_record(&self, record: Value) -> BoxFuture<'static, StorageResult<()>>;
    /// Check that the document is reachable with the configured credentials.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
}
