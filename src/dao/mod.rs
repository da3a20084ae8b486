/// Short-lived cache in front of the playlist store.
pub mod cache;
/// Persisted model definitions and record layouts.
pub mod models;
/// Repository implementing the playlist read/write rules.
pub mod playlist;
/// Backends holding the shared playlist document.
pub mod playlist_store;
/// Storage error types shared by all backends.
pub mod storage;
