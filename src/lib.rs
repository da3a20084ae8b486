//! Library crate for blind-test-back, exposing modules for binaries and integration tests.

/// Runtime configuration loading.
pub mod config;
/// Playlist persistence: store backends, cache and repository.
pub mod dao;
/// Request and response payloads.
pub mod dto;
/// Service and HTTP error types.
pub mod error;
/// Axum route trees and extractors.
pub mod routes;
/// Business operations behind the routes.
pub mod services;
/// Shared application state and per-session game state.
pub mod state;
