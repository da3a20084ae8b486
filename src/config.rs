//! Application-level configuration loading: host passphrase, cache and session lifetimes.

use std::{env, fs, io::ErrorKind, path::PathBuf, time::Duration};

use serde::Deserialize;
use tracing::{info, warn};

use crate::dao::models::RecordLayout;

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "BLIND_TEST_BACK_CONFIG_PATH";
/// Passphrase granting host privileges when none is configured.
const DEFAULT_ADMIN_PASSPHRASE: &str = "0510";
const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5);
const DEFAULT_SESSION_IDLE_TIMEOUT: Duration = Duration::from_secs(6 * 60 * 60);
const DEFAULT_SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    admin_passphrase: String,
    cache_ttl: Duration,
    record_layout: RecordLayout,
    session_idle_timeout: Duration,
    session_sweep_interval: Duration,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to built-in defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let app_config: Self = raw.into();
                    info!(
                        path = %path.display(),
                        layout = ?app_config.record_layout,
                        cache_ttl_ms = app_config.cache_ttl.as_millis() as u64,
                        "loaded configuration"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Return a copy using `passphrase` for host access.
    pub fn with_admin_passphrase(mut self, passphrase: impl Into<String>) -> Self {
        self.admin_passphrase = passphrase.into();
        self
    }

    /// Return a copy using `ttl` for the playlist read cache.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Return a copy using `layout` for the store record.
    pub fn with_record_layout(mut self, layout: RecordLayout) -> Self {
        self.record_layout = layout;
        self
    }

    /// Check the passphrase typed by a participant. The comparison is verbatim.
    pub fn is_admin_passphrase(&self, candidate: &str) -> bool {
        candidate == self.admin_passphrase
    }

    /// Lifetime of cached playlist reads.
    pub fn cache_ttl(&self) -> Duration {
        self.cache_ttl
    }

    /// Layout of the playlist inside the store record.
    pub fn record_layout(&self) -> RecordLayout {
        self.record_layout
    }

    /// Idle time after which a session is evicted.
    pub fn session_idle_timeout(&self) -> Duration {
        self.session_idle_timeout
    }

    /// Delay between two idle-session sweeps.
    pub fn session_sweep_interval(&self) -> Duration {
        self.session_sweep_interval
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            admin_passphrase: DEFAULT_ADMIN_PASSPHRASE.to_string(),
            cache_ttl: DEFAULT_CACHE_TTL,
            record_layout: RecordLayout::default(),
            session_idle_timeout: DEFAULT_SESSION_IDLE_TIMEOUT,
            session_sweep_interval: DEFAULT_SESSION_SWEEP_INTERVAL,
        }
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
/// Every field is optional; missing ones keep their default.
struct RawConfig {
    admin_passphrase: Option<String>,
    cache_ttl_secs: Option<u64>,
    record_layout: Option<RecordLayout>,
    session_idle_timeout_secs: Option<u64>,
    session_sweep_interval_secs: Option<u64>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = AppConfig::default();
        Self {
            admin_passphrase: value
                .admin_passphrase
                .filter(|passphrase| !passphrase.is_empty())
                .unwrap_or(defaults.admin_passphrase),
            cache_ttl: value
                .cache_ttl_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.cache_ttl),
            record_layout: value.record_layout.unwrap_or(defaults.record_layout),
            session_idle_timeout: value
                .session_idle_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.session_idle_timeout),
            session_sweep_interval: value
                .session_sweep_interval_secs
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.session_sweep_interval),
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let raw: RawConfig =
            serde_json::from_str(r#"{"record_layout": "wrapped", "cache_ttl_secs": 2}"#).unwrap();
        let config = AppConfig::from(raw);

        assert_eq!(config.record_layout(), RecordLayout::Wrapped);
        assert_eq!(config.cache_ttl(), Duration::from_secs(2));
        assert!(config.is_admin_passphrase(DEFAULT_ADMIN_PASSPHRASE));
        assert_eq!(config.session_idle_timeout(), DEFAULT_SESSION_IDLE_TIMEOUT);
    }

    #[test]
    fn empty_passphrase_is_ignored() {
        let raw: RawConfig = serde_json::from_str(r#"{"admin_passphrase": ""}"#).unwrap();
        let config = AppConfig::from(raw);
        assert!(!config.is_admin_passphrase(""));
        assert!(config.is_admin_passphrase(DEFAULT_ADMIN_PASSPHRASE));
    }

    #[test]
    fn passphrase_comparison_is_verbatim() {
        let config = AppConfig::default().with_admin_passphrase("DJ42");
        assert!(config.is_admin_passphrase("DJ42"));
        assert!(!config.is_admin_passphrase("dj42"));
        assert!(!config.is_admin_passphrase(" DJ42"));
    }
}
