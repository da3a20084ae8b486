//! Blind Test Back binary entrypoint wiring the REST layer to the playlist store.

use std::{env, net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use blind_test_back::{
    config::AppConfig,
    dao::playlist_store::{PlaylistStore, memory::MemoryPlaylistStore},
    routes,
    services::session_sweeper,
    state::{AppState, SharedState},
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable selecting the playlist backend (`jsonbin` or `memory`).
const STORE_BACKEND_ENV: &str = "STORE_BACKEND";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    let sweep_interval = config.session_sweep_interval();
    let store = build_store()?;

    let app_state = AppState::new(config, store);

    tokio::spawn(session_sweeper::run(app_state.clone(), sweep_interval));
    // Build the HTTP router once the shared state is ready.
    let app = build_router(app_state);

    let port = env::var("PORT")
        .or_else(|_| env::var("SERVER_PORT"))
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    let service = app.into_make_service();
    axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    Ok(())
}

/// Pick the playlist backend from the environment.
fn build_store() -> anyhow::Result<Arc<dyn PlaylistStore>> {
    let backend = env::var(STORE_BACKEND_ENV).unwrap_or_else(|_| "jsonbin".into());
    match backend.as_str() {
        "memory" => {
            warn!("using the in-memory playlist store; submissions are lost on restart");
            Ok(Arc::new(MemoryPlaylistStore::new()))
        }
        #[cfg(feature = "jsonbin-store")]
        "jsonbin" => {
            use blind_test_back::dao::playlist_store::jsonbin::{JsonBinConfig, JsonBinStore};

            let config = JsonBinConfig::from_env().context("reading JSONBin configuration")?;
            let store = JsonBinStore::new(config).context("building JSONBin client")?;
            info!("using the JSONBin playlist store");
            Ok(Arc::new(store))
        }
        other => anyhow::bail!("unsupported {STORE_BACKEND_ENV} value `{other}`"),
    }
}

/// Build the top-level router and attach cross-cutting middleware layers.
fn build_router(state: SharedState) -> Router<()> {
    routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = term.recv() => {},
                }
            }
            Err(err) => {
                warn!(error = %err, "failed to install SIGTERM handler; waiting for Ctrl+C only");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
