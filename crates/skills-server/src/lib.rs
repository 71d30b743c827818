//! Skills Server
//!
//! HTTP API over the skills catalog.
//! This is a library crate — the server is started via `start_server()`.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{extract::State, http::Method, routing::get, Json, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use skills_core::{open_store, paths, Backend, CatalogStore, UpdateDispatcher};

pub mod error;
pub mod routes;
pub mod types;

use types::{HealthResponse, PingResponse};

/// Configuration for starting the server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on (default: 8080).
    pub port: u16,
    /// Which catalog store to construct.
    pub backend: Backend,
    /// SQLite database file, used by the sqlite backend.
    pub database_path: PathBuf,
    /// Populate an empty catalog with the default skills.
    pub seed: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            backend: Backend::default(),
            database_path: paths::database_path(),
            seed: false,
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CatalogStore>,
    pub dispatcher: UpdateDispatcher,
    pub backend: Backend,
}

impl AppState {
    pub fn new(store: Arc<dyn CatalogStore>, backend: Backend) -> Self {
        Self {
            dispatcher: UpdateDispatcher::new(store.clone()),
            store,
            backend,
        }
    }
}

/// Build the Axum router around an existing state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::PUT,
            Method::DELETE,
        ])
        .allow_headers(Any);

    Router::new()
        .route("/ping", get(ping))
        .route("/health", get(health))
        .nest("/api/v1", routes::api_router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Open the configured store and build the router.
pub fn build_router(config: &ServerConfig) -> anyhow::Result<(Router, AppState)> {
    let store = open_store(config.backend, &config.database_path, config.seed)?;
    tracing::info!(
        backend = %config.backend,
        database = %config.database_path.display(),
        "Opened skills catalog"
    );

    let state = AppState::new(store, config.backend);
    Ok((router(state.clone()), state))
}

/// Start the server and block until a shutdown signal arrives.
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    let (app, _state) = build_router(&config)?;

    tracing::info!("Skills server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server exiting");
    Ok(())
}

/// Resolve on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for ctrl+c: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down server");
}

async fn ping() -> Json<PingResponse> {
    Json(PingResponse { message: "pong" })
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        backend: state.backend.to_string(),
    })
}
