//! HTTP server implementation using Axum.

use crate::handlers::{handle_health, handle_rpc};
use axum::{
    routing::{get, post},
    Router,
};
use sermonprep_core::SermonLibrary;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Requests handled at once. Further requests wait.
const MAX_CONCURRENT_REQUESTS: usize = 64;

/// Application state shared across handlers.
pub struct AppState {
    /// The open sermon library
    pub library: SermonLibrary,
    /// Set once shutdown starts; the server stops accepting when it flips
    shutdown: watch::Sender<bool>,
}

impl AppState {
    pub fn new(library: SermonLibrary) -> Self {
        let (shutdown, _) = watch::channel(false);
        Self { library, shutdown }
    }

    /// Ask the server to stop. Safe to call more than once.
    pub fn request_shutdown(&self) {
        self.shutdown.send_replace(true);
    }

    /// Resolves once [`AppState::request_shutdown`] has been called.
    pub async fn shutdown_requested(&self) {
        let mut rx = self.shutdown.subscribe();
        // The sender lives in `self`, so the channel cannot close here.
        let _ = rx.wait_for(|stopping| *stopping).await;
    }
}

/// A bound server running in the background.
pub struct RunningServer {
    /// Actual bound address (useful when port=0)
    pub addr: SocketAddr,
    pub state: Arc<AppState>,
    /// Finishes after shutdown is requested and open requests drain
    pub task: JoinHandle<()>,
}

/// Start the JSON-RPC HTTP server.
pub async fn start_server(
    library: SermonLibrary,
    host: &str,
    port: u16,
) -> anyhow::Result<RunningServer> {
    let state = Arc::new(AppState::new(library));

    // Front ends may be served from a dev server on another origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(handle_health))
        .route("/rpc", post(handle_rpc))
        .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_REQUESTS))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::clone(&state));

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let actual_addr = listener.local_addr()?;

    info!("Server listening on {}", actual_addr);

    let stop_state = Arc::clone(&state);
    let task = tokio::spawn(async move {
        let stopped = async move { stop_state.shutdown_requested().await };
        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(stopped)
            .await
        {
            error!("Server error: {}", e);
        }
        info!("Server stopped accepting requests");
    });

    Ok(RunningServer {
        addr: actual_addr,
        state,
        task,
    })
}
