//! HTTP server assembly: router, middleware, and the bind/serve loop.

use crate::handler;
use crate::state::AppState;
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing::info;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/jobs", post(handler::submit_job).get(handler::jobs_index))
        .route("/jobs/:id", get(handler::get_job))
        .route("/tasks", get(handler::list_tasks))
        .route("/health", get(handler::health))
        .route("/metrics", get(handler::metrics))
        .fallback(handler::fallback)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the Status API until `shutdown` resolves, honoring the ~5s drain
/// window on graceful shutdown (SPEC_FULL.md §5).
pub async fn serve(
    addr: SocketAddr,
    state: AppState,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let app = router(state).into_make_service_with_connect_info::<SocketAddr>();
    info!(%addr, "status API listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await
}

/// `GET /metrics` only, bound to its own port (SPEC_FULL.md §6, §10.4 —
/// "metrics port" is configured independently of the status API's HTTP
/// port). The route also stays mounted on the main router for
/// convenience; this listener is the one operators actually scrape.
pub fn metrics_router(state: AppState) -> Router {
    Router::new().route("/metrics", get(handler::metrics)).with_state(state)
}

/// Serve the standalone metrics listener until `shutdown` resolves.
pub async fn serve_metrics(
    addr: SocketAddr,
    state: AppState,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let app = metrics_router(state);
    info!(%addr, "metrics listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await
}
