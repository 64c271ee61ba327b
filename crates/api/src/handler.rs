//! HTTP handlers for the Status API (SAPI) — SPEC_FULL.md §4.8.

use crate::error::ApiError;
use crate::state::AppState;
use crate::types::{HealthResponse, JobsIndexResponse, SubmitJobRequest, SubmitJobResponse, TaskProjection};
use axum::extract::{ConnectInfo, Path, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use launchline_core::application::submission_intake::validate_brief;
use launchline_core::domain::Brief;
use std::net::SocketAddr;
use tracing::warn;

/// `POST /jobs` — admits a new job synchronously through its first dispatch.
pub async fn submit_job(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    Json(req): Json<SubmitJobRequest>,
) -> Response {
    if !state.rate_limiter.check(peer.ip(), state.time_provider.now_millis()) {
        metrics::counter!("launchline_jobs_rate_limited_total").increment(1);
        let mut headers = HeaderMap::new();
        headers.insert("Retry-After", HeaderValue::from_static("60"));
        return (StatusCode::TOO_MANY_REQUESTS, headers).into_response();
    }

    let brief = Brief { product: req.product, audience: req.audience, tone: req.tone };
    if let Err(e) = validate_brief(&brief) {
        return ApiError::from(e).into_response();
    }

    let job_id = req.job_id.unwrap_or_else(|| state.id_provider.generate_id());
    match state.pc.admit(&job_id, brief).await {
        Ok(job) => {
            metrics::counter!("launchline_jobs_admitted_total").increment(1);
            (StatusCode::CREATED, Json(SubmitJobResponse { job_id: job.id, status: job.status }))
                .into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// `GET /jobs/{id}`
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<launchline_core::domain::Job>, ApiError> {
    state
        .jsi
        .lookup(&id)
        .map(Json)
        .ok_or_else(|| launchline_core::error::AppError::NotFound(id).into())
}

/// `GET /jobs`
pub async fn jobs_index(State(state): State<AppState>) -> Json<JobsIndexResponse> {
    Json(JobsIndexResponse { stats: state.jsi.stats(), timestamp: state.time_provider.now_millis() })
}

/// `GET /tasks`
pub async fn list_tasks(State(state): State<AppState>) -> Json<Vec<TaskProjection>> {
    let tasks = state.jsi.all().iter().map(TaskProjection::from).collect();
    Json(tasks)
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: state.time_provider.now_millis(),
        version: launchline_core::VERSION,
        jobs: state.jsi.stats(),
    })
}

/// `GET /metrics` — Prometheus text exposition.
pub async fn metrics(State(state): State<AppState>) -> String {
    state.metrics_handle.render()
}

/// Invoked when a request body fails to deserialize, or any other axum
/// rejection fires before a handler runs.
pub async fn fallback() -> impl IntoResponse {
    warn!("request matched no route");
    StatusCode::NOT_FOUND
}
