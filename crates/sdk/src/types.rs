//! SDK request/response types.
//!
//! Mirrors the wire types from the `launchline-api` crate rather than
//! depending on it directly, so the SDK stays a thin, dependency-light
//! client usable from outside the orchestrator's own workspace.

use serde::{Deserialize, Serialize};

/// Brief describing the landing page to generate.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitJobRequest {
    pub product: String,
    pub audience: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitJobResponse {
    pub job_id: String,
    pub status: String,
}

/// One of the five canonical pipeline stages, as returned in `completed_stages`.
pub type StageName = String;

#[derive(Debug, Clone, Deserialize)]
pub struct Job {
    pub id: String,
    pub brief: Brief,
    pub status: String,
    pub completed_stages: Vec<StageName>,
    pub started_at: i64,
    pub completed_at: Option<i64>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Brief {
    pub product: String,
    pub audience: String,
    #[serde(default)]
    pub tone: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct JobStats {
    pub total: usize,
    pub queued: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobsIndexResponse {
    pub stats: JobStats,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TaskProjection {
    pub task_id: String,
    pub job_id: String,
    pub status: String,
    pub created_at: i64,
    pub progress: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: i64,
    pub version: String,
    pub jobs: JobStats,
}
