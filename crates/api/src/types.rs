//! Request/response bodies for the Status API (SPEC_FULL.md §4.8, §6).

use launchline_core::domain::{Job, JobStatus};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct SubmitJobRequest {
    pub product: String,
    pub audience: String,
    #[serde(default)]
    pub tone: Option<String>,
    #[serde(default)]
    pub job_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SubmitJobResponse {
    pub job_id: String,
    pub status: JobStatus,
}

#[derive(Debug, Serialize)]
pub struct JobsIndexResponse {
    pub stats: launchline_core::application::JobStats,
    pub timestamp: i64,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: i64,
    pub version: &'static str,
    pub jobs: launchline_core::application::JobStats,
}

/// `GET /tasks` projection: one row per job, independent of its internal
/// representation (SPEC_FULL.md §4.8).
#[derive(Debug, Serialize)]
pub struct TaskProjection {
    pub task_id: String,
    pub job_id: String,
    pub status: JobStatus,
    pub created_at: i64,
    pub progress: u32,
}

impl From<&Job> for TaskProjection {
    fn from(job: &Job) -> Self {
        const TOTAL_STAGES: usize = 5;
        let progress = ((job.completed_stages.len() * 100) as f64 / TOTAL_STAGES as f64).round();
        Self {
            task_id: job.id.clone(),
            job_id: job.id.clone(),
            status: job.status,
            created_at: job.started_at,
            progress: progress as u32,
        }
    }
}
