// Job Domain Model

use super::stage::{Stage, STAGE_ORDER};
use serde::{Deserialize, Serialize};

/// Job ID (UUID v4, or a caller-supplied token on the HTTP admission path).
pub type JobId = String;

/// Job status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Queued,
    InProgress,
    Completed,
    Failed,
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobStatus::Queued => write!(f, "queued"),
            JobStatus::InProgress => write!(f, "in_progress"),
            JobStatus::Completed => write!(f, "completed"),
            JobStatus::Failed => write!(f, "failed"),
        }
    }
}

/// User-supplied brief driving the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brief {
    pub product: String,
    pub audience: String,
    #[serde(default)]
    pub tone: Option<String>,
}

/// Job entity tracked by the Job State Index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub brief: Brief,
    pub status: JobStatus,
    pub completed_stages: Vec<Stage>,
    pub started_at: i64,
    pub completed_at: Option<i64>,
    pub error: Option<String>,
}

impl Job {
    /// Create a new job record in the `queued` status.
    pub fn new(id: impl Into<String>, brief: Brief, started_at: i64) -> Self {
        Self {
            id: id.into(),
            brief,
            status: JobStatus::Queued,
            completed_stages: Vec::with_capacity(STAGE_ORDER.len()),
            started_at,
            completed_at: None,
            error: None,
        }
    }

    /// Whether this job has reached a terminal status (`completed` or `failed`).
    pub fn is_terminal(&self) -> bool {
        matches!(self.status, JobStatus::Completed | JobStatus::Failed)
    }

    /// The next stage expected to complete, or `None` once every stage is done.
    pub fn next_expected_stage(&self) -> Option<Stage> {
        STAGE_ORDER.get(self.completed_stages.len()).copied()
    }

    /// Transition `queued -> in_progress`. Idempotent if already running.
    pub fn start(&mut self) -> super::error::Result<()> {
        match self.status {
            JobStatus::Queued => {
                self.status = JobStatus::InProgress;
                Ok(())
            }
            JobStatus::InProgress => Ok(()),
            other => Err(super::error::DomainError::InvalidStateTransition {
                from: other.to_string(),
                to: JobStatus::InProgress.to_string(),
            }),
        }
    }

    /// Record a successful stage completion. Returns whether the job
    /// advanced (a genuinely new stage was appended) and whether the job
    /// is now terminal. Duplicate completions for an already-recorded
    /// stage are a silent no-op; completions for a stage other than the
    /// next expected one are rejected without mutating state.
    pub fn record_stage_complete(&mut self, stage: Stage, now_millis: i64) -> StageAdvance {
        if self.is_terminal() {
            return StageAdvance { advanced: false, terminal: true };
        }
        if self.completed_stages.contains(&stage) {
            return StageAdvance { advanced: false, terminal: false };
        }
        if self.next_expected_stage() != Some(stage) {
            // Out of order relative to this job's own progress: never reorder.
            return StageAdvance { advanced: false, terminal: false };
        }

        self.completed_stages.push(stage);

        if self.completed_stages.len() == STAGE_ORDER.len() {
            self.status = JobStatus::Completed;
            self.completed_at = Some(now_millis);
            StageAdvance { advanced: true, terminal: true }
        } else {
            StageAdvance { advanced: true, terminal: false }
        }
    }

    /// Record a terminal stage failure. No-op if already terminal.
    pub fn record_stage_failed(&mut self, error: impl Into<String>, now_millis: i64) {
        if self.is_terminal() {
            return;
        }
        self.status = JobStatus::Failed;
        self.error = Some(error.into());
        self.completed_at = Some(now_millis);
    }
}

/// Outcome of applying a stage-completion event to a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageAdvance {
    pub advanced: bool,
    pub terminal: bool,
}
