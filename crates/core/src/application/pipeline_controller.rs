//! Pipeline Controller (PC) — the state machine driving a job through the
//! five canonical stages.

use super::instructions::build_stage_input;
use super::job_state_index::JobStateIndex;
use super::stage_dispatcher::StageDispatcher;
use crate::domain::{Brief, Job, JobCompletedAnnouncement, Stage};
use crate::error::{AppError, Result};
use crate::port::{BlobStore, Queue};
use std::sync::Arc;
use tracing::{info, warn};

/// Name of the queue both worker completion events and the orchestrator's
/// own `job_completed` announcements are placed on (SPEC_FULL.md §9).
pub const EVENTS_QUEUE: &str = "events";

pub struct PipelineController {
    jsi: Arc<JobStateIndex>,
    dispatcher: StageDispatcher,
    blob: Arc<dyn BlobStore>,
    queue: Arc<dyn Queue>,
}

impl PipelineController {
    pub fn new(
        jsi: Arc<JobStateIndex>,
        dispatcher: StageDispatcher,
        blob: Arc<dyn BlobStore>,
        queue: Arc<dyn Queue>,
    ) -> Self {
        Self { jsi, dispatcher, blob, queue }
    }

    /// Admit a new job: create its record, start it, and dispatch the
    /// first stage. Fails with `AppError::Conflict` if `job_id` is already
    /// known (P7).
    pub async fn admit(&self, job_id: &str, brief: Brief) -> Result<Job> {
        let job = self
            .jsi
            .create(job_id, brief.clone())
            .map_err(|e| AppError::Conflict(e.to_string()))?;
        self.jsi.start(job_id)?;

        let brief_json = serde_json::to_value(&brief)?;
        let input = build_stage_input(Stage::Research, brief_json);
        self.dispatcher.dispatch(job_id, Stage::Research, input).await?;

        info!(job_id, "admitted job, dispatched research");
        Ok(job)
    }

    /// Apply a successful stage completion event. Only called by the
    /// events consumer when `status == success`.
    pub async fn on_stage_complete(&self, job_id: &str, stage: Stage) -> Result<()> {
        let Some(advance) = self.jsi.mark_stage_complete(job_id, stage) else {
            warn!(job_id, stage = stage.as_str(), "completion event for unknown job, discarding");
            return Ok(());
        };

        if advance.terminal {
            if let Some(job) = self.jsi.lookup(job_id) {
                if matches!(job.status, crate::domain::JobStatus::Completed) {
                    let announcement = JobCompletedAnnouncement::new(job_id);
                    let body = serde_json::to_value(&announcement)?;
                    self.queue.send(EVENTS_QUEUE, body).await?;
                    info!(job_id, "job completed, announcement sent");
                }
            }
            return Ok(());
        }

        if !advance.advanced {
            // Duplicate or out-of-order completion: logged inside
            // Job::record_stage_complete's caller contract, nothing to do.
            return Ok(());
        }

        let Some(next) = stage.next() else {
            // Unreachable given STAGE_ORDER, but guards against a future
            // change to the stage list leaving this branch stale.
            return Ok(());
        };

        let upstream = self.fetch_upstream_result(job_id, stage).await?;
        let input = build_stage_input(next, upstream);
        self.dispatcher.dispatch(job_id, next, input).await?;
        Ok(())
    }

    /// Apply a terminal stage failure. No dispatch follows.
    pub async fn on_stage_failed(&self, job_id: &str, error: impl Into<String>) -> Result<()> {
        if !self.jsi.mark_stage_failed(job_id, error) {
            warn!(job_id, "failure event for unknown or already-terminal job, discarding");
        }
        Ok(())
    }

    /// Read the result artifact produced `completed`, trying the canonical
    /// (underscore) key first and falling back to the historical
    /// hyphenated form where one exists (SPEC_FULL.md §9).
    async fn fetch_upstream_result(&self, job_id: &str, completed: Stage) -> Result<serde_json::Value> {
        let canonical = completed.result_key(job_id);
        match self.blob.get(&canonical).await {
            Ok(value) => Ok(value),
            Err(AppError::NotFound(_)) => {
                if let Some(alternate) = completed.alternate_result_key(job_id) {
                    self.blob.get(&alternate).await
                } else {
                    Err(AppError::NotFound(canonical))
                }
            }
            Err(other) => Err(other),
        }
    }
}
