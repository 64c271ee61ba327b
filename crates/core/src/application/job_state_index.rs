//! Job State Index (JSI) — the in-memory map from job id to job record.
//!
//! A `DashMap` is used rather than a single `Mutex<HashMap<..>>`: the HTTP
//! admission path, the events consumer and the submissions consumer all
//! touch distinct jobs far more often than the same one, so sharding the
//! lock by key avoids serializing unrelated jobs behind one mutex while
//! still giving `mark_stage_complete` atomic read-modify-write semantics
//! for any individual job (see SPEC_FULL.md §4.3, §5).

use crate::domain::{Brief, DomainError, Job, JobId, JobStatus, Stage, StageAdvance};
use crate::port::TimeProvider;
use dashmap::DashMap;
use std::sync::Arc;

/// Aggregate counts by status, as exposed by `GET /jobs`.
#[derive(Debug, Clone, Copy, Default, serde::Serialize)]
pub struct JobStats {
    pub total: usize,
    pub queued: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub failed: usize,
}

/// In-memory index of every job currently known to the orchestrator.
pub struct JobStateIndex {
    jobs: DashMap<JobId, Job>,
    time: Arc<dyn TimeProvider>,
}

impl JobStateIndex {
    pub fn new(time: Arc<dyn TimeProvider>) -> Self {
        Self { jobs: DashMap::new(), time }
    }

    /// Insert a new job record in the `queued` status.
    ///
    /// Fails with `DomainError::Duplicate` if `id` is already present —
    /// this is the sole enforcement point for "never admit the same job
    /// id twice" (SPEC_FULL.md §4.6, P7).
    pub fn create(&self, id: impl Into<JobId>, brief: Brief) -> Result<Job, DomainError> {
        use dashmap::mapref::entry::Entry;

        let id = id.into();
        match self.jobs.entry(id.clone()) {
            Entry::Occupied(_) => Err(DomainError::Duplicate(id)),
            Entry::Vacant(slot) => {
                let job = Job::new(id, brief, self.time.now_millis());
                slot.insert(job.clone());
                Ok(job)
            }
        }
    }

    /// Transition `queued -> in_progress`. Idempotent if already running.
    pub fn start(&self, id: &str) -> Result<(), DomainError> {
        let mut entry =
            self.jobs.get_mut(id).ok_or_else(|| DomainError::JobNotFound(id.to_string()))?;
        entry.start()
    }

    /// Apply a successful stage completion. See `Job::record_stage_complete`
    /// for the exact semantics (duplicate/out-of-order/terminal handling).
    /// Returns `None` if `id` is unknown (completion event for unknown job:
    /// logged and discarded by the caller, never created here).
    pub fn mark_stage_complete(&self, id: &str, stage: Stage) -> Option<StageAdvance> {
        let mut entry = self.jobs.get_mut(id)?;
        Some(entry.record_stage_complete(stage, self.time.now_millis()))
    }

    /// Mark a job permanently failed. No-op (returns `false`) if the job is
    /// unknown or already terminal.
    pub fn mark_stage_failed(&self, id: &str, error: impl Into<String>) -> bool {
        let Some(mut entry) = self.jobs.get_mut(id) else { return false };
        if entry.is_terminal() {
            return false;
        }
        entry.record_stage_failed(error, self.time.now_millis());
        true
    }

    pub fn lookup(&self, id: &str) -> Option<Job> {
        self.jobs.get(id).map(|e| e.clone())
    }

    pub fn stats(&self) -> JobStats {
        let mut stats = JobStats::default();
        for entry in self.jobs.iter() {
            stats.total += 1;
            match entry.status {
                JobStatus::Queued => stats.queued += 1,
                JobStatus::InProgress => stats.in_progress += 1,
                JobStatus::Completed => stats.completed += 1,
                JobStatus::Failed => stats.failed += 1,
            }
        }
        stats
    }

    /// Snapshot every job currently tracked, for `GET /tasks` projections.
    pub fn all(&self) -> Vec<Job> {
        self.jobs.iter().map(|e| e.clone()).collect()
    }

    /// Evict terminal jobs whose `completed_at` is older than `max_age_millis`.
    /// Non-terminal jobs are never reaped, no matter how old.
    pub fn reap(&self, max_age_millis: i64) -> usize {
        let cutoff = self.time.now_millis() - max_age_millis;
        let to_remove: Vec<JobId> = self
            .jobs
            .iter()
            .filter(|e| e.is_terminal() && e.completed_at.is_some_and(|t| t < cutoff))
            .map(|e| e.id.clone())
            .collect();
        for id in &to_remove {
            self.jobs.remove(id);
        }
        to_remove.len()
    }
}
