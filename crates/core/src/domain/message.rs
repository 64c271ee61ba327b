// Wire message types exchanged with stage workers over the queues.
//
// Field names and casing here are load-bearing: workers outside this
// repository depend on them exactly as written (see SPEC_FULL.md §3, §6).

use super::stage::Stage;
use serde::{Deserialize, Serialize};

/// Orchestrator -> worker message, placed on the stage's own queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageTaskMessage {
    pub job_id: String,
    pub task_type: Stage,
    pub payload_key: String,
    pub timestamp: i64,
    pub source: String,
}

/// Outcome reported by a stage worker on the shared events queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Success,
    Failure,
    Error,
    InProgress,
}

/// Worker -> orchestrator completion event.
///
/// Older messages key the stage under `task` rather than `task_type`, and
/// `result_key` is sometimes omitted entirely (the next stage's input is
/// derived from the deterministic artifact key scheme, never from this
/// field). Both are accepted on read.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionEvent {
    pub job_id: String,
    #[serde(alias = "task")]
    pub task_type: Stage,
    pub status: EventStatus,
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub result_key: Option<String>,
    #[serde(default)]
    pub timestamp: Option<i64>,
}

/// Announcement the orchestrator itself places on the events queue once a
/// job completes all five stages. Shares the queue with `CompletionEvent`
/// but carries no `task_type`/`task` key, which is how consumers tell the
/// two shapes apart without a dedicated queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobCompletedAnnouncement {
    pub job_id: String,
    pub event_type: String,
}

impl JobCompletedAnnouncement {
    pub fn new(job_id: impl Into<String>) -> Self {
        Self { job_id: job_id.into(), event_type: "job_completed".to_string() }
    }
}

/// Async submission-queue intake variant: either a reference to a brief
/// already stored in the blob store, or the brief inlined in the message.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SubmissionMessage {
    Referenced {
        job_id: String,
        #[serde(default)]
        task_type: Option<String>,
        payload_key: String,
    },
    Inline {
        job_id: String,
        product: String,
        audience: String,
        #[serde(default)]
        tone: Option<String>,
    },
}

impl SubmissionMessage {
    pub fn job_id(&self) -> &str {
        match self {
            SubmissionMessage::Referenced { job_id, .. } => job_id,
            SubmissionMessage::Inline { job_id, .. } => job_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_event_accepts_legacy_task_key() {
        let raw = serde_json::json!({
            "job_id": "j1",
            "task": "research",
            "status": "success",
        });
        let event: CompletionEvent = serde_json::from_value(raw).unwrap();
        assert_eq!(event.task_type, Stage::Research);
        assert_eq!(event.status, EventStatus::Success);
        assert!(event.result_key.is_none());
    }

    #[test]
    fn completion_event_accepts_current_task_type_key() {
        let raw = serde_json::json!({
            "job_id": "j1",
            "task_type": "product_manager",
            "status": "failure",
            "error": "boom",
        });
        let event: CompletionEvent = serde_json::from_value(raw).unwrap();
        assert_eq!(event.task_type, Stage::ProductManager);
        assert_eq!(event.error.as_deref(), Some("boom"));
    }

    #[test]
    fn submission_message_inline_brief() {
        let raw = serde_json::json!({
            "job_id": "j1",
            "product": "Acme Widget",
            "audience": "Developers",
        });
        let msg: SubmissionMessage = serde_json::from_value(raw).unwrap();
        assert!(matches!(msg, SubmissionMessage::Inline { .. }));
    }

    #[test]
    fn submission_message_referenced_brief() {
        let raw = serde_json::json!({
            "job_id": "j1",
            "task_type": "start_job",
            "payload_key": "j1/submission.json",
        });
        let msg: SubmissionMessage = serde_json::from_value(raw).unwrap();
        assert!(matches!(msg, SubmissionMessage::Referenced { .. }));
    }
}
