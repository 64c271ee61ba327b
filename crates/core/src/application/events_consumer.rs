//! Events Consumer (EC).
//!
//! Long-polls the events queue and, for each message, either advances the
//! pipeline controller or discards the message as informational/poison.
//! The message is deleted only after it has been fully and successfully
//! handled — the sole exception is a successful-stage completion that
//! throws while being applied, which is left undeleted so queue
//! redelivery retries it (SPEC_FULL.md §4.7).

use super::pipeline_controller::PipelineController;
use super::shutdown::ShutdownToken;
use crate::domain::{CompletionEvent, EventStatus};
use crate::port::Queue;
use std::sync::Arc;
use tracing::{error, warn};

pub const EVENTS_QUEUE: &str = "events";
const RECEIVE_BATCH: i32 = 10;
const LONG_POLL_SECONDS: i32 = 20;

pub struct EventsConsumer {
    queue: Arc<dyn Queue>,
    pc: Arc<PipelineController>,
}

impl EventsConsumer {
    pub fn new(queue: Arc<dyn Queue>, pc: Arc<PipelineController>) -> Self {
        Self { queue, pc }
    }

    /// Run the receive/handle/delete loop until shutdown is signalled.
    pub async fn run(&self, mut shutdown: ShutdownToken) {
        loop {
            if shutdown.is_shutdown() {
                return;
            }
            let received = tokio::select! {
                _ = shutdown.wait() => return,
                result = self.queue.receive(EVENTS_QUEUE, RECEIVE_BATCH, LONG_POLL_SECONDS) => result,
            };

            let messages = match received {
                Ok(messages) => messages,
                Err(e) => {
                    error!(error = %e, "events queue receive failed");
                    continue;
                }
            };

            for message in messages {
                if self.handle_one(&message.body).await {
                    if let Err(e) = self.queue.delete(EVENTS_QUEUE, &message.receipt_handle).await {
                        error!(error = %e, "failed to delete handled events message");
                    }
                }
            }
        }
    }

    /// Process a single message body. Returns whether the caller should
    /// delete it from the queue.
    async fn handle_one(&self, body: &str) -> bool {
        let raw: serde_json::Value = match serde_json::from_str(body) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "poison message on events queue, deleting");
                return true;
            }
        };

        // The orchestrator's own job_completed announcement shares this
        // queue but carries no task_type/task key.
        if raw.get("task_type").is_none() && raw.get("task").is_none() {
            return true;
        }

        let event: CompletionEvent = match serde_json::from_value(raw) {
            Ok(event) => event,
            Err(e) => {
                warn!(error = %e, "malformed completion event, deleting");
                return true;
            }
        };

        match event.status {
            EventStatus::InProgress => true,
            EventStatus::Success => {
                match self.pc.on_stage_complete(&event.job_id, event.task_type).await {
                    Ok(()) => true,
                    Err(e) => {
                        error!(job_id = %event.job_id, error = %e, "failed to apply stage completion, leaving for redelivery");
                        false
                    }
                }
            }
            EventStatus::Failure | EventStatus::Error => {
                let error_text = event.error.unwrap_or_else(|| "stage failed".to_string());
                match self.pc.on_stage_failed(&event.job_id, error_text).await {
                    Ok(()) => true,
                    Err(e) => {
                        error!(job_id = %event.job_id, error = %e, "failed to record stage failure, leaving for redelivery");
                        false
                    }
                }
            }
        }
    }
}
