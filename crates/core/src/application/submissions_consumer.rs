//! Submission-queue consumer — the asynchronous half of Submission Intake.
//! Long-polls the submissions queue and funnels every message into the
//! same `PipelineController::admit` call the HTTP path uses
//! (SPEC_FULL.md §4.6).

use super::pipeline_controller::PipelineController;
use super::shutdown::ShutdownToken;
use super::submission_intake::validate_brief;
use crate::domain::{Brief, SubmissionMessage};
use crate::port::{BlobStore, Queue};
use std::sync::Arc;
use tracing::{error, warn};

pub const SUBMISSIONS_QUEUE: &str = "submissions";
const RECEIVE_BATCH: i32 = 10;
const LONG_POLL_SECONDS: i32 = 20;

pub struct SubmissionsConsumer {
    queue: Arc<dyn Queue>,
    blob: Arc<dyn BlobStore>,
    pc: Arc<PipelineController>,
}

impl SubmissionsConsumer {
    pub fn new(queue: Arc<dyn Queue>, blob: Arc<dyn BlobStore>, pc: Arc<PipelineController>) -> Self {
        Self { queue, blob, pc }
    }

    pub async fn run(&self, mut shutdown: ShutdownToken) {
        loop {
            if shutdown.is_shutdown() {
                return;
            }
            let received = tokio::select! {
                _ = shutdown.wait() => return,
                result = self.queue.receive(SUBMISSIONS_QUEUE, RECEIVE_BATCH, LONG_POLL_SECONDS) => result,
            };

            let messages = match received {
                Ok(messages) => messages,
                Err(e) => {
                    error!(error = %e, "submissions queue receive failed");
                    continue;
                }
            };

            for message in messages {
                if self.handle_one(&message.body).await {
                    if let Err(e) = self.queue.delete(SUBMISSIONS_QUEUE, &message.receipt_handle).await {
                        error!(error = %e, "failed to delete handled submission message");
                    }
                }
            }
        }
    }

    /// Returns whether the caller should delete the message. Malformed
    /// submissions are logged and left undeleted for out-of-band DLQ
    /// policy, per SPEC_FULL.md §4.6/§7.
    async fn handle_one(&self, body: &str) -> bool {
        let message: SubmissionMessage = match serde_json::from_str(body) {
            Ok(message) => message,
            Err(e) => {
                warn!(error = %e, "malformed submission message, leaving for DLQ policy");
                return false;
            }
        };

        let job_id = message.job_id().to_string();
        let brief = match self.resolve_brief(message).await {
            Ok(brief) => brief,
            Err(e) => {
                warn!(job_id, error = %e, "could not resolve brief, leaving for DLQ policy");
                return false;
            }
        };

        if let Err(e) = validate_brief(&brief) {
            warn!(job_id, error = %e, "invalid brief on submission queue, leaving for DLQ policy");
            return false;
        }

        match self.pc.admit(&job_id, brief).await {
            Ok(_) => true,
            Err(crate::error::AppError::Conflict(e)) => {
                warn!(job_id, error = %e, "duplicate admission, deleting");
                true
            }
            Err(e) => {
                warn!(job_id, error = %e, "transient admission failure, leaving for redelivery");
                false
            }
        }
    }

    async fn resolve_brief(&self, message: SubmissionMessage) -> crate::error::Result<Brief> {
        match message {
            SubmissionMessage::Inline { product, audience, tone, .. } => {
                Ok(Brief { product, audience, tone })
            }
            SubmissionMessage::Referenced { payload_key, .. } => {
                crate::port::BlobStoreExt::get_json(self.blob.as_ref(), &payload_key).await
            }
        }
    }
}
