// Domain Layer - Pure business logic and entities

pub mod error;
pub mod job;
pub mod message;
pub mod stage;

// Re-exports
pub use error::DomainError;
pub use job::{Brief, Job, JobId, JobStatus, StageAdvance};
pub use message::{
    CompletionEvent, EventStatus, JobCompletedAnnouncement, StageTaskMessage, SubmissionMessage,
};
pub use stage::{Stage, STAGE_ORDER};
