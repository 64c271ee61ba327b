// Application Layer - Use Cases and Business Logic

pub mod events_consumer;
pub mod instructions;
pub mod job_state_index;
pub mod pipeline_controller;
pub mod reaper;
pub mod shutdown;
pub mod stage_dispatcher;
pub mod submission_intake;
pub mod submissions_consumer;

// Re-exports
pub use events_consumer::EventsConsumer;
pub use job_state_index::{JobStateIndex, JobStats};
pub use pipeline_controller::PipelineController;
pub use reaper::Reaper;
pub use shutdown::{shutdown_channel, ShutdownSender, ShutdownToken};
pub use stage_dispatcher::StageDispatcher;
pub use submissions_consumer::SubmissionsConsumer;
