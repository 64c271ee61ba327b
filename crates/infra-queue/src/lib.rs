//! SQS-backed implementation of `launchline_core::port::Queue`.

mod config;
mod queue;

pub use config::QueueUrls;
pub use queue::SqsQueue;
