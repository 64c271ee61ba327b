//! Launchline SDK - Rust Client Library
//!
//! Provides a convenient client for the Launchline orchestrator's Status API.
//!
//! # Example
//!
//! ```no_run
//! use launchline_sdk::{LaunchlineClient, SubmitJobRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = LaunchlineClient::connect("http://127.0.0.1:8080")?;
//!
//!     let response = client
//!         .submit(SubmitJobRequest {
//!             product: "Acme Widget".to_string(),
//!             audience: "Developers".to_string(),
//!             tone: Some("technical".to_string()),
//!             job_id: None,
//!         })
//!         .await?;
//!
//!     println!("job submitted: {}", response.job_id);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::LaunchlineClient;
pub use error::{Result, SdkError};
pub use types::{
    Brief, HealthResponse, Job, JobStats, JobsIndexResponse, SubmitJobRequest, SubmitJobResponse,
    TaskProjection,
};
