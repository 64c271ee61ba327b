//! Status API (SAPI) — the read/write HTTP surface over the job pipeline.

pub mod error;
pub mod handler;
pub mod rate_limiter;
pub mod server;
pub mod state;
pub mod types;

pub use rate_limiter::RateLimiter;
pub use server::{metrics_router, router, serve, serve_metrics};
pub use state::AppState;
