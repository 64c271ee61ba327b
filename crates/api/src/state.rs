//! Shared application state injected into every handler.

use crate::rate_limiter::RateLimiter;
use launchline_core::application::{JobStateIndex, PipelineController};
use launchline_core::port::{IdProvider, TimeProvider};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

/// Sliding window for the per-IP submission throttle (SPEC_FULL.md §4.6).
pub const RATE_LIMIT_WINDOW_MILLIS: i64 = 60_000;

#[derive(Clone)]
pub struct AppState {
    pub pc: Arc<PipelineController>,
    pub jsi: Arc<JobStateIndex>,
    pub id_provider: Arc<dyn IdProvider>,
    pub time_provider: Arc<dyn TimeProvider>,
    pub rate_limiter: Arc<RateLimiter>,
    pub metrics_handle: PrometheusHandle,
}

impl AppState {
    /// `rate_limit_window_millis` is read from `LAUNCHLINE_RATE_LIMIT_WINDOW_MILLIS`
    /// by the daemon (SPEC_FULL.md §10.4); `RATE_LIMIT_WINDOW_MILLIS` remains the
    /// default for callers (tests, local tooling) that don't need to override it.
    pub fn new(
        pc: Arc<PipelineController>,
        jsi: Arc<JobStateIndex>,
        id_provider: Arc<dyn IdProvider>,
        time_provider: Arc<dyn TimeProvider>,
        metrics_handle: PrometheusHandle,
    ) -> Self {
        Self::with_rate_limit_window(
            pc,
            jsi,
            id_provider,
            time_provider,
            metrics_handle,
            RATE_LIMIT_WINDOW_MILLIS,
        )
    }

    pub fn with_rate_limit_window(
        pc: Arc<PipelineController>,
        jsi: Arc<JobStateIndex>,
        id_provider: Arc<dyn IdProvider>,
        time_provider: Arc<dyn TimeProvider>,
        metrics_handle: PrometheusHandle,
        rate_limit_window_millis: i64,
    ) -> Self {
        Self {
            pc,
            jsi,
            id_provider,
            time_provider,
            rate_limiter: Arc::new(RateLimiter::new(rate_limit_window_millis)),
            metrics_handle,
        }
    }
}
