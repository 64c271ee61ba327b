//! Reaper (RP) — periodic sweep that evicts terminal jobs older than a TTL
//! from the Job State Index. Artifacts in the blob store are never
//! touched; retention there is external (SPEC_FULL.md §4.9).

use super::job_state_index::JobStateIndex;
use super::shutdown::ShutdownToken;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 60);
pub const DEFAULT_TERMINAL_TTL_MILLIS: i64 = 24 * 60 * 60 * 1000;

pub struct Reaper {
    jsi: Arc<JobStateIndex>,
    sweep_interval: Duration,
    terminal_ttl_millis: i64,
}

impl Reaper {
    pub fn new(jsi: Arc<JobStateIndex>) -> Self {
        Self {
            jsi,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
            terminal_ttl_millis: DEFAULT_TERMINAL_TTL_MILLIS,
        }
    }

    pub fn with_interval(mut self, sweep_interval: Duration) -> Self {
        self.sweep_interval = sweep_interval;
        self
    }

    pub fn with_ttl_millis(mut self, terminal_ttl_millis: i64) -> Self {
        self.terminal_ttl_millis = terminal_ttl_millis;
        self
    }

    pub async fn run(&self, mut shutdown: ShutdownToken) {
        let mut ticker = tokio::time::interval(self.sweep_interval);
        // The first tick fires immediately; skip it so a fresh process
        // doesn't reap on startup before anything has aged.
        ticker.tick().await;
        loop {
            tokio::select! {
                _ = shutdown.wait() => return,
                _ = ticker.tick() => {
                    let evicted = self.jsi.reap(self.terminal_ttl_millis);
                    if evicted > 0 {
                        info!(evicted, "reaper evicted terminal jobs");
                    }
                }
            }
        }
    }
}
