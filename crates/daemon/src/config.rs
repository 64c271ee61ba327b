//! Process-level configuration: everything that isn't owned by a specific
//! adapter's own config module (SPEC_FULL.md §6, "Configuration").

use anyhow::{Context, Result};

pub struct DaemonConfig {
    pub http_port: u16,
    pub metrics_port: u16,
    pub log_level: String,
    pub log_format: String,
    pub reaper_interval_secs: u64,
    pub reaper_ttl_millis: i64,
    pub rate_limit_window_millis: i64,
}

impl DaemonConfig {
    pub fn from_env() -> Result<Self> {
        let http_port = std::env::var("LAUNCHLINE_HTTP_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .context("LAUNCHLINE_HTTP_PORT must be a valid port number")?;

        let metrics_port = std::env::var("LAUNCHLINE_METRICS_PORT")
            .unwrap_or_else(|_| "9090".to_string())
            .parse()
            .context("LAUNCHLINE_METRICS_PORT must be a valid port number")?;

        let reaper_interval_secs = std::env::var("LAUNCHLINE_REAPER_INTERVAL_SECS")
            .unwrap_or_else(|_| (60 * 60).to_string())
            .parse()
            .context("LAUNCHLINE_REAPER_INTERVAL_SECS must be a non-negative integer")?;

        let reaper_ttl_millis = std::env::var("LAUNCHLINE_REAPER_TTL_MILLIS")
            .unwrap_or_else(|_| (24 * 60 * 60 * 1000).to_string())
            .parse()
            .context("LAUNCHLINE_REAPER_TTL_MILLIS must be a non-negative integer")?;

        let rate_limit_window_millis = std::env::var("LAUNCHLINE_RATE_LIMIT_WINDOW_MILLIS")
            .unwrap_or_else(|_| "60000".to_string())
            .parse()
            .context("LAUNCHLINE_RATE_LIMIT_WINDOW_MILLIS must be a non-negative integer")?;

        Ok(Self {
            http_port,
            metrics_port,
            log_level: std::env::var("LAUNCHLINE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            log_format: std::env::var("LAUNCHLINE_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
            reaper_interval_secs,
            reaper_ttl_millis,
            rate_limit_window_millis,
        })
    }
}
