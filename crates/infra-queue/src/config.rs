//! Queue URL configuration, environment-provided per SPEC_FULL.md §6/§10.
//! One logical queue per stage, plus the two control queues.

use launchline_core::error::{AppError, Result};
use std::collections::HashMap;

/// Maps the seven logical queue names (`submissions`, `events`, and the
/// five stage names) to their concrete SQS URLs.
#[derive(Debug, Clone)]
pub struct QueueUrls {
    urls: HashMap<String, String>,
}

const LOGICAL_QUEUES: [&str; 7] =
    ["submissions", "events", "research", "product_manager", "drawer", "designer", "coder"];

impl QueueUrls {
    pub fn new(urls: HashMap<String, String>) -> Self {
        Self { urls }
    }

    /// Read every queue URL from `LAUNCHLINE_QUEUE_<NAME>_URL` environment
    /// variables, e.g. `LAUNCHLINE_QUEUE_PRODUCT_MANAGER_URL`.
    pub fn from_env() -> Result<Self> {
        let mut urls = HashMap::with_capacity(LOGICAL_QUEUES.len());
        for name in LOGICAL_QUEUES {
            let var = format!("LAUNCHLINE_QUEUE_{}_URL", name.to_uppercase());
            let url = std::env::var(&var)
                .map_err(|_| AppError::Config(format!("{var} is required")))?;
            urls.insert(name.to_string(), url);
        }
        Ok(Self { urls })
    }

    pub fn resolve(&self, queue: &str) -> Result<&str> {
        self.urls
            .get(queue)
            .map(|s| s.as_str())
            .ok_or_else(|| AppError::UnknownStage(queue.to_string()))
    }
}
