//! Launchline Client Implementation

use crate::error::{Result, SdkError};
use crate::types::{
    HealthResponse, Job, JobsIndexResponse, SubmitJobRequest, SubmitJobResponse, TaskProjection,
};
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the Launchline orchestrator's Status API.
///
/// # Example
///
/// ```no_run
/// use launchline_sdk::LaunchlineClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = LaunchlineClient::connect("http://127.0.0.1:8080")?;
/// # Ok(())
/// # }
/// ```
pub struct LaunchlineClient {
    http: reqwest::Client,
    base_url: String,
}

impl LaunchlineClient {
    /// Connect to a Launchline orchestrator.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Status API base URL (e.g. `http://127.0.0.1:8080`)
    pub fn connect(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| SdkError::Connection(e.to_string()))?;
        Ok(Self { http, base_url: base_url.into() })
    }

    /// Submit a new job brief. Returns the minted (or client-supplied)
    /// `job_id` and its initial status.
    pub async fn submit(&self, request: SubmitJobRequest) -> Result<SubmitJobResponse> {
        let response =
            self.http.post(format!("{}/jobs", self.base_url)).json(&request).send().await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
                .unwrap_or(60);
            return Err(SdkError::RateLimited { retry_after_secs });
        }

        Self::decode(response).await
    }

    /// Look up a single job by id.
    pub async fn get_job(&self, job_id: &str) -> Result<Job> {
        let response = self.http.get(format!("{}/jobs/{}", self.base_url, job_id)).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(SdkError::NotFound(job_id.to_string()));
        }
        Self::decode(response).await
    }

    /// Fetch aggregate job counts by status.
    pub async fn stats(&self) -> Result<JobsIndexResponse> {
        let response = self.http.get(format!("{}/jobs", self.base_url)).send().await?;
        Self::decode(response).await
    }

    /// List every job as a `{task_id, job_id, status, created_at, progress}`
    /// projection.
    pub async fn tasks(&self) -> Result<Vec<TaskProjection>> {
        let response = self.http.get(format!("{}/tasks", self.base_url)).send().await?;
        Self::decode(response).await
    }

    /// Check orchestrator health.
    pub async fn health(&self) -> Result<HealthResponse> {
        let response = self.http.get(format!("{}/health", self.base_url)).send().await?;
        Self::decode(response).await
    }

    async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SdkError::Api { status: status.as_u16(), message });
        }
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_accepts_a_bare_url() {
        assert!(LaunchlineClient::connect("http://127.0.0.1:8080").is_ok());
    }
}
