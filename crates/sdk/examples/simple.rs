//! Simple SDK Example
//!
//! Demonstrates basic usage of the Launchline SDK.
//!
//! # Usage
//!
//! 1. Start the daemon:
//!    ```bash
//!    cargo run --package launchline-daemon
//!    ```
//!
//! 2. Run this example:
//!    ```bash
//!    cargo run --example simple
//!    ```

use launchline_sdk::{LaunchlineClient, SubmitJobRequest};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Launchline SDK - Simple Example");
    println!("================================\n");

    // 1. Connect to the orchestrator
    println!("1. Connecting to orchestrator...");
    let client = LaunchlineClient::connect("http://127.0.0.1:8080")?;
    println!("   ✓ Connected\n");

    // 2. Submit a job brief
    println!("2. Submitting a job...");
    let submitted = client
        .submit(SubmitJobRequest {
            product: "Acme Widget".to_string(),
            audience: "Developers".to_string(),
            tone: Some("technical".to_string()),
            job_id: None,
        })
        .await?;

    println!("   ✓ Job submitted:");
    println!("     - ID: {}", submitted.job_id);
    println!("     - Status: {}\n", submitted.status);

    // 3. Poll until terminal (research -> ... -> coder runs off the event
    //    loop; this example just samples status a few times).
    println!("3. Polling job status...");
    for _ in 0..5 {
        let job = client.get_job(&submitted.job_id).await?;
        println!(
            "     - status={} completed_stages={:?}",
            job.status, job.completed_stages
        );
        if job.status == "completed" || job.status == "failed" {
            break;
        }
        tokio::time::sleep(tokio::time::Duration::from_secs(2)).await;
    }

    // 4. Check overall health.
    println!("\n4. Checking orchestrator health...");
    let health = client.health().await?;
    println!("   ✓ status={} jobs_total={}", health.status, health.jobs.total);

    println!("\n✓ Example completed successfully!");

    Ok(())
}
