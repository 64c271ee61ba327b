//! Launchline CLI - Command-line interface for the pipeline orchestrator's
//! Status API (SPEC_FULL.md §4.8, §6).

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::Deserialize;
use serde_json::json;
use tabled::{Table, Tabled};

const DEFAULT_API_URL: &str = "http://127.0.0.1:8080";

#[derive(Parser)]
#[command(name = "launchline")]
#[command(about = "Launchline pipeline orchestrator CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Status API base URL
    #[arg(long, env = "LAUNCHLINE_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a new job brief
    Submit {
        /// Product being advertised on the landing page
        #[arg(short, long)]
        product: String,

        /// Target audience for the landing page
        #[arg(short, long)]
        audience: String,

        /// Tone of voice for the copy (optional)
        #[arg(short, long)]
        tone: Option<String>,

        /// Client-supplied job id (otherwise the server mints one)
        #[arg(long)]
        job_id: Option<String>,
    },

    /// Look up a single job by id
    Get {
        /// Job id
        job_id: String,
    },

    /// List every job as a progress-projected table
    Tasks,

    /// Show aggregate job stats
    Stats,

    /// Check orchestrator health
    Health,
}

#[derive(Deserialize)]
struct SubmitResponse {
    job_id: String,
    status: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Deserialize, Tabled)]
struct TaskRow {
    task_id: String,
    job_id: String,
    status: String,
    created_at: i64,
    progress: u32,
}

#[derive(Deserialize)]
struct JobsIndexResponse {
    stats: JobStats,
    timestamp: i64,
}

#[derive(Deserialize, Tabled)]
struct JobStats {
    total: usize,
    queued: usize,
    in_progress: usize,
    completed: usize,
    failed: usize,
}

#[derive(Deserialize)]
struct HealthResponse {
    status: String,
    version: String,
    jobs: JobStats,
}

async fn get_json<T: serde::de::DeserializeOwned>(client: &reqwest::Client, url: &str) -> Result<T> {
    let response = client.get(url).send().await.context("failed to reach orchestrator")?;
    if !response.status().is_success() {
        let status = response.status();
        let body: ErrorBody = response.json().await.unwrap_or(ErrorBody { error: status.to_string() });
        anyhow::bail!("{} ({})", body.error, status);
    }
    response.json().await.context("failed to parse response body")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Submit { product, audience, tone, job_id } => {
            let body = json!({ "product": product, "audience": audience, "tone": tone, "job_id": job_id });
            let response = client
                .post(format!("{}/jobs", cli.api_url))
                .json(&body)
                .send()
                .await
                .context("failed to reach orchestrator")?;

            let status = response.status();
            if status.is_success() {
                let submitted: SubmitResponse = response.json().await?;
                println!("{}", "✓ job submitted".green().bold());
                println!("  {} {}", "job_id:".bold(), submitted.job_id);
                println!("  {} {}", "status:".bold(), submitted.status);
            } else if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                let retry_after =
                    response.headers().get("retry-after").and_then(|v| v.to_str().ok()).unwrap_or("60");
                println!("{}", format!("rate limited, retry after {retry_after}s").yellow());
            } else {
                let body: ErrorBody = response.json().await.unwrap_or(ErrorBody { error: status.to_string() });
                println!("{}", format!("✗ {} ({status})", body.error).red());
            }
        }

        Commands::Get { job_id } => {
            let job: serde_json::Value =
                get_json(&client, &format!("{}/jobs/{}", cli.api_url, job_id)).await?;
            println!("{}", serde_json::to_string_pretty(&job)?);
        }

        Commands::Tasks => {
            let tasks: Vec<TaskRow> = get_json(&client, &format!("{}/tasks", cli.api_url)).await?;
            if tasks.is_empty() {
                println!("{}", "no jobs yet".yellow());
            } else {
                println!("{}", Table::new(tasks));
            }
        }

        Commands::Stats => {
            let index: JobsIndexResponse = get_json(&client, &format!("{}/jobs", cli.api_url)).await?;
            println!("{}", Table::new(vec![index.stats]));
            println!("  {} {}", "as of:".bold(), index.timestamp);
        }

        Commands::Health => match get_json::<HealthResponse>(&client, &format!("{}/health", cli.api_url)).await {
            Ok(health) => {
                println!("  {} {}", "status:".bold(), health.status.green());
                println!("  {} {}", "version:".bold(), health.version);
                println!("{}", Table::new(vec![health.jobs]));
            }
            Err(e) => {
                println!("  {} {}", "status:".bold(), "unreachable".red());
                println!("  {} {}", "error:".bold(), e);
            }
        },
    }

    Ok(())
}
