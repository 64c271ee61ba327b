//! Launchline Orchestrator - Main Entry Point
//!
//! Composition root: wires the S3/SQS adapters to the core pipeline
//! orchestrator and exposes it over the Status API, alongside the
//! events consumer, submissions consumer and reaper background loops
//! (SPEC_FULL.md §2, §5).

mod config;

use anyhow::{Context, Result};
use config::DaemonConfig;
use launchline_api::state::AppState;
use launchline_core::application::{
    shutdown_channel, EventsConsumer, JobStateIndex, PipelineController, Reaper, StageDispatcher,
    SubmissionsConsumer,
};
use launchline_core::port::id_provider::UuidProvider;
use launchline_core::port::time_provider::SystemTimeProvider;
use launchline_core::port::{BlobStore, Queue, TimeProvider};
use launchline_infra_blob::{BlobStoreConfig, S3BlobStore};
use launchline_infra_queue::{QueueUrls, SqsQueue};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const SHUTDOWN_DRAIN: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> Result<()> {
    let daemon_config = DaemonConfig::from_env().context("invalid daemon configuration")?;
    init_logging(&daemon_config);

    info!(version = VERSION, "launchline orchestrator starting");

    if let Err(e) = run(daemon_config).await {
        error!(error = ?e, "fatal startup or invariant violation");
        std::process::exit(1);
    }

    info!("shutdown complete");
    Ok(())
}

async fn run(daemon_config: DaemonConfig) -> Result<()> {
    // 1. Blob store + queue adapters (ambient AWS credentials, optional
    //    local-development overrides; SPEC_FULL.md §6).
    let blob_config = BlobStoreConfig::from_env().context("blob store configuration")?;
    let queue_urls = QueueUrls::from_env().context("queue configuration")?;

    let blob: Arc<dyn BlobStore> = Arc::new(S3BlobStore::connect(blob_config).await);
    let queue: Arc<dyn Queue> = Arc::new(SqsQueue::connect(queue_urls).await);

    // 2. Core orchestrator components.
    let time_provider: Arc<dyn TimeProvider> = Arc::new(SystemTimeProvider);
    let id_provider = Arc::new(UuidProvider);
    let jsi = Arc::new(JobStateIndex::new(time_provider.clone()));
    let dispatcher = StageDispatcher::new(blob.clone(), queue.clone(), time_provider.clone());
    let pc = Arc::new(PipelineController::new(jsi.clone(), dispatcher, blob.clone(), queue.clone()));

    // 3. Prometheus recorder, installed globally so `metrics::counter!`
    //    call sites elsewhere in the workspace record into it.
    let metrics_handle = PrometheusBuilder::new()
        .install_recorder()
        .context("failed to install prometheus recorder")?;

    // 4. One shutdown signal drives the HTTP listener's graceful-shutdown
    //    future and every background loop's `ShutdownToken` alike.
    let (shutdown_tx, shutdown_token) = shutdown_channel();

    let events_consumer = EventsConsumer::new(queue.clone(), pc.clone());
    let events_token = shutdown_token.clone();
    let events_handle = tokio::spawn(async move { events_consumer.run(events_token).await });

    let submissions_consumer = SubmissionsConsumer::new(queue.clone(), blob.clone(), pc.clone());
    let submissions_token = shutdown_token.clone();
    let submissions_handle =
        tokio::spawn(async move { submissions_consumer.run(submissions_token).await });

    let reaper = Reaper::new(jsi.clone())
        .with_interval(Duration::from_secs(daemon_config.reaper_interval_secs))
        .with_ttl_millis(daemon_config.reaper_ttl_millis);
    let reaper_token = shutdown_token.clone();
    let reaper_handle = tokio::spawn(async move { reaper.run(reaper_token).await });

    let state = AppState::with_rate_limit_window(
        pc,
        jsi,
        id_provider,
        time_provider,
        metrics_handle,
        daemon_config.rate_limit_window_millis,
    );
    let addr = SocketAddr::from(([0, 0, 0, 0], daemon_config.http_port));
    let mut http_shutdown_token = shutdown_token.clone();
    let http_handle = tokio::spawn(launchline_api::serve(addr, state.clone(), async move {
        http_shutdown_token.wait().await
    }));

    let metrics_addr = SocketAddr::from(([0, 0, 0, 0], daemon_config.metrics_port));
    let mut metrics_shutdown_token = shutdown_token.clone();
    let metrics_handle_task = tokio::spawn(launchline_api::serve_metrics(metrics_addr, state, async move {
        metrics_shutdown_token.wait().await
    }));

    info!(port = daemon_config.http_port, "status API listening, press Ctrl+C to shut down");
    info!(port = daemon_config.metrics_port, "metrics listening");

    wait_for_shutdown_signal().await;
    info!("shutdown signal received, draining (up to {:?})", SHUTDOWN_DRAIN);
    shutdown_tx.shutdown();

    let drain = async {
        let _ = tokio::join!(
            events_handle,
            submissions_handle,
            reaper_handle,
            http_handle,
            metrics_handle_task
        );
    };
    if tokio::time::timeout(SHUTDOWN_DRAIN, drain).await.is_err() {
        info!("drain window elapsed, exiting anyway");
    }

    Ok(())
}

async fn wait_for_shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    let mut terminate = match signal(SignalKind::terminate()) {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "failed to install SIGTERM handler");
            let _ = ctrl_c.await;
            return;
        }
    };

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate.recv() => {}
    }
}

fn init_logging(config: &DaemonConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("launchline={}", config.log_level)))
        .expect("failed to construct log filter");

    match config.log_format.as_str() {
        "json" => {
            tracing_subscriber::registry().with(env_filter).with(fmt::layer().json()).init();
        }
        _ => {
            tracing_subscriber::registry().with(env_filter).with(fmt::layer().pretty()).init();
        }
    }
}
