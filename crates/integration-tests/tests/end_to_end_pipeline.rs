//! End-to-end scenarios over the full admit -> dispatch -> events loop,
//! wired the way the daemon composition root wires it (minus the HTTP
//! surface, which is covered separately in `launchline-api`'s own tests).
//! Scenario numbers reference SPEC_FULL.md §8.

mod support;

use launchline_core::application::{
    shutdown_channel, EventsConsumer, JobStateIndex, PipelineController, StageDispatcher,
};
use launchline_core::domain::{Brief, JobStatus, Stage, STAGE_ORDER};
use launchline_core::port::time_provider::SystemTimeProvider;
use launchline_core::port::BlobStore;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use support::{FakeBlob, FakeQueue};

fn brief() -> Brief {
    Brief { product: "Acme Widget".to_string(), audience: "Developers".to_string(), tone: Some("technical".to_string()) }
}

/// A real stage worker writes its result artifact before signaling
/// success on the events queue; tests simulate that write explicitly
/// since no worker is running here.
async fn seed_stage_result(blob: &FakeBlob, job_id: &str, stage: Stage) {
    blob.put(&stage.result_key(job_id), json!({"stage": stage.as_str(), "output": "ok"})).await.unwrap();
}

struct Harness {
    jsi: Arc<JobStateIndex>,
    blob: Arc<FakeBlob>,
    queue: Arc<FakeQueue>,
    pc: Arc<PipelineController>,
    _events_task: tokio::task::JoinHandle<()>,
    shutdown: launchline_core::application::ShutdownSender,
}

fn build_harness() -> Harness {
    let blob = Arc::new(FakeBlob::default());
    let queue = Arc::new(FakeQueue::default());
    let time = Arc::new(SystemTimeProvider);
    let jsi = Arc::new(JobStateIndex::new(time.clone()));
    let dispatcher = StageDispatcher::new(blob.clone(), queue.clone(), time.clone());
    let pc = Arc::new(PipelineController::new(jsi.clone(), dispatcher, blob.clone(), queue.clone()));

    let (shutdown_tx, shutdown_token) = shutdown_channel();
    let consumer = EventsConsumer::new(queue.clone(), pc.clone());
    let events_task = tokio::spawn(async move { consumer.run(shutdown_token).await });

    Harness { jsi, blob, queue, pc, _events_task: events_task, shutdown: shutdown_tx }
}

async fn settle() {
    tokio::time::sleep(Duration::from_millis(60)).await;
}

fn success_event(job_id: &str, stage: &str) -> serde_json::Value {
    json!({ "job_id": job_id, "task_type": stage, "status": "success" })
}

impl Drop for Harness {
    fn drop(&mut self) {
        self.shutdown.shutdown();
    }
}

/// S1: all five stages complete in order; job reaches `completed` and
/// exactly one `job_completed` announcement lands on the events queue.
#[tokio::test]
async fn s1_full_pipeline_completes_and_announces_once() {
    let h = build_harness();
    h.pc.admit("J1", brief()).await.unwrap();

    for stage in STAGE_ORDER {
        seed_stage_result(&h.blob, "J1", stage).await;
        h.queue.seed_raw("events", success_event("J1", stage.as_str()));
        settle().await;
    }

    let job = h.jsi.lookup("J1").unwrap();
    assert_eq!(job.status, JobStatus::Completed);
    assert_eq!(job.completed_stages, STAGE_ORDER.to_vec());

    let announcements: Vec<_> =
        h.queue.sent_to("events").into_iter().filter(|m| m.get("event_type").is_some()).collect();
    assert_eq!(announcements.len(), 1);
    assert_eq!(announcements[0]["job_id"], "J1");

    // Every dispatched stage wrote its input artifact before the task
    // message went out (P6); spot check the last one.
    assert!(h.blob.contains("J1/coder.json"));
}

/// S2: two rapid admissions of the same job id — second is rejected,
/// exactly one job exists.
#[tokio::test]
async fn s2_duplicate_admission_is_rejected() {
    let h = build_harness();
    h.pc.admit("J2", brief()).await.unwrap();
    let second = h.pc.admit("J2", brief()).await;
    assert!(second.is_err());
    assert_eq!(h.jsi.stats().total, 1);
}

/// S3: delivering the same stage's success twice in a row only advances
/// once, and only one downstream dispatch follows.
#[tokio::test]
async fn s3_duplicate_stage_completion_does_not_double_dispatch() {
    let h = build_harness();
    h.pc.admit("J3", brief()).await.unwrap();

    seed_stage_result(&h.blob, "J3", Stage::Research).await;
    h.queue.seed_raw("events", success_event("J3", "research"));
    settle().await;
    h.queue.seed_raw("events", success_event("J3", "research"));
    settle().await;

    let job = h.jsi.lookup("J3").unwrap();
    assert_eq!(job.completed_stages, vec![launchline_core::domain::Stage::Research]);
    assert_eq!(h.queue.sent_count("product_manager"), 1);
}

/// S4: an out-of-order completion (designer before product_manager) is
/// ignored; no new dispatch follows and progress doesn't regress.
#[tokio::test]
async fn s4_out_of_order_completion_is_ignored() {
    let h = build_harness();
    h.pc.admit("J4", brief()).await.unwrap();

    seed_stage_result(&h.blob, "J4", Stage::Research).await;
    h.queue.seed_raw("events", success_event("J4", "research"));
    settle().await;
    h.queue.seed_raw("events", success_event("J4", "designer"));
    settle().await;

    let job = h.jsi.lookup("J4").unwrap();
    assert_eq!(job.completed_stages, vec![launchline_core::domain::Stage::Research]);
    assert_eq!(h.queue.sent_count("designer"), 0);
}

/// S5: a stage failure makes the job terminal in one step; later events
/// for that job never mutate it again.
#[tokio::test]
async fn s5_stage_failure_is_terminal_and_sticky() {
    let h = build_harness();
    h.pc.admit("J5", brief()).await.unwrap();
    seed_stage_result(&h.blob, "J5", Stage::Research).await;
    h.queue.seed_raw("events", success_event("J5", "research"));
    settle().await;
    h.queue.seed_raw(
        "events",
        json!({ "job_id": "J5", "task_type": "product_manager", "status": "error", "error": "timeout" }),
    );
    settle().await;

    let job = h.jsi.lookup("J5").unwrap();
    assert_eq!(job.status, JobStatus::Failed);
    assert_eq!(job.error.as_deref(), Some("timeout"));

    // A late, stale success for a later stage must not resurrect the job.
    h.queue.seed_raw("events", success_event("J5", "drawer"));
    settle().await;
    let job = h.jsi.lookup("J5").unwrap();
    assert_eq!(job.status, JobStatus::Failed);
    assert_eq!(h.queue.sent_count("designer"), 0);
}

/// The orchestrator's own `job_completed` announcement shares the events
/// queue but carries no `task_type`; a consumer must not misread it as a
/// stage completion for an unrelated job (SPEC_FULL.md §9).
#[tokio::test]
async fn job_completed_announcement_is_not_mistaken_for_a_completion_event() {
    let h = build_harness();
    h.pc.admit("J6", brief()).await.unwrap();

    h.queue.seed_raw("events", json!({ "job_id": "J6", "event_type": "job_completed" }));
    settle().await;

    let job = h.jsi.lookup("J6").unwrap();
    assert_eq!(job.status, JobStatus::InProgress);
    assert_eq!(job.completed_stages.len(), 0);
}

/// B3: a completion event referencing a job the index has never heard of
/// is logged and dropped without creating state.
#[tokio::test]
async fn b3_completion_for_unknown_job_is_discarded() {
    let h = build_harness();
    h.queue.seed_raw("events", success_event("ghost-job", "research"));
    settle().await;
    assert_eq!(h.jsi.stats().total, 0);
}

/// An `in_progress` status event is informational only and never mutates
/// job state.
#[tokio::test]
async fn in_progress_event_is_informational_only() {
    let h = build_harness();
    h.pc.admit("J7", brief()).await.unwrap();
    h.queue.seed_raw("events", json!({ "job_id": "J7", "task_type": "research", "status": "in_progress" }));
    settle().await;
    let job = h.jsi.lookup("J7").unwrap();
    assert_eq!(job.completed_stages.len(), 0);
    assert_eq!(job.status, JobStatus::InProgress);
}

/// A malformed (poison) message is dropped; the events loop keeps making
/// forward progress on subsequent, well-formed messages.
#[tokio::test]
async fn poison_message_does_not_block_subsequent_processing() {
    let h = build_harness();
    h.pc.admit("J8", brief()).await.unwrap();

    h.queue.seed_text("events", "{not valid json at all");
    seed_stage_result(&h.blob, "J8", Stage::Research).await;
    h.queue.seed_raw("events", success_event("J8", "research"));
    settle().await;

    let job = h.jsi.lookup("J8").unwrap();
    assert_eq!(job.completed_stages, vec![launchline_core::domain::Stage::Research]);
}
