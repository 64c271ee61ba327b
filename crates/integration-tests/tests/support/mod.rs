//! Shared fakes for the in-process blob store and queue adapters, used
//! across every integration test in this crate. These stand in for the
//! real S3/SQS adapters (`launchline-infra-blob`/`launchline-infra-queue`)
//! while exercising the exact `BlobStore`/`Queue` port contracts they
//! implement (SPEC_FULL.md §4.1, §4.2).

use async_trait::async_trait;
use launchline_core::error::{AppError, Result};
use launchline_core::port::{BlobStore, Queue, ReceivedMessage};
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

#[derive(Default)]
pub struct FakeBlob {
    store: Mutex<HashMap<String, Value>>,
}

#[async_trait]
impl BlobStore for FakeBlob {
    async fn put(&self, key: &str, value: Value) -> Result<()> {
        self.store.lock().unwrap().insert(key.to_string(), value);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Value> {
        self.store.lock().unwrap().get(key).cloned().ok_or_else(|| AppError::NotFound(key.to_string()))
    }
}

impl FakeBlob {
    pub fn contains(&self, key: &str) -> bool {
        self.store.lock().unwrap().contains_key(key)
    }
}

#[derive(Default)]
pub struct FakeQueue {
    queues: Mutex<HashMap<String, VecDeque<(String, String)>>>,
    sent: Mutex<Vec<(String, Value)>>,
    deleted: Mutex<Vec<String>>,
    next_receipt: AtomicU64,
}

#[async_trait]
impl Queue for FakeQueue {
    async fn send(&self, queue: &str, body: Value) -> Result<()> {
        let receipt = self.next_receipt.fetch_add(1, Ordering::SeqCst).to_string();
        let raw = body.to_string();
        self.queues.lock().unwrap().entry(queue.to_string()).or_default().push_back((receipt, raw));
        self.sent.lock().unwrap().push((queue.to_string(), body));
        Ok(())
    }

    async fn receive(&self, queue: &str, max: i32, _wait_seconds: i32) -> Result<Vec<ReceivedMessage>> {
        let mut queues = self.queues.lock().unwrap();
        let entry = queues.entry(queue.to_string()).or_default();
        let n = (max.max(0) as usize).min(entry.len());
        let drained: Vec<ReceivedMessage> = entry
            .drain(..n)
            .map(|(receipt_handle, body)| ReceivedMessage { body, receipt_handle })
            .collect();
        if drained.is_empty() {
            // Mimic a long-poll's wait instead of busy-spinning the consumer loop.
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
        Ok(drained)
    }

    async fn delete(&self, _queue: &str, receipt_handle: &str) -> Result<()> {
        self.deleted.lock().unwrap().push(receipt_handle.to_string());
        Ok(())
    }
}

impl FakeQueue {
    /// Place a raw (already-serialized) message body directly on `queue`,
    /// bypassing `send`'s bookkeeping — used to simulate a worker placing a
    /// completion event without going through the dispatcher.
    pub fn seed_raw(&self, queue: &str, body: Value) {
        let receipt = self.next_receipt.fetch_add(1, Ordering::SeqCst).to_string();
        self.queues
            .lock()
            .unwrap()
            .entry(queue.to_string())
            .or_default()
            .push_back((receipt, body.to_string()));
    }

    /// Place a raw, not-necessarily-valid-JSON string directly on `queue` —
    /// used to simulate a genuinely unparseable (poison) message.
    pub fn seed_text(&self, queue: &str, body: impl Into<String>) {
        let receipt = self.next_receipt.fetch_add(1, Ordering::SeqCst).to_string();
        self.queues.lock().unwrap().entry(queue.to_string()).or_default().push_back((receipt, body.into()));
    }

    pub fn sent_to(&self, queue: &str) -> Vec<Value> {
        self.sent.lock().unwrap().iter().filter(|(q, _)| q == queue).map(|(_, v)| v.clone()).collect()
    }

    pub fn sent_count(&self, queue: &str) -> usize {
        self.sent_to(queue).len()
    }

    pub fn deleted_count(&self) -> usize {
        self.deleted.lock().unwrap().len()
    }
}
