// SQS Queue Adapter

use crate::config::QueueUrls;
use async_trait::async_trait;
use aws_sdk_sqs::Client;
use launchline_core::error::{AppError, Result};
use launchline_core::port::{Queue, ReceivedMessage};
use tracing::debug;

pub struct SqsQueue {
    client: Client,
    urls: QueueUrls,
}

impl SqsQueue {
    pub async fn connect(urls: QueueUrls) -> Self {
        let shared_config = aws_config::defaults(aws_config::BehaviorVersion::latest()).load().await;
        Self { client: Client::new(&shared_config), urls }
    }

    pub fn from_client(client: Client, urls: QueueUrls) -> Self {
        Self { client, urls }
    }
}

#[async_trait]
impl Queue for SqsQueue {
    async fn send(&self, queue: &str, body: serde_json::Value) -> Result<()> {
        let url = self.urls.resolve(queue)?;
        let body = serde_json::to_string(&body)?;
        self.client
            .send_message()
            .queue_url(url)
            .message_body(body)
            .send()
            .await
            .map_err(|e| AppError::QueueUnavailable(e.to_string()))?;
        debug!(queue, "sent message");
        Ok(())
    }

    async fn receive(
        &self,
        queue: &str,
        max: i32,
        wait_seconds: i32,
    ) -> Result<Vec<ReceivedMessage>> {
        let url = self.urls.resolve(queue)?;
        let output = self
            .client
            .receive_message()
            .queue_url(url)
            .max_number_of_messages(max)
            .wait_time_seconds(wait_seconds)
            .send()
            .await
            .map_err(|e| AppError::QueueUnavailable(e.to_string()))?;

        let messages = output
            .messages
            .unwrap_or_default()
            .into_iter()
            .filter_map(|m| {
                Some(ReceivedMessage { body: m.body?, receipt_handle: m.receipt_handle? })
            })
            .collect();
        Ok(messages)
    }

    async fn delete(&self, queue: &str, receipt_handle: &str) -> Result<()> {
        let url = self.urls.resolve(queue)?;
        self.client
            .delete_message()
            .queue_url(url)
            .receipt_handle(receipt_handle)
            .send()
            .await
            .map_err(|e| AppError::QueueUnavailable(e.to_string()))?;
        Ok(())
    }
}
