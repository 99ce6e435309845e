//! The chat task protocol engine.
//!
//! The service answers asynchronously: a submitted query yields a session
//! id, and the result must be polled for until generation finishes. This
//! module hides that dance behind a single synchronous-looking `run` call.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::error::ChatError;
use crate::extract::extract_answer;
use crate::proto::ChatResult;

/// The two RPCs the engine drives.
///
/// Kept as a trait so tests can substitute a scripted fake for the real
/// gRPC-backed service.
#[async_trait]
pub trait ChatService: Send {
    /// Submit a query; returns the session id to poll with.
    async fn submit_chat_task(&mut self, query: &str) -> Result<String, tonic::Status>;

    /// Fetch the result for a submitted query. The service returns a plain
    /// error while the answer is still being generated.
    async fn get_chat_result(
        &mut self,
        query: &str,
        session_id: &str,
    ) -> Result<ChatResult, tonic::Status>;
}

/// How often and how long to keep polling for an answer.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Retries allowed after the initial attempt.
    pub max_retries: u32,
    /// Fixed delay between attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 10,
            delay: Duration::from_millis(1000),
        }
    }
}

/// Drives one query at a time through submit, poll and extract.
pub struct ChatEngine<S> {
    service: S,
    retry: RetryPolicy,
}

impl<S: ChatService> ChatEngine<S> {
    /// Create an engine with the default retry policy.
    pub fn new(service: S) -> Self {
        Self::with_retry(service, RetryPolicy::default())
    }

    pub fn with_retry(service: S, retry: RetryPolicy) -> Self {
        Self { service, retry }
    }

    /// Submit the query, returning the session id for polling.
    pub async fn submit(&mut self, query: &str) -> Result<String, ChatError> {
        self.service
            .submit_chat_task(query)
            .await
            .map_err(ChatError::from_status)
    }

    /// Poll for the answer until the service returns one.
    ///
    /// "Not ready yet" and a real failure are indistinguishable on the
    /// wire, so every error is retried the same way: wait the fixed delay
    /// and ask again. The attempt counter is scoped to this call and never
    /// resets mid-sequence.
    pub async fn poll(&mut self, query: &str, session_id: &str) -> Result<ChatResult, ChatError> {
        let mut attempt = 0;
        loop {
            match self.service.get_chat_result(query, session_id).await {
                Ok(result) => return Ok(result),
                Err(status) => {
                    if attempt >= self.retry.max_retries {
                        warn!("no answer after {} attempts: {status}", attempt + 1);
                        return Err(ChatError::Timeout);
                    }
                    info!("waiting ...");
                    tokio::time::sleep(self.retry.delay).await;
                    attempt += 1;
                }
            }
        }
    }

    /// Run the full submit/poll/extract sequence for one query.
    pub async fn run(&mut self, query: &str) -> Result<String, ChatError> {
        let session_id = self.submit(query).await?;
        debug!(%session_id, "chat task submitted");
        let result = self.poll(query, &session_id).await?;
        extract_answer(&result).ok_or(ChatError::EmptyAnswer)
    }
}
