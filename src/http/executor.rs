use std::sync::Arc;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::{Client, Request};
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::debug;

use crate::error::{AppError, AppResult, EngineError};
use crate::metrics::{CallErrorKind, CallOutcome};

use super::client::PreparedRequest;

/// Status recorded for attempts that never produced an HTTP response.
pub const TRANSPORT_FAILURE_STATUS: u16 = 408;

/// Runs one wave of calls and returns once every call in it has finished.
#[async_trait]
pub trait BatchExecutor: Send + Sync {
    /// Issues exactly `batch_size` calls concurrently.
    ///
    /// Outcomes come back in completion order, not submission order. A call
    /// that fails at the transport level is still reported, with
    /// [`TRANSPORT_FAILURE_STATUS`].
    ///
    /// # Errors
    ///
    /// Returns an error only when a worker cannot be started or joined.
    async fn run_batch(&self, batch_size: usize) -> AppResult<Vec<CallOutcome>>;
}

#[derive(Debug, Clone)]
pub struct HttpBatchExecutor {
    request: Arc<PreparedRequest>,
}

impl HttpBatchExecutor {
    #[must_use]
    pub fn new(request: PreparedRequest) -> Self {
        Self {
            request: Arc::new(request),
        }
    }
}

#[async_trait]
impl BatchExecutor for HttpBatchExecutor {
    async fn run_batch(&self, batch_size: usize) -> AppResult<Vec<CallOutcome>> {
        let mut workers = JoinSet::new();
        for _ in 0..batch_size {
            let (client, request) = self.request.next_call()?;
            workers.spawn(perform_call(client, request));
        }

        // Dropping the set (e.g. on cancellation) aborts whatever is still in flight.
        let mut outcomes = Vec::with_capacity(batch_size);
        while let Some(joined) = workers.join_next().await {
            let outcome = joined
                .map_err(|err| AppError::engine(EngineError::WorkerFailed { source: err }))?;
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }
}

async fn perform_call(client: Client, request: Request) -> CallOutcome {
    let start = Instant::now();
    match client.execute(request).await {
        Ok(response) => {
            let elapsed = start.elapsed();
            let status = response.status().as_u16();
            if let Err(err) = drain_response_body(response).await {
                debug!("Failed to read response body: {}", err);
            }
            CallOutcome::completed(status, elapsed)
        }
        Err(err) => {
            let elapsed = start.elapsed();
            let kind = CallErrorKind::classify(&err);
            debug!("Request failed ({}): {}", kind, err);
            CallOutcome::failed(TRANSPORT_FAILURE_STATUS, kind, elapsed)
        }
    }
}

async fn drain_response_body(response: reqwest::Response) -> Result<u64, reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut total_bytes: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        total_bytes = total_bytes.saturating_add(u64::try_from(bytes.len()).unwrap_or(u64::MAX));
    }
    Ok(total_bytes)
}
