use tokio::time::Instant;
use tracing::{debug, info};
use url::Url;

use crate::args::PositiveUsize;
use crate::error::{AppError, AppResult, EngineError};
use crate::http::{
    BatchExecutor, ClientSettings, HttpBatchExecutor, PreparedRequest, RequestSpec, build_client,
};
use crate::metrics::{RunResult, fold};
use crate::shutdown::{ShutdownReceiver, wait_for_shutdown};

use super::scheduler::next_batch_size;

/// How many attempts to make and how many may be in flight together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunPlan {
    pub attempts: u64,
    pub concurrency: PositiveUsize,
}

/// A run that has not started yet.
///
/// [`Engine::run`] consumes it and yields a finalized [`RunResult`], so a
/// result is only ever observable once every attempt is accounted for.
pub struct Engine<E> {
    executor: E,
    target_url: Url,
    plan: RunPlan,
}

impl<E> Engine<E>
where
    E: BatchExecutor,
{
    pub const fn new(executor: E, target_url: Url, plan: RunPlan) -> Self {
        Self {
            executor,
            target_url,
            plan,
        }
    }

    /// Drives waves until every attempt has been made.
    ///
    /// A shutdown signal stops the run between waves or aborts the current
    /// wave's in-flight calls.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Cancelled`] on shutdown, or the executor's error
    /// when a wave cannot be run. No partial result is returned.
    pub async fn run(self, shutdown_rx: &mut ShutdownReceiver) -> AppResult<RunResult> {
        let Engine {
            executor,
            target_url,
            plan,
        } = self;
        let started = Instant::now();
        let mut result = RunResult::new(target_url, plan.attempts);
        let mut remaining = plan.attempts;

        loop {
            let batch_size = next_batch_size(remaining, plan.concurrency);
            if batch_size == 0 {
                break;
            }
            debug!(
                "Starting wave {} with {} calls ({} remaining)",
                result.waves().saturating_add(1),
                batch_size,
                remaining
            );

            let outcomes = tokio::select! {
                biased;
                () = wait_for_shutdown(shutdown_rx) => {
                    return Err(AppError::engine(EngineError::Cancelled {
                        completed: plan.attempts.saturating_sub(remaining),
                        requested: plan.attempts,
                    }));
                }
                outcomes = executor.run_batch(batch_size) => outcomes?,
            };
            if outcomes.len() != batch_size {
                return Err(AppError::engine(EngineError::IncompleteBatch {
                    expected: batch_size,
                    actual: outcomes.len(),
                }));
            }

            fold(&mut result, outcomes);
            remaining = remaining.saturating_sub(u64::try_from(batch_size).unwrap_or(u64::MAX));
        }

        result.finalize(started.elapsed());
        info!(
            "Finished {} attempts against {} in {} waves ({:.2}s)",
            result.attempts(),
            result.target_url(),
            result.waves(),
            result.total_elapsed_secs()
        );
        Ok(result)
    }
}

/// Builds the client for `spec` and benchmarks it according to `plan`.
///
/// Setup failures (client or request construction) are returned before any
/// request is sent.
///
/// # Errors
///
/// Returns setup errors, or the errors of [`Engine::run`].
pub async fn make_it(
    spec: &RequestSpec,
    plan: RunPlan,
    settings: &ClientSettings,
    shutdown_rx: &mut ShutdownReceiver,
) -> AppResult<RunResult> {
    let client = build_client(settings)?;
    let request = PreparedRequest::new(client, spec)?;
    let executor = HttpBatchExecutor::new(request);
    Engine::new(executor, spec.url().clone(), plan)
        .run(shutdown_rx)
        .await
}
