use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Run cancelled after {completed} of {requested} attempts.")]
    Cancelled { completed: u64, requested: u64 },
    #[error("Request template cannot be cloned for concurrent calls.")]
    RequestNotCloneable,
    #[error("Worker task failed: {source}")]
    WorkerFailed {
        #[source]
        source: tokio::task::JoinError,
    },
    #[error("Batch returned {actual} outcomes, expected {expected}.")]
    IncompleteBatch { expected: usize, actual: usize },
}
