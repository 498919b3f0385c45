use tokio::sync::broadcast;
use tracing::warn;

use crate::shutdown::{ShutdownReceiver, ShutdownSender};

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// One pending cancellation is enough; later signals are redundant.
const SHUTDOWN_CHANNEL_CAPACITY: usize = 1;

#[must_use]
pub fn shutdown_channel() -> (ShutdownSender, ShutdownReceiver) {
    broadcast::channel::<()>(SHUTDOWN_CHANNEL_CAPACITY)
}

/// Turns the first Ctrl+C (or SIGTERM on unix) into a run cancellation.
///
/// The task ends on its own once anything else broadcasts on the channel.
pub fn setup_signal_shutdown_handler(shutdown_tx: &ShutdownSender) -> tokio::task::JoinHandle<()> {
    let shutdown_tx = shutdown_tx.clone();
    let mut shutdown_rx = shutdown_tx.subscribe();
    tokio::spawn(async move {
        tokio::select! {
            _ = shutdown_rx.recv() => {}
            name = termination_signal() => {
                warn!("Received {}, cancelling the run", name);
                drop(shutdown_tx.send(()));
            }
        }
    })
}

/// Resolves with the name of the first termination signal delivered.
async fn termination_signal() -> &'static str {
    #[cfg(unix)]
    {
        let mut term = match signal(SignalKind::terminate()) {
            Ok(term) => Some(term),
            Err(err) => {
                warn!("Failed to register SIGTERM handler: {}", err);
                None
            }
        };
        let sigterm = async {
            match term.as_mut() {
                Some(term) => {
                    term.recv().await;
                }
                None => std::future::pending::<()>().await,
            }
        };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => "Ctrl+C",
            () = sigterm => "SIGTERM",
        }
    }

    #[cfg(not(unix))]
    {
        drop(tokio::signal::ctrl_c().await);
        "Ctrl+C"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, AppResult};
    use std::future::Future;
    use std::time::Duration;

    const SHUTDOWN_HANDLER_TIMEOUT: Duration = Duration::from_secs(1);

    fn run_async_test<F>(future: F) -> AppResult<()>
    where
        F: Future<Output = AppResult<()>>,
    {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|err| AppError::validation(format!("Failed to build runtime: {}", err)))?;
        runtime.block_on(future)
    }

    #[test]
    fn signal_handler_exits_when_shutdown_is_broadcast() -> AppResult<()> {
        run_async_test(async {
            let (shutdown_tx, _shutdown_rx) = shutdown_channel();
            let handle = setup_signal_shutdown_handler(&shutdown_tx);

            if shutdown_tx.send(()).is_err() {
                return Err(AppError::validation("Failed to send shutdown"));
            }

            match tokio::time::timeout(SHUTDOWN_HANDLER_TIMEOUT, handle).await {
                Ok(Ok(())) => Ok(()),
                Ok(Err(err)) => Err(AppError::validation(format!(
                    "Signal handler panicked: {}",
                    err
                ))),
                Err(_) => Err(AppError::validation("Signal handler did not exit")),
            }
        })
    }

    #[test]
    fn wait_for_shutdown_ignores_closed_channel() -> AppResult<()> {
        run_async_test(async {
            let (shutdown_tx, mut shutdown_rx) = shutdown_channel();
            drop(shutdown_tx);
            let waited = tokio::time::timeout(
                Duration::from_millis(50),
                crate::shutdown::wait_for_shutdown(&mut shutdown_rx),
            )
            .await;
            if waited.is_ok() {
                return Err(AppError::validation(
                    "Closed channel must not count as shutdown",
                ));
            }
            Ok(())
        })
    }
}
