//! Graceful shutdown signal handling

use std::io;

use thiserror::Error;
use tokio::signal;
use tracing::error;

#[derive(Debug, Error)]
pub(crate) enum ShutdownSignalError {
    #[error("failed to install Ctrl+C handler: {0}")]
    CtrlC(#[source] io::Error),

    #[cfg(unix)]
    #[error("failed to install SIGTERM handler: {0}")]
    SigTerm(#[source] io::Error),

    #[cfg(windows)]
    #[error("failed to install Windows terminate handler: {0}")]
    Terminate(#[source] io::Error),
}

/// Resolves once Ctrl+C or a terminate signal is received.
pub(crate) async fn listen() -> Result<(), ShutdownSignalError> {
    let ctrl_c = async { signal::ctrl_c().await.map_err(ShutdownSignalError::CtrlC) };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .map_err(ShutdownSignalError::SigTerm)?
            .recv()
            .await;
        Ok::<(), ShutdownSignalError>(())
    };

    #[cfg(windows)]
    let terminate = async {
        signal::windows::ctrl_close()
            .map_err(ShutdownSignalError::Terminate)?
            .recv()
            .await;
        Ok::<(), ShutdownSignalError>(())
    };

    tokio::select! {
        result = ctrl_c => {
            result?;
            tracing::info!("ctrl_c signal received");
        }
        result = terminate => {
            result?;
            tracing::info!("terminate signal received");
        }
    };

    Ok(())
}

/// Resolves once a shutdown signal is received.
///
/// When the signal handlers cannot be installed the error is logged and the
/// future never resolves, so the service keeps running.
pub(crate) async fn requested() {
    until_signal(listen()).await;
}

async fn until_signal<F>(listener: F)
where
    F: Future<Output = Result<(), ShutdownSignalError>>,
{
    if let Err(listen_error) = listener.await {
        error!("failed to listen for shutdown signal: {listen_error}");

        std::future::pending::<()>().await;
    }
}
