//! Graceful shutdown signal handling

use std::{fmt, io, time::Duration};

use salvo::server::ServerHandle;
use thiserror::Error;
use tokio::signal;
use tracing::info;

#[derive(Debug, Error)]
pub(crate) enum ShutdownSignalError {
    #[error("failed to install Ctrl+C handler: {0}")]
    CtrlC(#[source] io::Error),

    #[cfg(unix)]
    #[error("failed to install SIGTERM handler: {0}")]
    SigTerm(#[source] io::Error),
}

/// The signal that ended the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ShutdownSignal {
    Interrupt,
    Terminate,
}

impl fmt::Display for ShutdownSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interrupt => f.write_str("interrupt"),
            Self::Terminate => f.write_str("terminate"),
        }
    }
}

/// Wait for a shutdown signal, then stop the server gracefully.
pub(crate) async fn listen(
    handle: ServerHandle,
    grace_period: Duration,
) -> Result<(), ShutdownSignalError> {
    let received = wait_for_signal().await?;

    info!(
        signal = %received,
        grace_secs = grace_period.as_secs(),
        "shutdown signal received, draining connections"
    );

    handle.stop_graceful(Some(grace_period));

    Ok(())
}

#[cfg(unix)]
async fn wait_for_signal() -> Result<ShutdownSignal, ShutdownSignalError> {
    let mut terminate = signal::unix::signal(signal::unix::SignalKind::terminate())
        .map_err(ShutdownSignalError::SigTerm)?;

    tokio::select! {
        result = signal::ctrl_c() => {
            result.map_err(ShutdownSignalError::CtrlC)?;

            Ok(ShutdownSignal::Interrupt)
        }
        _ = terminate.recv() => Ok(ShutdownSignal::Terminate),
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> Result<ShutdownSignal, ShutdownSignalError> {
    signal::ctrl_c().await.map_err(ShutdownSignalError::CtrlC)?;

    Ok(ShutdownSignal::Interrupt)
}
