//! Ctrl-C handling for the binary.

use std::future::Future;
use std::io;

use tracing::warn;

/// Resolves once `signal` reports an interrupt.
///
/// If the handler could not be installed the run continues without one:
/// the returned future never resolves.
pub async fn interrupted<F>(signal: F)
where
    F: Future<Output = io::Result<()>>,
{
    if let Err(e) = signal.await {
        warn!(error = %e, "could not listen for Ctrl-C, running without it");
        std::future::pending::<()>().await;
    }
}
