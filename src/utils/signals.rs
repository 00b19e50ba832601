//! Signal handling for graceful shutdown

use std::{fmt::Display, future::Future};

use signal_hook_tokio::Signals;
use futures::stream::StreamExt;
use tracing::{info, warn};

/// Wait for shutdown signals (SIGTERM, SIGINT)
pub async fn shutdown_signal() {
    let mut signals = match Signals::new([
        signal_hook::consts::SIGTERM,
        signal_hook::consts::SIGINT,
    ]) {
        Ok(signals) => signals,
        Err(e) => {
            warn!("Failed to register signal handler, falling back to ctrl-c: {}", e);
            wait_or_park(tokio::signal::ctrl_c()).await;
            return;
        }
    };

    if let Some(signal) = signals.next().await {
        info!("Received signal: {}", signal);
    }
    signals.handle().close();
}

/// Resolve when `listener` reports a signal; if it cannot listen at all,
/// never resolve so the server keeps running.
async fn wait_or_park<F, E>(listener: F)
where
    F: Future<Output = Result<(), E>>,
    E: Display,
{
    if let Err(e) = listener.await {
        warn!("Failed to listen for ctrl-c, running until killed: {}", e);
        std::future::pending::<()>().await;
    }
}
