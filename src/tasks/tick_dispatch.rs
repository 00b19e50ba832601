//! Tick dispatch background task

use std::sync::Arc;
use tracing::{debug, error, info};

use crate::{
    engine::TickOutcome,
    state::{AppState, TickReceiver},
};

/// Background task that feeds scheduler ticks into the countdown engine
pub async fn tick_dispatch_task(state: Arc<AppState>, mut tick_rx: TickReceiver) {
    info!("Starting tick dispatch task");

    while let Some(handle) = tick_rx.recv().await {
        match state.handle_tick(handle) {
            Ok(TickOutcome::Ticked { remaining_seconds }) => {
                debug!("Tick {:?}: {}s remaining", handle, remaining_seconds);
            }
            Ok(TickOutcome::Finished) => {
                info!("Countdown reached zero, timer is idle");
            }
            Ok(TickOutcome::Ignored) => {}
            Err(e) => {
                error!("Failed to deliver tick: {}", e);
            }
        }
    }

    info!("Tick channel closed, stopping tick dispatch task");
}
