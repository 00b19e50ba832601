//! Interfaces the engine consumes from its host

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::DurationInput;

/// Supplies the raw duration fields at start time
pub trait DurationSource {
    fn read(&self) -> DurationInput;
}

/// Draws the countdown.
///
/// Only `render_time` is required; a renderer without a progress indicator
/// leaves the other two as no-ops.
pub trait Renderer {
    fn render_time(&mut self, hours: &str, minutes: &str, seconds: &str);

    /// Fraction of the run still remaining, in `[0, 1]`
    fn render_progress(&mut self, _fraction: f64) {}

    /// Clear the progress indicator after a stop or completion
    fn render_stopped(&mut self) {}
}

/// Identifies one scheduled periodic tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TickHandle(pub u64);

/// Host-provided periodic execution
pub trait Scheduler {
    /// Start delivering ticks every `period`, tagged with the returned handle
    fn schedule_every(&mut self, period: Duration) -> TickHandle;

    /// Stop delivering ticks for `handle`
    fn cancel(&mut self, handle: TickHandle);
}
