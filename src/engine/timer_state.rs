//! Timer state structure and snapshot

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle state of a countdown run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    /// No countdown in progress
    #[default]
    Idle,
    Running,
    Paused,
    /// Momentary state between reaching zero and returning to idle
    Finished,
}

impl TimerState {
    /// Check if the countdown is actively ticking
    pub fn is_running(&self) -> bool {
        *self == TimerState::Running
    }

    /// Check if there is no run in progress
    pub fn is_idle(&self) -> bool {
        matches!(self, TimerState::Idle | TimerState::Finished)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimerState::Idle => "idle",
            TimerState::Running => "running",
            TimerState::Paused => "paused",
            TimerState::Finished => "finished",
        }
    }
}

impl fmt::Display for TimerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why the last countdown run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopReason {
    /// The countdown reached zero on its own
    Completed,
    /// The user stopped it
    Stopped,
}

/// Read-only view of the engine, suitable for API responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub state: TimerState,
    pub total_seconds: u64,
    pub remaining_seconds: u64,
    /// Remaining time as "HH:MM:SS"
    pub formatted: String,
    pub progress: Option<f64>,
    pub last_stop: Option<StopReason>,
}
