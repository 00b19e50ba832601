//! Countdown engine module
//! 
//! This module contains the countdown state machine, the time formatting and
//! duration parsing rules, and the collaborator traits the engine drives.

pub mod collaborators;
pub mod countdown;
pub mod duration;
pub mod error;
pub mod format;
pub mod timer_state;

// Re-export main types
pub use collaborators::{DurationSource, Renderer, Scheduler, TickHandle};
pub use countdown::{CountdownEngine, TickOutcome, Transition, TICK_PERIOD};
pub use duration::DurationInput;
pub use error::TimerError;
pub use format::{format_seconds, two_digits, FormattedTime};
pub use timer_state::{StopReason, TimerSnapshot, TimerState};
