//! Engine error types

use thiserror::Error;

use super::TimerState;

/// Recoverable errors raised by the countdown engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    /// All three duration fields were zero or absent
    #[error("Duration must be greater than zero")]
    ZeroDuration,

    /// An operation was invoked in a state that does not support it
    #[error("Cannot {operation} while timer is {state}")]
    InvalidState {
        operation: &'static str,
        state: TimerState,
    },

    #[error("Field '{field}' must not be negative (got {value})")]
    NegativeField { field: &'static str, value: i64 },

    #[error("Duration is too large")]
    DurationOverflow,
}
