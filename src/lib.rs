//! Countdown Timer - A countdown engine with pause and stop controls
//! 
//! This library provides the countdown state machine, its time formatting
//! and duration parsing rules, and an HTTP host that drives it.

pub mod config;
pub mod engine;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use engine::{CountdownEngine, DurationInput, TimerError, TimerState};
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
