//! State management module
//! 
//! This module contains the shared application state and the host-side
//! renderer and scheduler the countdown engine is built with.

pub mod app_state;
pub mod display_state;
pub mod scheduler;

// Re-export main types
pub use app_state::{ActionError, AppState, TimerEngine};
pub use display_state::{DisplayState, WatchRenderer};
pub use scheduler::{TickReceiver, TokioScheduler};
