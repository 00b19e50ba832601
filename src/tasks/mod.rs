//! Background tasks module
//! 
//! This module contains background tasks that run alongside the HTTP server.

pub mod tick_dispatch;

// Re-export main functions
pub use tick_dispatch::tick_dispatch_task;
