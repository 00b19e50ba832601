//! Main application state management

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::engine::{
    CountdownEngine, DurationSource, TickHandle, TickOutcome, TimerError, TimerSnapshot,
    Transition,
};
use super::{DisplayState, TickReceiver, TokioScheduler, WatchRenderer};

/// The engine as wired up by the server
pub type TimerEngine = CountdownEngine<WatchRenderer, TokioScheduler>;

/// Failure of a user action forwarded to the engine
#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Timer(#[from] TimerError),
    #[error("{0}")]
    Internal(String),
}

/// Main application state that owns the countdown engine
#[derive(Debug)]
pub struct AppState {
    /// The single countdown engine
    pub engine: Arc<Mutex<TimerEngine>>,
    /// Latest rendered display
    pub display_rx: watch::Receiver<DisplayState>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl AppState {
    /// Create a new AppState with an idle engine.
    ///
    /// The returned receiver yields scheduler ticks and must be handed to
    /// [`tick_dispatch_task`](crate::tasks::tick_dispatch_task).
    pub fn new(port: u16, host: String, tick_period: Duration, show_progress: bool) -> (Self, TickReceiver) {
        let (renderer, display_rx) = WatchRenderer::new(show_progress);
        let (scheduler, tick_rx) = TokioScheduler::new();
        let engine = CountdownEngine::with_tick_period(renderer, scheduler, tick_period);

        let state = Self {
            engine: Arc::new(Mutex::new(engine)),
            display_rx,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
        };
        (state, tick_rx)
    }

    fn lock_engine(&self) -> Result<MutexGuard<'_, TimerEngine>, String> {
        self.engine.lock()
            .map_err(|e| format!("Failed to lock timer engine: {}", e))
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Start a countdown from the submitted duration
    pub fn start_timer<D: DurationSource + ?Sized>(&self, source: &D) -> Result<TimerSnapshot, ActionError> {
        let mut engine = self.lock_engine().map_err(ActionError::Internal)?;
        engine.start_from(source)?;
        let snapshot = engine.snapshot();
        drop(engine);

        self.record_action("start");
        Ok(snapshot)
    }

    /// Toggle pause on the running countdown
    pub fn pause_timer(&self) -> Result<(Transition, TimerSnapshot), ActionError> {
        let mut engine = self.lock_engine().map_err(ActionError::Internal)?;
        let transition = engine.pause()?;
        let snapshot = engine.snapshot();
        drop(engine);

        self.record_action(match transition {
            Transition::Paused => "pause",
            Transition::Resumed => "resume",
        });
        Ok((transition, snapshot))
    }

    /// Stop the countdown from any state
    pub fn stop_timer(&self) -> Result<TimerSnapshot, String> {
        let mut engine = self.lock_engine()?;
        engine.stop();
        let snapshot = engine.snapshot();
        drop(engine);

        self.record_action("stop");
        Ok(snapshot)
    }

    /// Deliver one scheduler tick to the engine
    pub fn handle_tick(&self, handle: TickHandle) -> Result<TickOutcome, String> {
        let outcome = self.lock_engine()?.on_tick(handle);

        match outcome {
            TickOutcome::Finished => {
                info!("Countdown completed");
                self.record_action("finished");
            }
            TickOutcome::Ignored => debug!("Tick {:?} had no effect", handle),
            TickOutcome::Ticked { .. } => {}
        }
        Ok(outcome)
    }

    /// Get current timer snapshot
    pub fn get_snapshot(&self) -> Result<TimerSnapshot, String> {
        self.lock_engine().map(|engine| engine.snapshot())
    }

    /// Get the current rendered display
    pub fn get_display(&self) -> DisplayState {
        self.display_rx.borrow().clone()
    }

    /// Subscribe to display updates
    pub fn subscribe_display(&self) -> watch::Receiver<DisplayState> {
        self.display_rx.clone()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
