//! Countdown state machine

use std::time::Duration;

use tracing::{debug, info};

use super::{
    format_seconds, DurationSource, Renderer, Scheduler, StopReason, TickHandle, TimerError,
    TimerSnapshot, TimerState,
};

/// Interval between two ticks
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Result of delivering one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Remaining time decreased and is still above zero
    Ticked { remaining_seconds: u64 },
    /// Remaining time reached zero; the engine is idle again
    Finished,
    /// Not running, or the tick belonged to a cancelled schedule
    Ignored,
}

/// State change produced by a pause toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Paused,
    Resumed,
}

/// Owns one countdown and drives its renderer and scheduler
#[derive(Debug)]
pub struct CountdownEngine<R, S> {
    renderer: R,
    scheduler: S,
    state: TimerState,
    total_seconds: u64,
    remaining_seconds: u64,
    tick_handle: Option<TickHandle>,
    tick_period: Duration,
    last_stop: Option<StopReason>,
}

impl<R: Renderer, S: Scheduler> CountdownEngine<R, S> {
    /// Create an idle engine ticking once per second
    pub fn new(renderer: R, scheduler: S) -> Self {
        Self::with_tick_period(renderer, scheduler, TICK_PERIOD)
    }

    pub fn with_tick_period(renderer: R, scheduler: S, tick_period: Duration) -> Self {
        Self {
            renderer,
            scheduler,
            state: TimerState::Idle,
            total_seconds: 0,
            remaining_seconds: 0,
            tick_handle: None,
            tick_period,
            last_stop: None,
        }
    }

    /// Begin a new countdown of `duration_seconds`, replacing any current one
    pub fn start(&mut self, duration_seconds: u64) -> Result<(), TimerError> {
        if duration_seconds == 0 {
            return Err(TimerError::ZeroDuration);
        }

        self.cancel_tick();
        self.total_seconds = duration_seconds;
        self.remaining_seconds = duration_seconds;
        self.state = TimerState::Running;
        self.last_stop = None;
        self.schedule_tick();

        info!("Countdown started for {} seconds", duration_seconds);
        self.render_time();
        self.renderer.render_progress(1.0);
        Ok(())
    }

    /// Read the duration from `source` and start counting down
    pub fn start_from<D: DurationSource + ?Sized>(&mut self, source: &D) -> Result<(), TimerError> {
        let duration = source.read().to_seconds()?;
        self.start(duration)
    }

    /// Advance the countdown by one second
    pub fn tick(&mut self) -> TickOutcome {
        if !self.state.is_running() {
            debug!("Ignoring tick while {}", self.state);
            return TickOutcome::Ignored;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        self.render_time();

        if self.remaining_seconds == 0 {
            self.state = TimerState::Finished;
            info!("Countdown finished after {} seconds", self.total_seconds);
            self.halt();
            self.last_stop = Some(StopReason::Completed);
            return TickOutcome::Finished;
        }

        self.renderer.render_progress(self.fraction());
        debug!("Tick: {} seconds remaining", self.remaining_seconds);
        TickOutcome::Ticked {
            remaining_seconds: self.remaining_seconds,
        }
    }

    /// Deliver a tick from the scheduler, dropping it if `handle` was cancelled
    pub fn on_tick(&mut self, handle: TickHandle) -> TickOutcome {
        if self.tick_handle != Some(handle) {
            debug!("Dropping stale tick {:?}", handle);
            return TickOutcome::Ignored;
        }
        self.tick()
    }

    /// Toggle between running and paused
    pub fn pause(&mut self) -> Result<Transition, TimerError> {
        match self.state {
            TimerState::Running => {
                self.cancel_tick();
                self.state = TimerState::Paused;
                info!("Countdown paused with {} seconds remaining", self.remaining_seconds);
                Ok(Transition::Paused)
            }
            TimerState::Paused if self.remaining_seconds > 0 => {
                self.state = TimerState::Running;
                self.schedule_tick();
                info!("Countdown resumed with {} seconds remaining", self.remaining_seconds);
                Ok(Transition::Resumed)
            }
            state => Err(TimerError::InvalidState {
                operation: "pause",
                state,
            }),
        }
    }

    /// Abort the countdown from any state.
    ///
    /// Stopping an idle engine keeps the reason the previous run ended.
    pub fn stop(&mut self) {
        if !self.state.is_idle() {
            info!("Countdown stopped with {} seconds remaining", self.remaining_seconds);
            self.last_stop = Some(StopReason::Stopped);
        }
        self.halt();
        self.render_time();
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn total_seconds(&self) -> u64 {
        self.total_seconds
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    /// Remaining fraction of the current run, if one is in progress
    pub fn progress(&self) -> Option<f64> {
        if self.state.is_idle() {
            None
        } else {
            Some(self.fraction())
        }
    }

    /// Check if a tick schedule is outstanding
    pub fn has_scheduled_tick(&self) -> bool {
        self.tick_handle.is_some()
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            state: self.state,
            total_seconds: self.total_seconds,
            remaining_seconds: self.remaining_seconds,
            formatted: format_seconds(self.remaining_seconds).to_string(),
            progress: self.progress(),
            last_stop: self.last_stop,
        }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Cancel the schedule, zero the run and clear the progress indicator
    fn halt(&mut self) {
        self.cancel_tick();
        self.remaining_seconds = 0;
        self.total_seconds = 0;
        self.state = TimerState::Idle;
        self.renderer.render_stopped();
    }

    fn schedule_tick(&mut self) {
        let handle = self.scheduler.schedule_every(self.tick_period);
        debug!("Scheduled tick {:?} every {:?}", handle, self.tick_period);
        self.tick_handle = Some(handle);
    }

    fn cancel_tick(&mut self) {
        if let Some(handle) = self.tick_handle.take() {
            debug!("Cancelling tick {:?}", handle);
            self.scheduler.cancel(handle);
        }
    }

    fn fraction(&self) -> f64 {
        if self.total_seconds == 0 {
            return 0.0;
        }
        self.remaining_seconds as f64 / self.total_seconds as f64
    }

    fn render_time(&mut self) {
        let time = format_seconds(self.remaining_seconds);
        self.renderer
            .render_time(&time.hours, &time.minutes, &time.seconds);
    }
}
