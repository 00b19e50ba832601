//! Tokio-backed tick scheduler

use std::time::Duration;

use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::debug;

use crate::engine::{Scheduler, TickHandle};

/// Receiving end of the tick channel, drained by the tick dispatch task
pub type TickReceiver = mpsc::UnboundedReceiver<TickHandle>;

/// Scheduler that runs one interval task at a time and sends its handle on
/// every period.
///
/// Must be used from within a tokio runtime.
#[derive(Debug)]
pub struct TokioScheduler {
    tick_tx: mpsc::UnboundedSender<TickHandle>,
    next_id: u64,
    task: Option<(TickHandle, JoinHandle<()>)>,
}

impl TokioScheduler {
    pub fn new() -> (Self, TickReceiver) {
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            tick_tx,
            next_id: 0,
            task: None,
        };
        (scheduler, tick_rx)
    }

    /// Handle of the live interval task, if any
    pub fn active_handle(&self) -> Option<TickHandle> {
        self.task.as_ref().map(|(handle, _)| *handle)
    }

    fn abort_task(&mut self) {
        if let Some((handle, task)) = self.task.take() {
            debug!("Aborting tick task {:?}", handle);
            task.abort();
        }
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_every(&mut self, period: Duration) -> TickHandle {
        // At most one interval task may be alive
        self.abort_task();

        self.next_id += 1;
        let handle = TickHandle(self.next_id);
        let tx = self.tick_tx.clone();

        let task = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(handle).is_err() {
                    break;
                }
            }
        });

        self.task = Some((handle, task));
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        if self.active_handle() == Some(handle) {
            self.abort_task();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        self.abort_task();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ticks_carry_their_handle() {
        let (mut scheduler, mut rx) = TokioScheduler::new();
        let handle = scheduler.schedule_every(Duration::from_millis(5));

        assert_eq!(rx.recv().await, Some(handle));
        assert_eq!(rx.recv().await, Some(handle));
        scheduler.cancel(handle);
        assert_eq!(scheduler.active_handle(), None);
    }

    #[tokio::test]
    async fn test_rescheduling_replaces_task() {
        let (mut scheduler, mut rx) = TokioScheduler::new();
        let first = scheduler.schedule_every(Duration::from_secs(3600));
        let second = scheduler.schedule_every(Duration::from_millis(5));

        assert_ne!(first, second);
        assert_eq!(scheduler.active_handle(), Some(second));
        assert_eq!(rx.recv().await, Some(second));
    }
}
