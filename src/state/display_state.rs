//! Rendered display state and the renderer that publishes it

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::trace;

use crate::engine::{FormattedTime, Renderer};

/// What the countdown display currently shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayState {
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
    /// Remaining fraction for the progress indicator, if one is drawn
    pub progress: Option<f64>,
    /// Set once a stop or completion has cleared the indicator
    pub stopped: bool,
}

impl DisplayState {
    /// Create a display showing zero time and no indicator
    pub fn new() -> Self {
        let zero = FormattedTime::zero();
        Self {
            hours: zero.hours,
            minutes: zero.minutes,
            seconds: zero.seconds,
            progress: None,
            stopped: false,
        }
    }

    /// Displayed time as "HH:MM:SS"
    pub fn time(&self) -> String {
        format!("{}:{}:{}", self.hours, self.minutes, self.seconds)
    }
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::new()
    }
}

/// Renderer that publishes every draw into a watch channel
#[derive(Debug)]
pub struct WatchRenderer {
    tx: watch::Sender<DisplayState>,
    show_progress: bool,
}

impl WatchRenderer {
    /// Create a renderer and the receiver observing it
    pub fn new(show_progress: bool) -> (Self, watch::Receiver<DisplayState>) {
        let (tx, rx) = watch::channel(DisplayState::new());
        (Self { tx, show_progress }, rx)
    }
}

impl Renderer for WatchRenderer {
    fn render_time(&mut self, hours: &str, minutes: &str, seconds: &str) {
        trace!("Rendering {}:{}:{}", hours, minutes, seconds);
        self.tx.send_modify(|display| {
            display.hours = hours.to_string();
            display.minutes = minutes.to_string();
            display.seconds = seconds.to_string();
        });
    }

    fn render_progress(&mut self, fraction: f64) {
        if !self.show_progress {
            return;
        }
        self.tx.send_modify(|display| {
            display.progress = Some(fraction);
            display.stopped = false;
        });
    }

    fn render_stopped(&mut self) {
        self.tx.send_modify(|display| {
            display.progress = None;
            display.stopped = true;
        });
    }
}
