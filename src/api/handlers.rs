//! HTTP endpoint handlers

use std::{convert::Infallible, sync::Arc};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures::stream::{self, Stream};
use tracing::{debug, error, info, warn};

use crate::{
    engine::{DurationInput, TimerSnapshot, Transition},
    state::{ActionError, AppState},
};
use super::responses::{ApiResponse, HealthResponse, StatusResponse};

type TimerReply = Result<(StatusCode, Json<ApiResponse>), StatusCode>;

/// Snapshot for an error body; a poisoned lock becomes a 500
fn current_snapshot(state: &AppState) -> Result<TimerSnapshot, StatusCode> {
    state.get_snapshot().map_err(|e| {
        error!("Failed to get timer snapshot: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// Handle POST /timer/start - Start a countdown from hours/minutes/seconds
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<DurationInput>, JsonRejection>,
) -> TimerReply {
    let input = match body {
        Ok(Json(input)) => input,
        Err(rejection) => {
            warn!("Rejected start request body: {}", rejection.body_text());
            let timer = current_snapshot(&state)?;
            let message = format!("Invalid duration: {}", rejection.body_text());
            return Ok((StatusCode::BAD_REQUEST, Json(ApiResponse::error(message, timer))));
        }
    };

    match state.start_timer(&input) {
        Ok(timer) => {
            info!("Start endpoint called - countdown of {} started", timer.formatted);
            let message = format!("Countdown started at {}", timer.formatted);
            Ok((StatusCode::OK, Json(ApiResponse::ok(message, timer))))
        }
        Err(ActionError::Timer(e)) => {
            warn!("Rejected start request {:?}: {}", input, e);
            let timer = current_snapshot(&state)?;
            Ok((StatusCode::BAD_REQUEST, Json(ApiResponse::error(e.to_string(), timer))))
        }
        Err(ActionError::Internal(e)) => {
            error!("Failed to start countdown: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /timer/pause - Toggle between paused and running
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> TimerReply {
    match state.pause_timer() {
        Ok((transition, timer)) => {
            let message = match transition {
                Transition::Paused => format!("Countdown paused at {}", timer.formatted),
                Transition::Resumed => format!("Countdown resumed at {}", timer.formatted),
            };
            info!("Pause endpoint called - {}", message);
            Ok((StatusCode::OK, Json(ApiResponse::ok(message, timer))))
        }
        // Only InvalidState is possible here; pausing while idle is dropped
        Err(ActionError::Timer(e)) => {
            debug!("Ignoring pause request: {}", e);
            let timer = current_snapshot(&state)?;
            Ok((StatusCode::OK, Json(ApiResponse::ignored(e.to_string(), timer))))
        }
        Err(ActionError::Internal(e)) => {
            error!("Failed to pause countdown: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /timer/stop - Stop the countdown
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> TimerReply {
    match state.stop_timer() {
        Ok(timer) => {
            info!("Stop endpoint called - countdown stopped");
            Ok((StatusCode::OK, Json(ApiResponse::ok("Countdown stopped".to_string(), timer))))
        }
        Err(e) => {
            error!("Failed to stop countdown: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /timer/stream - Server-sent events carrying the display
pub async fn stream_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let display_rx = state.subscribe_display();

    // Current display first, then one event per change
    let events = stream::unfold((display_rx, true), |(mut rx, first)| async move {
        if !first && rx.changed().await.is_err() {
            return None;
        }
        let display = rx.borrow_and_update().clone();
        let event = match Event::default().event("display").json_data(&display) {
            Ok(event) => event,
            Err(e) => {
                warn!("Failed to encode display event: {}", e);
                Event::default().event("error").data(e.to_string())
            }
        };
        Some((Ok::<_, Infallible>(event), (rx, false)))
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}

/// Handle GET /status - Return current timer status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = current_snapshot(&state)?;
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer,
        display: state.get_display(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
