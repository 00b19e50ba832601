use std::{sync::Arc, time::Duration};

use axum::{
    body::{Body, BodyDataStream},
    http::{Method, Request, StatusCode},
    Router,
};
use futures::StreamExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use countdown_timer::{api::create_router, state::AppState, tasks::tick_dispatch_task};

/// Router whose ticks are delivered every `tick`
fn app(tick: Duration) -> Router {
    let (state, tick_rx) = AppState::new(0, "127.0.0.1".to_string(), tick, true);
    let state = Arc::new(state);
    tokio::spawn(tick_dispatch_task(Arc::clone(&state), tick_rx));
    create_router(state)
}

/// Router that never ticks within a test's lifetime
fn frozen_app() -> Router {
    app(Duration::from_secs(3600))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    send_raw(app, method, uri, body.map(|body| body.to_string())).await
}

async fn send_raw(app: &Router, method: Method, uri: &str, body: Option<String>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn start(app: &Router, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, "/timer/start", Some(body)).await
}

async fn next_event(events: &mut BodyDataStream) -> String {
    let chunk = tokio::time::timeout(Duration::from_secs(2), events.next())
        .await
        .expect("no event within timeout")
        .unwrap()
        .unwrap();
    String::from_utf8(chunk.to_vec()).unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let app = frozen_app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn zero_duration_is_rejected() {
    let app = frozen_app();
    let (status, body) = start(&app, json!({"hours": 0, "minutes": 0, "seconds": 0})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert_eq!(body["timer"]["state"], "idle");

    let (status, _) = start(&app, json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn negative_field_is_rejected() {
    let app = frozen_app();
    let (status, body) = start(&app, json!({"hours": -1, "seconds": 30})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["timer"]["state"], "idle");
}

#[tokio::test]
async fn oversized_field_is_rejected_as_overflow() {
    let app = frozen_app();
    let body = r#"{"hours": 99999999999999999999}"#.to_string();
    let (status, body) = send_raw(&app, Method::POST, "/timer/start", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Duration is too large");
    assert_eq!(body["timer"]["state"], "idle");
}

#[tokio::test]
async fn null_field_counts_as_zero() {
    let app = frozen_app();
    let (status, body) = start(&app, json!({"hours": null, "seconds": 3})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["total_seconds"], 3);
    assert_eq!(body["timer"]["formatted"], "00:00:03");
}

#[tokio::test]
async fn undecodable_body_gets_error_response() {
    let app = frozen_app();
    let (status, body) = start(&app, json!({"seconds": "soon"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert_eq!(body["timer"]["state"], "idle");
}

#[tokio::test]
async fn stream_sends_current_display_then_changes() {
    let app = frozen_app();
    let request = Request::builder()
        .method(Method::GET)
        .uri("/timer/stream")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let mut events = response.into_body().into_data_stream();

    let first = next_event(&mut events).await;
    assert!(first.contains("event: display"), "{}", first);
    assert!(first.contains(r#""hours":"00""#), "{}", first);
    assert!(first.contains(r#""minutes":"00""#), "{}", first);
    assert!(first.contains(r#""seconds":"00""#), "{}", first);

    start(&app, json!({"minutes": 1, "seconds": 30})).await;

    let second = next_event(&mut events).await;
    assert!(second.contains("event: display"), "{}", second);
    assert!(second.contains(r#""minutes":"01""#), "{}", second);
    assert!(second.contains(r#""seconds":"30""#), "{}", second);
}

#[tokio::test]
async fn start_renders_initial_display() {
    let app = frozen_app();
    let (status, body) = start(&app, json!({"minutes": 1, "seconds": 30})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "running");
    assert_eq!(body["timer"]["total_seconds"], 90);
    assert_eq!(body["timer"]["remaining_seconds"], 90);
    assert_eq!(body["timer"]["formatted"], "00:01:30");

    let (_, status) = send(&app, Method::GET, "/status", None).await;
    assert_eq!(status["display"]["minutes"], "01");
    assert_eq!(status["display"]["seconds"], "30");
    assert_eq!(status["display"]["progress"], 1.0);
    assert_eq!(status["last_action"], "start");
}

#[tokio::test]
async fn pause_while_idle_is_ignored() {
    let app = frozen_app();
    let (status, body) = send(&app, Method::POST, "/timer/pause", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ignored");
    assert_eq!(body["timer"]["state"], "idle");
}

#[tokio::test]
async fn pause_toggles_then_stop_resets() {
    let app = frozen_app();
    start(&app, json!({"seconds": 5})).await;

    let (_, body) = send(&app, Method::POST, "/timer/pause", None).await;
    assert_eq!(body["status"], "paused");
    assert_eq!(body["timer"]["remaining_seconds"], 5);

    let (_, body) = send(&app, Method::POST, "/timer/pause", None).await;
    assert_eq!(body["status"], "running");
    assert_eq!(body["timer"]["remaining_seconds"], 5);

    let (status, body) = send(&app, Method::POST, "/timer/stop", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "idle");
    assert_eq!(body["timer"]["remaining_seconds"], 0);
    assert_eq!(body["timer"]["last_stop"], "stopped");

    let (_, status) = send(&app, Method::GET, "/status", None).await;
    assert_eq!(status["display"]["stopped"], true);
    assert_eq!(status["display"]["progress"], Value::Null);
}

#[tokio::test]
async fn countdown_runs_to_completion() {
    let app = app(Duration::from_millis(10));
    let (status, _) = start(&app, json!({"seconds": 3})).await;
    assert_eq!(status, StatusCode::OK);

    let mut last = Value::Null;
    for _ in 0..200 {
        tokio::time::sleep(Duration::from_millis(10)).await;
        let (_, status) = send(&app, Method::GET, "/status", None).await;
        last = status;
        if last["timer"]["state"] == "idle" {
            break;
        }
    }

    assert_eq!(last["timer"]["state"], "idle");
    assert_eq!(last["timer"]["last_stop"], "completed");
    assert_eq!(last["timer"]["remaining_seconds"], 0);
    assert_eq!(last["display"]["hours"], "00");
    assert_eq!(last["display"]["minutes"], "00");
    assert_eq!(last["display"]["seconds"], "00");
    assert_eq!(last["display"]["stopped"], true);
    assert_eq!(last["last_action"], "finished");
}
