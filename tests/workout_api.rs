use std::{sync::Arc, time::Duration};

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use interval_timer::{
    create_router,
    state::AppState,
    workout::{PhaseKind, WorkoutInput},
};

fn app_state() -> Arc<AppState> {
    Arc::new(AppState::new(20554, "127.0.0.1".to_string(), Duration::from_secs(1)))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn health_reports_ok() {
    let app = create_router(app_state());
    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn start_with_empty_interval_field_names_the_field() {
    let app = create_router(app_state());
    let (status, body) = send(
        &app,
        "POST",
        "/start",
        Some(json!({"numberOfIntervals": "", "workoutDuration": "30", "restDuration": "10"})),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["status"], "error");
    assert_eq!(body["field"], "numberOfIntervals");
    assert_eq!(body["message"], "Please enter the number of intervals");
    assert_eq!(body["run"]["phase"], "idle");

    let (_, status_body) = send(&app, "GET", "/status", None).await;
    assert_eq!(status_body["run"]["phase"], "idle");
    assert_eq!(status_body["display"]["validation_error"]["field"], "numberOfIntervals");
}

#[tokio::test]
async fn start_without_body_reports_missing_intervals() {
    let app = create_router(app_state());
    let (status, body) = send(&app, "POST", "/start", None).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["field"], "numberOfIntervals");
}

#[tokio::test]
async fn non_numeric_duration_is_rejected() {
    let app = create_router(app_state());
    let (status, body) = send(
        &app,
        "POST",
        "/start",
        Some(json!({"numberOfIntervals": 2, "workoutDuration": "abc", "restDuration": 5})),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["field"], "workoutDuration");
}

async fn send_raw(app: &Router, uri: &str, content_type: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", content_type)
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn fractional_duration_names_its_own_field() {
    let app = create_router(app_state());
    let (status, body) = send(
        &app,
        "POST",
        "/start",
        Some(json!({"numberOfIntervals": 3, "workoutDuration": 2.5, "restDuration": 5})),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["field"], "workoutDuration");
    assert_eq!(body["run"]["phase"], "idle");
}

#[tokio::test]
async fn truncated_json_is_a_syntax_error_not_a_missing_field() {
    let app = create_router(app_state());
    let (status, body) = send_raw(&app, "/start", "application/json", r#"{"numberOfIntervals": 3, "work"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert!(body.get("field").is_none());
    assert_ne!(body["message"], "Please enter the number of intervals");
}

#[tokio::test]
async fn wrongly_shaped_field_is_a_data_error() {
    let app = create_router(app_state());
    let (status, body) = send_raw(
        &app,
        "/toggle",
        "application/json",
        r#"{"numberOfIntervals": [3], "workoutDuration": 20, "restDuration": 5}"#,
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.get("field").is_none());
    assert_eq!(body["run"]["phase"], "idle");
}

#[tokio::test]
async fn non_json_body_is_unsupported_media_type() {
    let app = create_router(app_state());
    let (status, body) = send_raw(&app, "/start", "text/plain", "intervals=3").await;

    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body["status"], "error");
    assert!(body.get("field").is_none());
}

#[tokio::test]
async fn start_pause_resume_and_reset_over_http() {
    let app = create_router(app_state());

    let (status, body) = send(
        &app,
        "POST",
        "/start",
        Some(json!({"numberOfIntervals": 3, "workoutDuration": 40, "restDuration": 20})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "working");
    assert_eq!(body["run"]["remaining_seconds"], 40);
    assert_eq!(body["run"]["current_interval"], 1);

    let (status, _) = send(&app, "POST", "/start", Some(json!({}))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(&app, "POST", "/toggle", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "paused");

    let (status, body) = send(&app, "POST", "/start", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "working");
    assert_eq!(body["run"]["interval_count"], 3);

    let (status, body) = send(&app, "POST", "/reset", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["run"]["phase"], "idle");
    assert_eq!(body["run"]["current_interval"], 1);
    assert_eq!(body["run"]["remaining_seconds"], 0);

    let (status, body) = send(&app, "POST", "/pause", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["run"]["phase"], "idle");

    let (_, body) = send(&app, "GET", "/status", None).await;
    assert_eq!(body["last_action"], "reset");
}

#[tokio::test(start_paused = true)]
async fn tick_task_runs_a_workout_to_completion() {
    let state = app_state();
    let mut notifications = state.notification_tx.subscribe();

    state.start(&WorkoutInput::new(2, 3, 2)).unwrap();

    tokio::time::sleep(Duration::from_millis(3_500)).await;
    let run = state.get_snapshot().unwrap();
    assert_eq!(run.phase, PhaseKind::Resting);
    assert_eq!(run.remaining_seconds, 2);

    tokio::time::sleep(Duration::from_secs(2)).await;
    let run = state.get_snapshot().unwrap();
    assert_eq!(run.phase, PhaseKind::Working);
    assert_eq!(run.current_interval, 2);
    assert_eq!(run.remaining_seconds, 3);

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(state.get_snapshot().unwrap().phase, PhaseKind::Complete);
    assert_eq!(state.notifications_sent().unwrap(), 1);
    assert_eq!(notifications.recv().await.unwrap().title, "Workout complete!");
    assert_eq!(state.get_display().unwrap().countdown_text, "Workout complete!");
}

#[tokio::test(start_paused = true)]
async fn paused_workout_keeps_its_remaining_time() {
    let state = app_state();
    state.start(&WorkoutInput::new(1, 10, 5)).unwrap();

    tokio::time::sleep(Duration::from_millis(2_500)).await;
    let paused = state.pause().unwrap();
    assert_eq!(paused.phase, PhaseKind::Paused);
    assert_eq!(paused.remaining_seconds, 8);

    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(state.get_snapshot().unwrap(), paused);

    let resumed = state.start(&WorkoutInput::default()).unwrap();
    assert_eq!(resumed.phase, PhaseKind::Working);
    assert_eq!(resumed.remaining_seconds, 8);

    tokio::time::sleep(Duration::from_millis(1_500)).await;
    assert_eq!(state.get_snapshot().unwrap().remaining_seconds, 7);
}

#[tokio::test(start_paused = true)]
async fn reset_stops_the_tick_source() {
    let state = app_state();
    state.start(&WorkoutInput::new(2, 5, 5)).unwrap();

    tokio::time::sleep(Duration::from_millis(1_500)).await;
    state.reset().unwrap();

    tokio::time::sleep(Duration::from_secs(20)).await;
    let run = state.get_snapshot().unwrap();
    assert_eq!(run.phase, PhaseKind::Idle);
    assert_eq!(run.remaining_seconds, 0);

    // A new run gets exactly one tick per second, not two
    state.start(&WorkoutInput::new(1, 10, 1)).unwrap();
    tokio::time::sleep(Duration::from_millis(3_500)).await;
    assert_eq!(state.get_snapshot().unwrap().remaining_seconds, 7);
}

#[tokio::test(start_paused = true)]
async fn tick_from_a_replaced_source_leaves_the_new_run_alone() {
    let state = app_state();
    state.start(&WorkoutInput::new(2, 5, 5)).unwrap();
    let replaced = state.tick_generation();

    state.reset().unwrap();
    let run = state.start(&WorkoutInput::new(1, 10, 1)).unwrap();

    assert!(!state.tick(replaced).unwrap());
    assert_eq!(state.get_snapshot().unwrap(), run);

    assert!(state.tick(state.tick_generation()).unwrap());
    assert_eq!(state.get_snapshot().unwrap().remaining_seconds, 9);
}
