//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::Json,
};
use tracing::{error, info, warn};

use crate::{
    state::{AppError, AppState},
    workout::WorkoutInput,
};
use super::responses::{ApiResponse, StatusResponse, HealthResponse};

type ApiResult = Result<Json<ApiResponse>, (StatusCode, Json<ApiResponse>)>;

/// Map a failed action to a status code and an error body carrying the current run
fn error_response(state: &AppState, action: &str, err: AppError) -> (StatusCode, Json<ApiResponse>) {
    let run = state.get_snapshot().ok();
    let response = ApiResponse::error(err.to_string(), run);

    match &err {
        AppError::Control(e) if e.field().is_some() => {
            let field = e.field().map(|f| f.key()).unwrap_or_default();
            warn!("{} rejected: {}", action, e);
            (StatusCode::UNPROCESSABLE_ENTITY, Json(response.with_field(field)))
        }
        AppError::Control(e) => {
            warn!("{} rejected: {}", action, e);
            (StatusCode::CONFLICT, Json(response))
        }
        AppError::Lock(_) => {
            error!("{} failed: {}", action, err);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(response))
        }
    }
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| {
            let mime = mime.trim();
            mime.eq_ignore_ascii_case("application/json") || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

/// Read the workout form from a request body.
///
/// An empty body is an empty form, so resuming needs no payload. Anything
/// else must be JSON; a body that does not parse is rejected with the
/// parser's own message instead of being treated as empty.
fn read_form(state: &AppState, headers: &HeaderMap, body: &Bytes) -> Result<WorkoutInput, (StatusCode, Json<ApiResponse>)> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(WorkoutInput::default());
    }

    let rejection = if !has_json_content_type(headers) {
        (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "Expected request with `Content-Type: application/json`".to_string(),
        )
    } else {
        match Json::<WorkoutInput>::from_bytes(body) {
            Ok(Json(input)) => return Ok(input),
            Err(rejection) => (rejection.status(), rejection.body_text()),
        }
    };

    let (status, message) = rejection;
    warn!("Rejecting workout form: {}", message);
    let run = state.get_snapshot().ok();
    Err((status, Json(ApiResponse::error(message, run))))
}

/// Handle POST /start - Start a workout or resume a paused one
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult {
    let input = read_form(&state, &headers, &body)?;

    match state.start(&input) {
        Ok(run) => {
            info!("Start endpoint called - interval {} working", run.current_interval);
            Ok(Json(ApiResponse::phase("Workout running".to_string(), run)))
        }
        Err(e) => Err(error_response(&state, "Start", e)),
    }
}

/// Handle POST /pause - Pause the work countdown
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    match state.pause() {
        Ok(run) => {
            info!("Pause endpoint called - {}s remaining", run.remaining_seconds);
            Ok(Json(ApiResponse::phase("Workout paused".to_string(), run)))
        }
        Err(e) => Err(error_response(&state, "Pause", e)),
    }
}

/// Handle POST /toggle - The combined Start/Pause button
pub async fn toggle_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult {
    let input = read_form(&state, &headers, &body)?;

    match state.toggle(&input) {
        Ok(run) => {
            info!("Toggle endpoint called - now {}", run.phase);
            Ok(Json(ApiResponse::phase(format!("Workout {}", run.phase), run)))
        }
        Err(e) => Err(error_response(&state, "Toggle", e)),
    }
}

/// Handle POST /reset - Return to idle
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    match state.reset() {
        Ok(run) => {
            info!("Reset endpoint called - workout cleared");
            Ok(Json(ApiResponse::phase("Workout reset".to_string(), run)))
        }
        Err(e) => Err(error_response(&state, "Reset", e)),
    }
}

/// Handle GET /status - Return current workout status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let (run, display, notifications_sent) = match (
        state.get_snapshot(),
        state.get_display(),
        state.notifications_sent(),
    ) {
        (Ok(run), Ok(display), Ok(sent)) => (run, display, sent),
        _ => {
            error!("Failed to read workout state");
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        run,
        display,
        notifications_sent,
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
