use crate::infra::axum::AppJson;
use crate::infra::error::AppError;
use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use certificate_dispatch_processor::dispatch_processor::{DispatchProcessor, DispatchProgress};
use serde::Serialize;
use tracing::log::{error, info};

pub struct DispatchRoutes;

impl DispatchRoutes {
    pub fn routes() -> Router<AppState> {
        Router::new()
            .route("/start", post(start_handler))
            .route("/pause", post(pause_handler))
            .route("/resume", post(resume_handler))
            .route("/stop", post(stop_handler))
            .route("/progress", get(progress_handler))
    }
}

#[derive(Serialize)]
struct StartResponse {
    total: usize,
    cursor: usize,
}

#[derive(Serialize)]
struct ControlResponse {
    is_running: bool,
    is_paused: bool,
}

/// Preflight runs here so configuration problems block the session with a
/// visible error; the session itself runs on a background task.
async fn start_handler(State(app_state): State<AppState>) -> Result<(StatusCode, AppJson<StartResponse>), AppError> {
    let plan = DispatchProcessor::preflight(&app_state.resources).await?;

    if app_state.resources.control.is_running() {
        return Err(AppError::conflict("dispatch_already_running", "A dispatch session is already running"));
    }

    let resources = app_state.resources.clone();
    tokio::spawn(async move {
        if let Err(session_error) = DispatchProcessor::run(&resources).await {
            error!("Dispatch session failed with error: {}", session_error);
        }
    });

    info!("POST /dispatch/start accepted with {} recipients pending", plan.eligible.len() - plan.cursor);

    Ok((
        StatusCode::ACCEPTED,
        AppJson(StartResponse {
            total: plan.eligible.len(),
            cursor: plan.cursor,
        }),
    ))
}

async fn pause_handler(State(app_state): State<AppState>) -> AppJson<ControlResponse> {
    app_state.resources.control.pause();
    info!("POST /dispatch/pause");

    control_snapshot(&app_state)
}

async fn resume_handler(State(app_state): State<AppState>) -> AppJson<ControlResponse> {
    app_state.resources.control.resume();
    info!("POST /dispatch/resume");

    control_snapshot(&app_state)
}

async fn stop_handler(State(app_state): State<AppState>) -> AppJson<ControlResponse> {
    app_state.resources.control.stop();
    info!("POST /dispatch/stop");

    control_snapshot(&app_state)
}

async fn progress_handler(State(app_state): State<AppState>) -> Result<AppJson<DispatchProgress>, AppError> {
    let progress = DispatchProcessor::progress(&app_state.resources).await?;
    Ok(AppJson(progress))
}

fn control_snapshot(app_state: &AppState) -> AppJson<ControlResponse> {
    AppJson(ControlResponse {
        is_running: app_state.resources.control.is_running(),
        is_paused: app_state.resources.control.is_paused(),
    })
}
