use crate::infra::axum::AppJson;
use crate::infra::error::AppError;
use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{post, put};
use axum::Router;
use serde::Deserialize;
use tracing::log::info;

pub struct SessionRoutes;

impl SessionRoutes {
    pub fn routes() -> Router<AppState> {
        Router::new().route("/reset", post(reset_handler)).route("/step", put(step_handler))
    }
}

/// Full external state reset: the only operation that rewinds the cursor.
async fn reset_handler(State(app_state): State<AppState>) -> Result<StatusCode, AppError> {
    if app_state.resources.control.is_running() {
        return Err(AppError::conflict("dispatch_running", "Stop the running dispatch session before resetting"));
    }

    app_state.resources.state_repository.clear().await?;

    info!("POST /session/reset cleared the stored session");

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
struct StepRequest {
    step: u32,
}

async fn step_handler(
    State(app_state): State<AppState>,
    AppJson(request): AppJson<StepRequest>,
) -> Result<StatusCode, AppError> {
    let repository = &app_state.resources.state_repository;
    let mut state = repository.load().await?;
    state.current_step = request.step;
    repository.save(&state).await?;

    Ok(StatusCode::NO_CONTENT)
}
