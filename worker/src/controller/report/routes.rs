use crate::infra::error::AppError;
use crate::state::AppState;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use certificate_dispatch_processor::report_service::ReportService;
use tracing::log::info;

pub struct ReportRoutes;

impl ReportRoutes {
    pub fn routes() -> Router<AppState> {
        Router::new().route("/", get(download_handler))
    }
}

async fn download_handler(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let results = app_state.resources.state_repository.list_results().await?;
    let csv = ReportService::csv(&results);
    let file_name = ReportService::file_name();

    info!("GET /report with {} outcomes", results.len());

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{file_name}\"")),
        ],
        csv,
    ))
}
