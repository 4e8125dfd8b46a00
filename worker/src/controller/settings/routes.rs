use crate::infra::axum::AppJson;
use crate::infra::error::AppError;
use crate::state::AppState;
use axum::extract::State;
use axum::routing::{get, post};
use axum::Router;
use certificate_dispatch_processor::certificate_config::CertificateConfig;
use certificate_dispatch_processor::delivery_service::{DeliveryService, WebhookTestResult};
use certificate_dispatch_processor::dispatch_processor::HTTP_TIMEOUT_IN_MILLIS;
use certificate_dispatch_processor::error::CertificateDispatchError;
use certificate_dispatch_processor::http_gateway::HttpGateway;
use serde::{Deserialize, Serialize};
use tracing::log::info;

pub struct SettingsRoutes;

impl SettingsRoutes {
    pub fn routes() -> Router<AppState> {
        Router::new()
            .route("/", get(read_handler).put(update_handler))
            .route("/webhook-test", post(webhook_test_handler))
    }
}

#[derive(Serialize)]
struct SettingsResponse {
    webhook_url: String,
    certificate_template: Option<String>,
    certificate_config: CertificateConfig,
}

async fn read_handler(State(app_state): State<AppState>) -> Result<AppJson<SettingsResponse>, AppError> {
    let state = app_state.resources.state_repository.load().await?;

    Ok(AppJson(SettingsResponse {
        webhook_url: state.webhook_url,
        certificate_template: state.certificate_template,
        certificate_config: state.certificate_config,
    }))
}

#[derive(Deserialize)]
struct UpdateSettingsRequest {
    webhook_url: Option<String>,
    certificate_template: Option<String>,
    certificate_config: Option<CertificateConfig>,
}

async fn update_handler(
    State(app_state): State<AppState>,
    AppJson(request): AppJson<UpdateSettingsRequest>,
) -> Result<AppJson<SettingsResponse>, AppError> {
    let repository = &app_state.resources.state_repository;
    let mut state = repository.load().await?;

    if let Some(webhook_url) = request.webhook_url {
        state.webhook_url = webhook_url;
    }
    if let Some(certificate_template) = request.certificate_template {
        state.certificate_template = Some(certificate_template);
    }
    if let Some(certificate_config) = request.certificate_config {
        state.certificate_config = certificate_config;
    }

    repository.save(&state).await?;

    info!("PUT /settings updated");

    Ok(AppJson(SettingsResponse {
        webhook_url: state.webhook_url,
        certificate_template: state.certificate_template,
        certificate_config: state.certificate_config,
    }))
}

#[derive(Deserialize, Default)]
struct WebhookTestRequest {
    webhook_url: Option<String>,
}

/// Probes the webhook with a marker payload, using the stored URL unless one
/// is given in the request.
async fn webhook_test_handler(
    State(app_state): State<AppState>,
    AppJson(request): AppJson<WebhookTestRequest>,
) -> Result<AppJson<WebhookTestResult>, AppError> {
    let webhook_url = match request.webhook_url {
        Some(webhook_url) if !webhook_url.trim().is_empty() => webhook_url,
        _ => {
            let state = app_state.resources.state_repository.load().await?;
            state.webhook_url
        },
    };

    if webhook_url.trim().is_empty() {
        return Err(AppError::from(CertificateDispatchError::precondition("missing_webhook_url", "No webhook URL to test")));
    }

    let gateway = HttpGateway::new(app_state.resources.http_timeout_in_millis.unwrap_or(HTTP_TIMEOUT_IN_MILLIS))?;
    let result = DeliveryService::test_connection(&gateway, &webhook_url).await;

    Ok(AppJson(result))
}
