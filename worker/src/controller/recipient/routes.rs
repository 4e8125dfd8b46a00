use crate::infra::axum::AppJson;
use crate::infra::error::AppError;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::routing::{post, put};
use axum::Router;
use certificate_dispatch_processor::recipient::Recipient;
use certificate_dispatch_processor::recipient_processor::RecipientProcessor;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::log::info;
use uuid::Uuid;

pub struct RecipientRoutes;

impl RecipientRoutes {
    pub fn routes() -> Router<AppState> {
        Router::new()
            .route("/", post(upload_handler).get(list_handler))
            .route("/:recipient_id", put(edit_handler))
    }
}

#[derive(Serialize)]
struct UploadResponse {
    total_rows: usize,
    certified: usize,
    eligible: usize,
    invalid: usize,
}

/// Accepts decoded spreadsheet rows as key/value records. File parsing lives
/// with the upload client; this boundary only normalizes and validates.
async fn upload_handler(
    State(app_state): State<AppState>,
    AppJson(rows): AppJson<Vec<HashMap<String, String>>>,
) -> Result<AppJson<UploadResponse>, AppError> {
    let raw_rows = RecipientProcessor::ingest(&rows)?;
    let recipients = RecipientProcessor::process(&raw_rows);

    let repository = &app_state.resources.state_repository;
    let mut state = repository.load().await?;

    let response = UploadResponse {
        total_rows: raw_rows.len(),
        certified: recipients.len(),
        eligible: recipients.iter().filter(|recipient| recipient.is_eligible).count(),
        invalid: recipients.iter().filter(|recipient| !recipient.is_eligible).count(),
    };

    state.raw_rows = raw_rows;
    state.recipients = recipients;
    repository.save(&state).await?;

    info!("POST /recipients loaded {} rows, {} certified", response.total_rows, response.certified);

    Ok(AppJson(response))
}

async fn list_handler(State(app_state): State<AppState>) -> Result<AppJson<Vec<Recipient>>, AppError> {
    let state = app_state.resources.state_repository.load().await?;
    Ok(AppJson(state.recipients))
}

#[derive(Deserialize)]
struct EditRecipientRequest {
    nome: Option<String>,
    cpf: Option<String>,
    telefone: Option<String>,
    email: Option<String>,
}

/// Applies operator edits verbatim and recomputes eligibility.
async fn edit_handler(
    State(app_state): State<AppState>,
    Path(recipient_id): Path<Uuid>,
    AppJson(request): AppJson<EditRecipientRequest>,
) -> Result<AppJson<Recipient>, AppError> {
    let repository = &app_state.resources.state_repository;
    let mut state = repository.load().await?;

    let recipient = state
        .recipients
        .iter_mut()
        .find(|recipient| recipient.id == recipient_id)
        .ok_or_else(|| AppError::not_found("recipient_not_found", "No recipient with the given id"))?;

    if let Some(nome) = request.nome {
        recipient.name = nome;
    }
    if let Some(cpf) = request.cpf {
        recipient.tax_id = cpf;
    }
    if let Some(telefone) = request.telefone {
        recipient.phone = telefone;
    }
    if let Some(email) = request.email {
        recipient.email = email;
    }

    *recipient = RecipientProcessor::revalidate(recipient);
    let updated = recipient.clone();

    repository.save(&state).await?;

    Ok(AppJson(updated))
}
