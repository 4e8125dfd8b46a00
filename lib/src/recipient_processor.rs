use crate::error::CertificateDispatchError;
use crate::recipient::{RawRecipient, Recipient};
use crate::validation;
use std::collections::HashMap;
use tracing::instrument;
use tracing::log::info;
use uuid::Uuid;

pub struct RecipientProcessor;

impl RecipientProcessor {
    /// Turns decoded spreadsheet rows into normalized raw recipients.
    /// Column names are normalized per row; the first row decides whether all
    /// required columns are present.
    #[instrument(skip_all, name = "ingest_rows")]
    pub fn ingest(rows: &[HashMap<String, String>]) -> Result<Vec<RawRecipient>, CertificateDispatchError> {
        if rows.is_empty() {
            return Err(CertificateDispatchError::precondition("empty_upload", "The uploaded sheet has no rows"));
        }

        let normalized_rows = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|(column, value)| (validation::normalize_column_name(column), value.trim().to_string()))
                    .collect::<HashMap<String, String>>()
            })
            .collect::<Vec<_>>();

        let columns = normalized_rows[0].keys().cloned().collect::<Vec<String>>();
        let column_validation = validation::validate_required_columns(&columns);
        if !column_validation.valid {
            return Err(CertificateDispatchError::precondition(
                "missing_required_columns",
                &format!("Missing required columns: {}", column_validation.missing.join(", ")),
            ));
        }

        let raw_recipients = normalized_rows
            .into_iter()
            .map(|row| RawRecipient {
                nome: row.get("nome").cloned().unwrap_or_default(),
                cpf: row.get("cpf").cloned().unwrap_or_default(),
                telefone: row.get("telefone").cloned().unwrap_or_default(),
                email: row.get("email").cloned().unwrap_or_default(),
                certificado: row.get("certificado").cloned().unwrap_or_default(),
            })
            .collect::<Vec<RawRecipient>>();

        info!("Ingested {} rows", raw_recipients.len());

        Ok(raw_recipients)
    }

    /// Keeps only rows marked "SIM", formats every field and validates the
    /// email. Eligibility is decided here, once.
    #[instrument(skip_all, name = "process_recipients")]
    pub fn process(raw_recipients: &[RawRecipient]) -> Vec<Recipient> {
        let recipients = raw_recipients
            .iter()
            .filter(|raw| raw.certificado.trim().to_uppercase() == "SIM")
            .map(|raw| {
                let email_validation = validation::validate_email(&raw.email);
                Recipient {
                    id: Uuid::now_v7(),
                    name: validation::format_name(&raw.nome),
                    tax_id: validation::format_tax_id(&raw.cpf),
                    phone: validation::format_phone(&raw.telefone),
                    email: raw.email.trim().to_lowercase(),
                    is_eligible: email_validation.is_valid,
                    email_error: email_validation.error,
                }
            })
            .collect::<Vec<Recipient>>();

        info!(
            "Processed {} certified recipients, {} eligible for dispatch",
            recipients.len(),
            recipients.iter().filter(|recipient| recipient.is_eligible).count()
        );

        recipients
    }

    /// Re-runs the email validation after an operator edit. Edited fields are
    /// taken verbatim, no re-formatting.
    pub fn revalidate(recipient: &Recipient) -> Recipient {
        let email_validation = validation::validate_email(&recipient.email);

        Recipient {
            id: recipient.id,
            name: recipient.name.clone(),
            tax_id: recipient.tax_id.clone(),
            phone: recipient.phone.clone(),
            email: recipient.email.clone(),
            is_eligible: email_validation.is_valid,
            email_error: email_validation.error,
        }
    }
}
