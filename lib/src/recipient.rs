use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Spreadsheet row after column-name normalization, before any formatting.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct RawRecipient {
    pub nome: String,
    pub cpf: String,
    pub telefone: String,
    pub email: String,
    pub certificado: String,
}

/// Validated dispatch candidate. `is_eligible` is derived from the email
/// validation and only recomputed through an explicit operator edit.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Recipient {
    pub id: Uuid,
    pub name: String,
    pub tax_id: String,
    pub phone: String,
    pub email: String,
    pub is_eligible: bool,
    pub email_error: Option<String>,
}
