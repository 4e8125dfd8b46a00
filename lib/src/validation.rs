use regex::Regex;

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
const REQUIRED_COLUMNS: [&str; 5] = ["nome", "cpf", "telefone", "email", "certificado"];

#[derive(Debug, Clone, PartialEq)]
pub struct EmailValidation {
    pub is_valid: bool,
    pub error: Option<String>,
}

pub fn validate_email(email: &str) -> EmailValidation {
    if email.trim().is_empty() {
        return EmailValidation {
            is_valid: false,
            error: Some("Email vazio".to_string()),
        };
    }

    let matches = Regex::new(EMAIL_PATTERN).map(|regex| regex.is_match(email.trim())).unwrap_or(false);
    if matches {
        EmailValidation { is_valid: true, error: None }
    } else {
        EmailValidation {
            is_valid: false,
            error: Some("Formato de email inválido".to_string()),
        }
    }
}

/// Upper-cases, strips the literal token "copy" (any casing) and collapses
/// whitespace.
pub fn format_name(name: &str) -> String {
    let mut formatted = name.to_uppercase();

    if let Ok(regex) = Regex::new("(?i)copy") {
        formatted = regex.replace_all(&formatted, "").to_string();
    }

    if let Ok(regex) = Regex::new(r"\s+") {
        formatted = regex.replace_all(&formatted, " ").to_string();
    }

    formatted.trim().to_string()
}

/// Left-pads to 11 digits and renders the XXX.XXX.XXX-XX mask.
pub fn format_tax_id(tax_id: &str) -> String {
    let digits = tax_id.chars().filter(char::is_ascii_digit).collect::<String>();
    let padded = format!("{digits:0>11}");

    if padded.len() == 11 {
        format!("{}.{}.{}-{}", &padded[0..3], &padded[3..6], &padded[6..9], &padded[9..11])
    } else {
        padded
    }
}

/// Normalizes to E.164-like form with the Brazilian country code.
pub fn format_phone(phone: &str) -> String {
    let mut digits = phone.chars().filter(char::is_ascii_digit).collect::<String>();

    if !digits.starts_with("55") && digits.len() <= 11 {
        digits = format!("55{digits}");
    }

    format!("+{digits}")
}

pub fn normalize_column_name(column: &str) -> String {
    let normalized = column.trim().to_lowercase();

    match normalized.as_str() {
        "e-mail" => "email".to_string(),
        "phone" | "fone" | "tel" => "telefone".to_string(),
        _ => normalized,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnValidation {
    pub valid: bool,
    pub missing: Vec<String>,
}

pub fn validate_required_columns(columns: &[String]) -> ColumnValidation {
    let missing = REQUIRED_COLUMNS
        .iter()
        .filter(|required| !columns.iter().any(|column| column == *required))
        .map(|required| required.to_string())
        .collect::<Vec<String>>();

    ColumnValidation {
        valid: missing.is_empty(),
        missing,
    }
}
