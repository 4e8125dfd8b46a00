use crate::send_result::SendResult;
use chrono::Utc;

const REPORT_COLUMNS: [&str; 7] = ["Nome", "CPF", "Email", "Telefone", "Status", "Erro", "Tentativas"];

pub struct ReportService;

impl ReportService {
    /// Renders the outcome ledger as CSV, one row per recorded outcome in
    /// store order. Every value is double-quoted, embedded quotes doubled.
    pub fn csv(results: &[SendResult]) -> String {
        let mut lines = vec![REPORT_COLUMNS.join(",")];

        for result in results {
            let status = if result.success { "Sucesso" } else { "Erro" };
            let retry_count = result.retry_count.to_string();

            let values = [
                result.recipient.name.as_str(),
                result.recipient.tax_id.as_str(),
                result.recipient.email.as_str(),
                result.recipient.phone.as_str(),
                status,
                result.error.as_deref().unwrap_or(""),
                retry_count.as_str(),
            ];

            lines.push(values.iter().map(|value| Self::quote(value)).collect::<Vec<String>>().join(","));
        }

        lines.join("\n")
    }

    pub fn file_name() -> String {
        format!("relatorio-certificados-{}.csv", Utc::now().format("%Y-%m-%d"))
    }

    fn quote(value: &str) -> String {
        format!("\"{}\"", value.replace('"', "\"\""))
    }
}
