use crate::certificate_config::CertificateConfig;
use crate::error::CertificateDispatchError;
use crate::http_gateway::HttpGateway;
use crate::recipient::Recipient;
use crate::send_result::SendResult;
use chrono::Utc;
use serde::Serialize;
use std::time::Duration;
use tracing::instrument;
use tracing::log::error;

pub const MAX_RETRIES: u32 = 3;
pub const RETRY_INTERVAL_IN_MILLIS: u64 = 2000;

#[derive(Serialize)]
struct DeliveryPayload<'a> {
    aluno: StudentPayload<'a>,
    #[serde(rename = "certificadoTemplate")]
    certificado_template: &'a str,
    config: &'a CertificateConfig,
}

#[derive(Serialize)]
struct StudentPayload<'a> {
    nome: &'a str,
    cpf: &'a str,
    email: &'a str,
    telefone: &'a str,
}

#[derive(Serialize)]
struct ConnectionTestPayload {
    test: bool,
    timestamp: String,
    message: &'static str,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct WebhookTestResult {
    pub success: bool,
    pub status: Option<u16>,
    pub error: Option<String>,
}

pub struct DeliveryService;

impl DeliveryService {
    /// Runs one recipient's full delivery sequence: up to `MAX_RETRIES`
    /// retries with a fixed delay after the initial attempt. Always produces
    /// a terminal outcome, transport problems included.
    #[instrument(skip_all, name = "deliver_certificate")]
    pub async fn deliver(
        gateway: &HttpGateway,
        webhook_url: &str,
        recipient: &Recipient,
        certificate_template: &str,
        config: &CertificateConfig,
        retry_interval_in_millis: u64,
    ) -> SendResult {
        let mut attempt = 0;

        loop {
            match Self::try_send(gateway, webhook_url, recipient, certificate_template, config).await {
                Ok(()) => {
                    return SendResult::sent(recipient.clone(), attempt);
                },
                Err(delivery_error) => {
                    if attempt < MAX_RETRIES {
                        tokio::time::sleep(Duration::from_millis(retry_interval_in_millis)).await;
                        attempt += 1;
                    } else {
                        error!("Failed to deliver certificate to recipient {} after {} attempts cause {}", recipient.id, attempt + 1, delivery_error);
                        return SendResult::failed(recipient.clone(), delivery_error.to_string(), attempt);
                    }
                },
            }
        }
    }

    // One network call per invocation.
    async fn try_send(
        gateway: &HttpGateway,
        webhook_url: &str,
        recipient: &Recipient,
        certificate_template: &str,
        config: &CertificateConfig,
    ) -> Result<(), CertificateDispatchError> {
        let payload = DeliveryPayload {
            aluno: StudentPayload {
                nome: &recipient.name,
                cpf: &recipient.tax_id,
                email: &recipient.email,
                telefone: &recipient.phone,
            },
            certificado_template: certificate_template,
            config,
        };

        let body = serde_json::to_string(&payload).map_err(|error| CertificateDispatchError::new(&error.to_string(), "Failed to serialize delivery payload"))?;

        let result = gateway
            .client
            .post(webhook_url)
            .header("Content-Type", "application/json")
            .header("x-idempotent-key", recipient.id.to_string())
            .body(body)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => Ok(()),
            Ok(response) => Err(CertificateDispatchError::new(
                &format!("HTTP {}", response.status().as_u16()),
                "Webhook returned a non-success status",
            )),
            Err(transport_error) => Err(CertificateDispatchError::new(&transport_error.to_string(), "Failed to reach webhook")),
        }
    }

    /// Single probe request so the operator can check the webhook before a
    /// session, no retry.
    #[instrument(skip_all, name = "test_webhook_connection")]
    pub async fn test_connection(
        gateway: &HttpGateway,
        webhook_url: &str,
    ) -> WebhookTestResult {
        let payload = ConnectionTestPayload {
            test: true,
            timestamp: Utc::now().to_rfc3339(),
            message: "Teste de conexão do Sistema de Certificados",
        };

        let result = match serde_json::to_string(&payload) {
            Ok(body) => gateway.client.post(webhook_url).header("Content-Type", "application/json").body(body).send().await,
            Err(serialize_error) => {
                return WebhookTestResult {
                    success: false,
                    status: None,
                    error: Some(serialize_error.to_string()),
                }
            },
        };

        match result {
            Ok(response) if response.status().is_success() => WebhookTestResult {
                success: true,
                status: Some(response.status().as_u16()),
                error: None,
            },
            Ok(response) => WebhookTestResult {
                success: false,
                status: Some(response.status().as_u16()),
                error: Some(format!("HTTP {}", response.status().as_u16())),
            },
            Err(transport_error) => WebhookTestResult {
                success: false,
                status: None,
                error: Some(transport_error.to_string()),
            },
        }
    }
}
