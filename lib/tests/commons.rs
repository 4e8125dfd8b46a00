#![allow(dead_code)]

use certificate_dispatch_processor::certificate_config::CertificateConfig;
use certificate_dispatch_processor::dispatch_resources::DispatchResources;
use certificate_dispatch_processor::recipient::Recipient;
use certificate_dispatch_processor::send_result::SendResult;
use certificate_dispatch_processor::state_repository::{StateRepository, StoredState};
use rand::Rng;
use serde_json::json;
use std::collections::HashMap;
use std::net::{SocketAddr, TcpListener};
use std::path::PathBuf;
use std::time::Duration;
use test_context::AsyncTestContext;
use uuid::Uuid;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub struct TestContext {
    pub resources: DispatchResources,
    pub mock_server: MockServer,
    pub webhook_uri: String,
    pub state_path: PathBuf,
}

impl AsyncTestContext for TestContext {
    async fn setup() -> Self {
        let mock_server = Infrastructure::init_mock_server().await;

        let state_path = std::env::temp_dir().join(format!("certificate-dispatch-test-{}.json", Uuid::now_v7()));

        let resources = DispatchResources::new(StateRepository::new(&state_path))
            .with_http_timeout_in_millis(2_000)
            .with_retry_interval_in_millis(20)
            .with_pause_poll_interval_in_millis(10);

        let webhook_uri = format!("{}/webhook", mock_server.uri());

        Self {
            resources,
            mock_server,
            webhook_uri,
            state_path,
        }
    }

    async fn teardown(self) {
        let _ = tokio::fs::remove_file(&self.state_path).await;
    }
}

pub struct Infrastructure;

impl Infrastructure {
    async fn init_mock_server() -> MockServer {
        for _ in 1..10 {
            let port = rand::thread_rng().gen_range(51000..54000);
            let addr = SocketAddr::from(([0, 0, 0, 0], port));
            if let Ok(listener) = TcpListener::bind(addr) {
                return MockServer::builder().listener(listener).start().await;
            }
        }

        panic!("Failed to create mock server");
    }
}

pub struct DefaultData;

impl DefaultData {
    pub fn valid_recipient(
        name: &str,
        email: &str,
    ) -> Recipient {
        Recipient {
            id: Uuid::now_v7(),
            name: name.to_string(),
            tax_id: "000.000.001-11".to_string(),
            phone: "+5511987654321".to_string(),
            email: email.to_string(),
            is_eligible: true,
            email_error: None,
        }
    }

    pub fn ineligible_recipient(name: &str) -> Recipient {
        Recipient {
            id: Uuid::now_v7(),
            name: name.to_string(),
            tax_id: "000.000.001-11".to_string(),
            phone: "+5511987654321".to_string(),
            email: "bad-email".to_string(),
            is_eligible: false,
            email_error: Some("Formato de email inválido".to_string()),
        }
    }

    pub fn raw_row(
        nome: &str,
        cpf: &str,
        telefone: &str,
        email: &str,
        certificado: &str,
    ) -> HashMap<String, String> {
        HashMap::from([
            ("nome".to_string(), nome.to_string()),
            ("cpf".to_string(), cpf.to_string()),
            ("telefone".to_string(), telefone.to_string()),
            ("email".to_string(), email.to_string()),
            ("certificado".to_string(), certificado.to_string()),
        ])
    }

    pub async fn seed_state(
        ctx: &TestContext,
        recipients: Vec<Recipient>,
    ) -> StoredState {
        let webhook_uri = ctx.webhook_uri.clone();
        Self::seed_custom_state(ctx, &webhook_uri, Some("data:image/png;base64,iVBORw0KGgo=".to_string()), recipients).await
    }

    pub async fn seed_custom_state(
        ctx: &TestContext,
        webhook_url: &str,
        certificate_template: Option<String>,
        recipients: Vec<Recipient>,
    ) -> StoredState {
        let state = StoredState {
            webhook_url: webhook_url.to_string(),
            raw_rows: vec![],
            recipients,
            certificate_template,
            certificate_config: CertificateConfig::default(),
            send_results: vec![],
            current_step: 3,
        };

        ctx.resources.state_repository.save(&state).await.unwrap();

        state
    }

    pub async fn stored_results(ctx: &TestContext) -> Vec<SendResult> {
        ctx.resources.state_repository.list_results().await.unwrap()
    }
}

pub struct WebhookMock;

impl WebhookMock {
    pub async fn mock_success(ctx: &TestContext) {
        Mock::given(method("POST"))
            .and(path("/webhook"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&ctx.mock_server)
            .await;
    }

    pub async fn mock_success_with_delay(
        ctx: &TestContext,
        delay_in_millis: u64,
    ) {
        Mock::given(method("POST"))
            .and(path("/webhook"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(delay_in_millis)))
            .mount(&ctx.mock_server)
            .await;
    }

    pub async fn mock_failed(ctx: &TestContext) {
        Mock::given(method("POST"))
            .and(path("/webhook"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&ctx.mock_server)
            .await;
    }

    /// Mount before a catch-all mock: wiremock matches in mount order.
    pub async fn mock_failed_for_name(
        ctx: &TestContext,
        name: &str,
    ) {
        Mock::given(method("POST"))
            .and(path("/webhook"))
            .and(body_partial_json(json!({"aluno": {"nome": name}})))
            .respond_with(ResponseTemplate::new(500))
            .mount(&ctx.mock_server)
            .await;
    }
}

pub struct SessionProbe;

impl SessionProbe {
    pub async fn wait_until_results(
        ctx: &TestContext,
        count: usize,
    ) {
        for _ in 0..500 {
            if ctx.resources.state_repository.results_len().await.unwrap() >= count {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        panic!("Result store never reached {count} outcomes");
    }

    pub async fn wait_until_idle(ctx: &TestContext) {
        for _ in 0..500 {
            if !ctx.resources.control.is_running() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        panic!("Dispatch session did not finish in time");
    }

    pub async fn wait_until_running(ctx: &TestContext) {
        for _ in 0..500 {
            if ctx.resources.control.is_running() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        panic!("Dispatch session never started");
    }
}
