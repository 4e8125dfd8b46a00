use crate::certificate_config::CertificateConfig;
use crate::delivery_service::{DeliveryService, RETRY_INTERVAL_IN_MILLIS};
use crate::dispatch_resources::DispatchResources;
use crate::error::CertificateDispatchError;
use crate::http_gateway::HttpGateway;
use crate::recipient::Recipient;
use chrono::Utc;
use serde::Serialize;
use std::time::Duration;
use tracing::instrument;
use tracing::log::info;

pub const PAUSE_POLL_INTERVAL_IN_MILLIS: u64 = 100;
pub const HTTP_TIMEOUT_IN_MILLIS: u64 = 30_000;

/// Everything a session needs, resolved and validated before the first
/// network call.
pub struct DispatchPlan {
    pub webhook_url: String,
    pub certificate_template: String,
    pub certificate_config: CertificateConfig,
    pub eligible: Vec<Recipient>,
    pub cursor: usize,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct DispatchSummary {
    pub attempted: usize,
    pub sent: usize,
    pub failed: usize,
    pub aborted: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DispatchProgress {
    pub attempted: usize,
    pub total: usize,
    pub success_count: usize,
    pub error_count: usize,
    pub is_running: bool,
    pub is_paused: bool,
    pub estimated_time_remaining_in_millis: Option<u64>,
    pub estimated_time_remaining: Option<String>,
}

pub struct DispatchProcessor;

impl DispatchProcessor {
    /// Runs one dispatch session to completion, abort, or error. The session
    /// resumes from the result-store length; it never re-sends or skips.
    #[instrument(skip_all, name = "dispatch_session")]
    pub async fn run(resources: &DispatchResources) -> Result<DispatchSummary, CertificateDispatchError> {
        let plan = Self::preflight(resources).await?;

        if !resources.control.try_begin(Utc::now().timestamp_millis()) {
            return Err(CertificateDispatchError::precondition("dispatch_already_running", "A dispatch session is already running"));
        }

        info!("Starting dispatch session with {} of {} recipients pending", plan.eligible.len() - plan.cursor, plan.eligible.len());

        let summary = Self::process(resources, &plan).await;
        resources.control.finish();

        if let Ok(session_summary) = &summary {
            info!(
                "Dispatch session finished: {} attempted, {} sent, {} failed{}",
                session_summary.attempted,
                session_summary.sent,
                session_summary.failed,
                if session_summary.aborted { ", aborted by operator" } else { "" }
            );
        }

        summary
    }

    /// Blocking configuration checks. Nothing is dispatched unless all pass.
    pub async fn preflight(resources: &DispatchResources) -> Result<DispatchPlan, CertificateDispatchError> {
        let state = resources.state_repository.load().await?;

        if state.webhook_url.trim().is_empty() {
            return Err(CertificateDispatchError::precondition("missing_webhook_url", "A webhook URL must be configured before dispatching"));
        }

        let certificate_template = state
            .certificate_template
            .filter(|template| !template.trim().is_empty())
            .ok_or_else(|| CertificateDispatchError::precondition("missing_certificate_template", "A certificate template must be configured before dispatching"))?;

        let eligible = state.recipients.iter().filter(|recipient| recipient.is_eligible).cloned().collect::<Vec<Recipient>>();

        let cursor = state.send_results.len();
        if cursor >= eligible.len() {
            return Err(CertificateDispatchError::precondition("no_pending_recipients", "Every eligible recipient already has a recorded outcome"));
        }

        Ok(DispatchPlan {
            webhook_url: state.webhook_url,
            certificate_template,
            certificate_config: state.certificate_config,
            eligible,
            cursor,
        })
    }

    async fn process(
        resources: &DispatchResources,
        plan: &DispatchPlan,
    ) -> Result<DispatchSummary, CertificateDispatchError> {
        let gateway = HttpGateway::new(resources.http_timeout_in_millis.unwrap_or(HTTP_TIMEOUT_IN_MILLIS))?;
        let retry_interval = resources.retry_interval_in_millis.unwrap_or(RETRY_INTERVAL_IN_MILLIS);
        let pause_poll_interval = resources.pause_poll_interval_in_millis.unwrap_or(PAUSE_POLL_INTERVAL_IN_MILLIS);
        let control = &resources.control;

        let mut summary = DispatchSummary::default();

        for recipient in plan.eligible.iter().skip(plan.cursor) {
            if control.is_aborted() {
                summary.aborted = true;
                break;
            }

            while control.is_paused() {
                tokio::time::sleep(Duration::from_millis(pause_poll_interval)).await;
                if control.is_aborted() {
                    break;
                }
            }

            if control.is_aborted() {
                summary.aborted = true;
                break;
            }

            let result = DeliveryService::deliver(&gateway, &plan.webhook_url, recipient, &plan.certificate_template, &plan.certificate_config, retry_interval).await;

            summary.attempted += 1;
            if result.success {
                summary.sent += 1;
            } else {
                summary.failed += 1;
            }

            let cursor = resources.state_repository.append_result(&result).await?;

            info!(
                "Recipient {} recorded as {} with {} retries, cursor at {} of {}",
                recipient.id,
                if result.success { "sent" } else { "failed" },
                result.retry_count,
                cursor,
                plan.eligible.len()
            );
        }

        Ok(summary)
    }

    /// Point-in-time view over the result store and control flags. The ETA
    /// extrapolates the current session's pace over the remaining recipients
    /// and is absent before the first recorded outcome.
    pub async fn progress(resources: &DispatchResources) -> Result<DispatchProgress, CertificateDispatchError> {
        let state = resources.state_repository.load().await?;

        let total = state.recipients.iter().filter(|recipient| recipient.is_eligible).count();
        let attempted = state.send_results.len();
        let success_count = state.send_results.iter().filter(|result| result.success).count();
        let error_count = attempted - success_count;

        let is_running = resources.control.is_running();

        let estimated_time_remaining_in_millis = if is_running && attempted > 0 {
            resources.control.started_at_in_millis().map(|started_at| {
                let elapsed = (Utc::now().timestamp_millis() - started_at).max(0) as u64;
                let average = elapsed / attempted as u64;
                (total.saturating_sub(attempted)) as u64 * average
            })
        } else {
            None
        };

        Ok(DispatchProgress {
            attempted,
            total,
            success_count,
            error_count,
            is_running,
            is_paused: resources.control.is_paused(),
            estimated_time_remaining_in_millis,
            estimated_time_remaining: estimated_time_remaining_in_millis.map(Self::format_duration),
        })
    }

    fn format_duration(millis: u64) -> String {
        let minutes = millis / 60_000;
        let seconds = (millis % 60_000) / 1000;
        format!("{minutes}m {seconds}s")
    }
}
