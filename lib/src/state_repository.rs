use crate::certificate_config::CertificateConfig;
use crate::environment::Environment;
use crate::error::CertificateDispatchError;
use crate::recipient::{RawRecipient, Recipient};
use crate::send_result::SendResult;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::log::error;

/// The single persisted blob. Every field defaults independently so a file
/// written by an older build still loads merged over current defaults.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct StoredState {
    #[serde(default)]
    pub webhook_url: String,
    #[serde(default)]
    pub raw_rows: Vec<RawRecipient>,
    #[serde(default)]
    pub recipients: Vec<Recipient>,
    #[serde(default)]
    pub certificate_template: Option<String>,
    #[serde(default)]
    pub certificate_config: CertificateConfig,
    #[serde(default)]
    pub send_results: Vec<SendResult>,
    #[serde(default)]
    pub current_step: u32,
}

/// File-backed store for [`StoredState`]. The `send_results` list doubles as
/// the dispatch ledger: append order is dispatch order and its length is the
/// resume cursor.
#[derive(Clone)]
pub struct StateRepository {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl StateRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn from_env() -> Self {
        Self::new(Environment::string("STATE_FILE", "certificate-dispatch-state.json"))
    }

    /// Unreadable or corrupt files load as defaults, matching a fresh session.
    pub async fn load(&self) -> Result<StoredState, CertificateDispatchError> {
        let _guard = self.lock.lock().await;
        Ok(self.read_state().await)
    }

    pub async fn save(
        &self,
        state: &StoredState,
    ) -> Result<(), CertificateDispatchError> {
        let _guard = self.lock.lock().await;
        self.write_state(state).await
    }

    /// Appends one outcome and commits before returning. The returned length
    /// is the new resume cursor.
    pub async fn append_result(
        &self,
        result: &SendResult,
    ) -> Result<usize, CertificateDispatchError> {
        let _guard = self.lock.lock().await;

        let mut state = self.read_state().await;
        state.send_results.push(result.clone());
        self.write_state(&state).await?;

        Ok(state.send_results.len())
    }

    pub async fn list_results(&self) -> Result<Vec<SendResult>, CertificateDispatchError> {
        let _guard = self.lock.lock().await;
        Ok(self.read_state().await.send_results)
    }

    pub async fn results_len(&self) -> Result<usize, CertificateDispatchError> {
        let _guard = self.lock.lock().await;
        Ok(self.read_state().await.send_results.len())
    }

    pub async fn clear(&self) -> Result<(), CertificateDispatchError> {
        let _guard = self.lock.lock().await;

        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(io_error) if io_error.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(io_error) => Err(CertificateDispatchError::new(&io_error.to_string(), "Failed to clear state file")),
        }
    }

    async fn read_state(&self) -> StoredState {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice::<StoredState>(&bytes).unwrap_or_else(|parse_error| {
                error!("Failed to parse state file {}: {}", self.path.display(), parse_error);
                StoredState::default()
            }),
            Err(io_error) => {
                if io_error.kind() != std::io::ErrorKind::NotFound {
                    error!("Failed to read state file {}: {}", self.path.display(), io_error);
                }
                StoredState::default()
            },
        }
    }

    // Write-then-rename keeps a crash from leaving a half-written blob.
    async fn write_state(
        &self,
        state: &StoredState,
    ) -> Result<(), CertificateDispatchError> {
        let bytes = serde_json::to_vec(state).map_err(|error| CertificateDispatchError::new(&error.to_string(), "Failed to serialize state"))?;

        let temp_path = self.path.with_extension("json.tmp");

        tokio::fs::write(&temp_path, &bytes)
            .await
            .map_err(|error| CertificateDispatchError::new(&error.to_string(), "Failed to write state file"))?;

        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|error| CertificateDispatchError::new(&error.to_string(), "Failed to commit state file"))
    }
}
