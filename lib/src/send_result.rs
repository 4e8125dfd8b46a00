use crate::recipient::Recipient;
use serde::{Deserialize, Serialize};

/// Terminal outcome of one recipient's delivery sequence. Immutable once
/// appended to the result store.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct SendResult {
    pub recipient: Recipient,
    pub success: bool,
    pub error: Option<String>,
    pub retry_count: u32,
}

impl SendResult {
    pub fn sent(
        recipient: Recipient,
        retry_count: u32,
    ) -> Self {
        Self {
            recipient,
            success: true,
            error: None,
            retry_count,
        }
    }

    pub fn failed(
        recipient: Recipient,
        error: String,
        retry_count: u32,
    ) -> Self {
        Self {
            recipient,
            success: false,
            error: Some(error),
            retry_count,
        }
    }
}
