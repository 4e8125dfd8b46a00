use crate::dispatch_control::DispatchControl;
use crate::state_repository::StateRepository;
use std::sync::Arc;

#[derive(Clone)]
pub struct DispatchResources {
    pub state_repository: StateRepository,
    pub control: Arc<DispatchControl>,
    pub http_timeout_in_millis: Option<u64>,
    pub retry_interval_in_millis: Option<u64>,
    pub pause_poll_interval_in_millis: Option<u64>,
}

impl DispatchResources {
    pub fn new(state_repository: StateRepository) -> Self {
        Self {
            state_repository,
            control: Arc::new(DispatchControl::new()),
            http_timeout_in_millis: None,
            retry_interval_in_millis: None,
            pause_poll_interval_in_millis: None,
        }
    }

    pub fn with_http_timeout_in_millis(
        self,
        http_timeout: u64,
    ) -> Self {
        Self {
            state_repository: self.state_repository,
            control: self.control,
            http_timeout_in_millis: Some(http_timeout),
            retry_interval_in_millis: self.retry_interval_in_millis,
            pause_poll_interval_in_millis: self.pause_poll_interval_in_millis,
        }
    }

    pub fn with_retry_interval_in_millis(
        self,
        retry_interval: u64,
    ) -> Self {
        Self {
            state_repository: self.state_repository,
            control: self.control,
            http_timeout_in_millis: self.http_timeout_in_millis,
            retry_interval_in_millis: Some(retry_interval),
            pause_poll_interval_in_millis: self.pause_poll_interval_in_millis,
        }
    }

    pub fn with_pause_poll_interval_in_millis(
        self,
        pause_poll_interval: u64,
    ) -> Self {
        Self {
            state_repository: self.state_repository,
            control: self.control,
            http_timeout_in_millis: self.http_timeout_in_millis,
            retry_interval_in_millis: self.retry_interval_in_millis,
            pause_poll_interval_in_millis: Some(pause_poll_interval),
        }
    }
}
