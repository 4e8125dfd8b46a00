use certificate_dispatch_processor::dispatch_processor::HTTP_TIMEOUT_IN_MILLIS;
use certificate_dispatch_processor::dispatch_resources::DispatchResources;
use certificate_dispatch_processor::environment::Environment;
use certificate_dispatch_processor::state_repository::StateRepository;

#[derive(Clone)]
pub struct AppState {
    pub resources: DispatchResources,
}

impl AppState {
    pub fn new() -> Self {
        let state_repository = StateRepository::from_env();
        let resources = DispatchResources::new(state_repository).with_http_timeout_in_millis(Environment::u64("WEBHOOK_TIMEOUT_IN_MILLIS", HTTP_TIMEOUT_IN_MILLIS));

        Self { resources }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
