use std::sync::Arc;

use mentor::orchestrator::Orchestrator;

/// Shared application state: the orchestrator is built once at startup
/// and shared read-only across all in-flight requests.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
}

impl AppState {
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
        }
    }
}
