use std::sync::Arc;

use crate::assessment::store::SessionStore;
use crate::config::Config;
use crate::llm_client::ChatBackend;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Model backend. Default: GeminiClient. Tests swap in a scripted backend.
    pub llm: Arc<dyn ChatBackend>,
    pub sessions: SessionStore,
    pub config: Config,
}
