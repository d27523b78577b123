use std::sync::Arc;

use crate::llm_client::ContentGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable generator. Default: `GeminiClient`, built from the startup config.
    pub generator: Arc<dyn ContentGenerator>,
}
