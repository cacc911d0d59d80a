use std::sync::Arc;

use crate::llm_client::{CompletionBackend, ConnectionDescriptor};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable completion backend. Production: `LlmClient` over OpenAI.
    pub llm: Arc<dyn CompletionBackend>,
    /// Descriptor from the startup connectivity probe. Immutable.
    pub connection: ConnectionDescriptor,
}
