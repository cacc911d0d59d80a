/// LLM Client — the single point of entry for all OpenAI API calls.
///
/// ARCHITECTURAL RULE: No other module may call the OpenAI API directly.
/// All provider interactions MUST go through this module.
///
/// No retries anywhere: a failed probe or completion is terminal for the
/// current operation, and the caller presents the failure for a manual retry.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

pub const PROVIDER: &str = "OpenAI";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("OpenAI API key is not set. Set the OPENAI_API_KEY environment variable.")]
    MissingCredential,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("OpenAI API error (status {status}): {body}")]
    Provider { status: u16, body: String },

    #[error("Model '{requested}' is not available. Available models: {}", .available.join(", "))]
    ModelUnavailable {
        requested: String,
        available: Vec<String>,
    },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Connection state reported by the prober. A failed probe is an error,
/// never a descriptor, so the only representable state is `Connected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Connected,
}

/// Result of a successful connectivity probe. Immutable once constructed;
/// retains only the last four characters of the credential for display.
#[derive(Debug, Clone, Serialize)]
pub struct ConnectionDescriptor {
    pub provider: &'static str,
    pub model: String,
    pub version: String,
    pub status: ConnectionStatus,
    pub credential_suffix: String,
}

#[derive(Debug, Deserialize)]
struct ModelCatalog {
    #[serde(default)]
    data: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    id: String,
}

/// Verifies connectivity to OpenAI and that the configured model is servable.
///
/// Fails with `MissingCredential` before any network I/O if no key is
/// configured. One GET to the model catalog; a non-2xx response fails with
/// `Provider` carrying the raw body, and a catalog without the configured
/// model fails with `ModelUnavailable` listing what the provider offered.
pub async fn probe(http: &Client, config: &Config) -> Result<ConnectionDescriptor, LlmError> {
    let api_key = config
        .openai_api_key
        .as_deref()
        .ok_or(LlmError::MissingCredential)?;

    let url = endpoint(&config.openai_base_url, &config.openai_api_version, "models");
    let response = http
        .get(&url)
        .bearer_auth(api_key)
        .header("content-type", "application/json")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(LlmError::Provider {
            status: status.as_u16(),
            body,
        });
    }

    let catalog: ModelCatalog = response.json().await?;
    let available: Vec<String> = catalog.data.into_iter().map(|m| m.id).collect();

    if !available.iter().any(|id| id == &config.openai_model) {
        return Err(LlmError::ModelUnavailable {
            requested: config.openai_model.clone(),
            available,
        });
    }

    debug!(
        "Model '{}' found in catalog of {} models",
        config.openai_model,
        available.len()
    );

    Ok(ConnectionDescriptor {
        provider: PROVIDER,
        model: config.openai_model.clone(),
        version: config.openai_api_version.clone(),
        status: ConnectionStatus::Connected,
        credential_suffix: credential_suffix(api_key),
    })
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// The seam between the optimizer and the provider. Carried in `AppState`
/// as `Arc<dyn CompletionBackend>` so tests can substitute a counting mock.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Sends one system + user message pair and returns the reply text.
    async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError>;
}

/// The production completion backend. Wraps the OpenAI chat-completions API,
/// bound to the model recorded by the startup probe.
#[derive(Debug, Clone)]
pub struct LlmClient {
    http: Client,
    api_key: String,
    chat_url: String,
    model: String,
}

impl LlmClient {
    /// Builds a client bound to a probed connection. Fails with
    /// `MissingCredential` before any request if no key is configured.
    pub fn new(config: &Config, connection: &ConnectionDescriptor) -> Result<Self, LlmError> {
        let api_key = config
            .openai_api_key
            .clone()
            .ok_or(LlmError::MissingCredential)?;

        Ok(Self {
            http: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()?,
            api_key,
            chat_url: endpoint(
                &config.openai_base_url,
                &connection.version,
                "chat/completions",
            ),
            model: connection.model.clone(),
        })
    }
}

#[async_trait]
impl CompletionBackend for LlmClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError> {
        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
        };

        let response = self
            .http
            .post(&self.chat_url)
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        let chat: ChatResponse = response.json().await?;
        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(LlmError::EmptyContent)?;

        debug!("Completion succeeded ({} chars)", content.len());
        Ok(content)
    }
}

/// Joins base URL, API version, and endpoint path, tolerating stray slashes
/// in the configured values.
fn endpoint(base_url: &str, version: &str, path: &str) -> String {
    format!(
        "{}/{}/{}",
        base_url.trim_end_matches('/'),
        version.trim_matches('/'),
        path
    )
}

/// Last four characters of the credential, kept for display and audit.
/// The remainder is discarded and never logged.
fn credential_suffix(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let start = chars.len().saturating_sub(4);
    chars[start..].iter().collect()
}
