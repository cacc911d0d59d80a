use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
///
/// The OpenAI credential is optional at load time: its absence surfaces as
/// `LlmError::MissingCredential` from the components that need it, before any
/// network call, rather than as a config-load failure.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
    pub openai_api_version: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: std::env::var("OPENAI_API_KEY")
                .ok()
                .filter(|key| !key.is_empty()),
            openai_base_url: env_or("OPENAI_BASE_URL", "https://api.openai.com"),
            openai_model: env_or("OPENAI_MODEL", "gpt-4o"),
            openai_api_version: env_or("OPENAI_API_VERSION", "v1"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
