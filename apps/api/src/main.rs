mod config;
mod errors;
mod llm_client;
mod optimizer;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{probe, LlmClient};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting optimizer API v{}", env!("CARGO_PKG_VERSION"));

    // Verify provider connectivity and model availability before serving.
    // A missing credential, unreachable provider, or unknown model fails here.
    let http = reqwest::Client::new();
    let connection = probe(&http, &config).await?;
    info!(
        "Connected to {} (model: {}, api {}, key ...{})",
        connection.provider, connection.model, connection.version, connection.credential_suffix
    );

    let llm = LlmClient::new(&config, &connection)?;

    let state = AppState {
        llm: Arc::new(llm),
        connection,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
