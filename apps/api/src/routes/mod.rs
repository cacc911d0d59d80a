pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::optimizer::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/listings/optimize",
            post(handlers::handle_optimize),
        )
        .route("/api/v1/connection", get(handlers::handle_connection))
        .with_state(state)
}
