use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::llm_client::ConnectionDescriptor;
use crate::optimizer::fields::{Listing, ListingField, OptimizedListing};
use crate::optimizer::rewrite::generate_optimized_listing;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct OptimizeResponse {
    pub optimized: OptimizedListing,
    pub optimized_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

/// POST /api/v1/listings/optimize
///
/// All-blank input is rejected before any provider call. A provider or
/// credential failure fails the whole request; no partial mapping is
/// returned.
pub async fn handle_optimize(
    State(state): State<AppState>,
    Json(listing): Json<Listing>,
) -> Result<Json<OptimizeResponse>, AppError> {
    let all_blank = ListingField::ALL
        .iter()
        .all(|field| listing.field(*field).trim().is_empty());
    if all_blank {
        return Err(AppError::Validation(
            "Enter content in at least one field before optimizing.".to_string(),
        ));
    }

    let optimized = generate_optimized_listing(state.llm.as_ref(), &listing).await?;

    let optimized_count = optimized.len();
    // Unreachable given the all-blank check above; surfaced as a notice
    // rather than an error if it ever happens.
    let notice = optimized
        .is_empty()
        .then(|| "No fields were optimized. Enter content in at least one field.".to_string());

    Ok(Json(OptimizeResponse {
        optimized,
        optimized_count,
        notice,
    }))
}

/// GET /api/v1/connection
/// Returns the descriptor from the startup connectivity probe. Only the
/// masked credential suffix is exposed.
pub async fn handle_connection(State(state): State<AppState>) -> Json<ConnectionDescriptor> {
    Json(state.connection.clone())
}
