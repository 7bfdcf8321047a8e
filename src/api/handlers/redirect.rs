//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};
use serde_json::json;
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::code_generator::is_valid_code;

/// Redirects a short code to its original URL and counts the hit.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Reject codes that cannot exist (wrong length or alphabet) without a store round-trip
/// 2. Atomically increment the hit counter and read the record
/// 3. Return 307 Temporary Redirect to the original URL
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    if !is_valid_code(&code) {
        debug!("Malformed short code: {}", code);
        return Err(AppError::not_found(
            "Short link not found",
            json!({ "code": code }),
        ));
    }

    let link = state.link_service.resolve_and_increment(&code).await?;
    debug!(
        "Redirect {} -> {} (hits: {})",
        link.short_code, link.original_url, link.hit_count
    );

    Ok(Redirect::temporary(&link.original_url))
}
