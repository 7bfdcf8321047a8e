//! API route configuration.

use crate::api::handlers::create_link_handler;
use crate::state::AppState;
use axum::{Router, routing::post};

/// Link management routes, mounted under `/api`.
///
/// # Endpoints
///
/// - `POST /links` - Create a short link
///
/// Link creation is rate limited per client inside the handler, after the
/// request body has been validated.
pub fn link_routes() -> Router<AppState> {
    Router::new().route("/links", post(create_link_handler))
}
