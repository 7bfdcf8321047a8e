//! Handler for link creation endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{Extensions, HeaderMap, StatusCode},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::create_link::{CreateLinkRequest, CreateLinkResponse};
use crate::api::middleware::rate_limit;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for a URL.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// { "url": "example.com/some/page" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "shortUrl": "http://localhost:8080/aZ09bY18",
///   "originalUrl": "https://example.com/some/page",
///   "qrCodeBase64": "iVBORw0KGgoAAAANSUhEUgAA..."
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request` if the body is malformed or the URL is rejected
/// - `429 Too Many Requests` if this client already created a link within the
///   rate-limit window; requests rejected with 400 before normalization do not
///   count towards it
/// - `500 Internal Server Error` on store or QR rendering failures
pub async fn create_link_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    extensions: Extensions,
    payload: Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateLinkResponse>), AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        AppError::bad_request(
            "Invalid request body",
            json!({ "reason": rejection.body_text() }),
        )
    })?;
    payload.validate()?;
    rate_limit::enforce(&state, &headers, &extensions)?;

    let link = state.link_service.create(&payload.url).await?;
    let short_url = state.link_service.build_short_url(&link.short_code);

    let qr_code_base64 = state.qr_generator.generate_base64(&short_url).map_err(|e| {
        AppError::internal(
            "QR code generation failed",
            json!({ "code": link.short_code, "reason": e.to_string() }),
        )
    })?;

    Ok((
        StatusCode::CREATED,
        Json(CreateLinkResponse {
            short_url,
            original_url: link.original_url,
            qr_code_base64,
        }),
    ))
}
