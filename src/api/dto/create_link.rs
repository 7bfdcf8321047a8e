//! DTOs for the link creation endpoint.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Request to shorten a URL.
///
/// The URL is free-form user input (`example.com` is fine); it is normalized
/// by the link service, so only its presence and size are checked here.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    #[validate(
        length(max = 2048, message = "URL is too long"),
        custom(function = "not_blank")
    )]
    pub url: String,
}

/// A freshly created short link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkResponse {
    pub short_url: String,
    pub original_url: String,
    /// PNG QR code of `short_url`, standard base64.
    pub qr_code_base64: String,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("URL must not be empty".into());
        return Err(error);
    }
    Ok(())
}
