//! QR code rendering for short URLs.

use base64::Engine as _;
use image::{ImageFormat, Luma};
use qrcode::QrCode;
use std::io::Cursor;

/// Default edge length of rendered QR codes, in pixels.
pub const DEFAULT_QR_SIZE: u32 = 256;

/// Errors that can occur while rendering a QR code.
#[derive(Debug, thiserror::Error)]
pub enum QrCodeError {
    #[error("QR encoding failed: {0}")]
    Encode(String),

    #[error("PNG encoding failed: {0}")]
    Image(#[from] image::ImageError),
}

/// Renders text as a PNG QR code.
#[derive(Debug, Clone)]
pub struct QrCodeGenerator {
    size: u32,
}

impl QrCodeGenerator {
    /// Creates a generator producing images of at least `size`×`size` pixels.
    pub fn new(size: u32) -> Self {
        Self { size }
    }

    /// Renders `text` and returns the PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns [`QrCodeError`] if the text does not fit in a QR code or the
    /// image cannot be encoded.
    pub fn generate_png(&self, text: &str) -> Result<Vec<u8>, QrCodeError> {
        let code = QrCode::new(text.as_bytes()).map_err(|e| QrCodeError::Encode(e.to_string()))?;

        let image = code
            .render::<Luma<u8>>()
            .min_dimensions(self.size, self.size)
            .build();

        let mut png = Vec::new();
        image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

        Ok(png)
    }

    /// Renders `text` as a base64 PNG, ready for a `data:image/png;base64,` URI.
    ///
    /// # Errors
    ///
    /// See [`Self::generate_png`].
    pub fn generate_base64(&self, text: &str) -> Result<String, QrCodeError> {
        let png = self.generate_png(text)?;
        Ok(base64::engine::general_purpose::STANDARD.encode(png))
    }
}

impl Default for QrCodeGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_QR_SIZE)
    }
}
