use std::sync::Arc;

use crate::api::middleware::rate_limit::CreationRateLimiter;
use crate::application::services::LinkService;
use crate::infrastructure::qr::QrCodeGenerator;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub qr_generator: Arc<QrCodeGenerator>,
    pub rate_limiter: Arc<CreationRateLimiter>,
    pub behind_proxy: bool,
}

impl AppState {
    pub fn new(
        link_service: Arc<LinkService>,
        qr_generator: Arc<QrCodeGenerator>,
        rate_limiter: Arc<CreationRateLimiter>,
        behind_proxy: bool,
    ) -> Self {
        Self {
            link_service,
            qr_generator,
            rate_limiter,
            behind_proxy,
        }
    }
}
