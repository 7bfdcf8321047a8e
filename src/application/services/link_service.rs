//! Link creation, resolution and short URL formatting.

use std::sync::Arc;

use crate::domain::entities::Link;
use crate::domain::repositories::LinkStore;
use crate::error::AppError;
use crate::utils::code_generator::generate_code;
use crate::utils::url_normalizer::{is_loopback_host, normalize_url};
use chrono::Utc;
use serde_json::json;
use tracing::{debug, info, warn};
use url::Url;

/// Default number of candidate codes tried per link.
pub const DEFAULT_MAX_CODE_ATTEMPTS: usize = 10;

/// Service for creating and resolving shortened links.
///
/// Handles URL normalization, collision-checked code generation and hit
/// counting on top of a [`LinkStore`].
pub struct LinkService {
    store: Arc<dyn LinkStore>,
    base_url: String,
    max_code_attempts: usize,
}

impl LinkService {
    /// Creates a new link service.
    ///
    /// `base_url` is the public prefix of short URLs, e.g. `https://s.example.com`.
    pub fn new(store: Arc<dyn LinkStore>, base_url: impl Into<String>) -> Self {
        Self {
            store,
            base_url: base_url.into(),
            max_code_attempts: DEFAULT_MAX_CODE_ATTEMPTS,
        }
    }

    /// Overrides how many candidate codes are tried before giving up.
    pub fn with_max_code_attempts(mut self, attempts: usize) -> Self {
        self.max_code_attempts = attempts.max(1);
        self
    }

    /// Shortens a URL.
    ///
    /// Normalizes the input, picks an unused code and stores a record with a
    /// zero hit counter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is rejected by the normalizer.
    ///
    /// Returns [`AppError::Internal`] on store errors or when no free code was
    /// found within the attempt budget.
    pub async fn create(&self, raw_url: &str) -> Result<Link, AppError> {
        let normalized_url = normalize_url(raw_url).map_err(|e| {
            AppError::bad_request(
                "Invalid URL. Enter, for example, example.com or https://example.com",
                json!({ "reason": e.to_string() }),
            )
        })?;

        for attempt in 1..=self.max_code_attempts {
            let code = generate_code();

            if self.store.exists(&code).await? {
                debug!("Code collision on attempt {}: {}", attempt, code);
                continue;
            }

            let link = Link::new(code, normalized_url.clone(), Utc::now());

            if self.store.insert(&link).await? {
                info!("Created short link {} -> {}", link.short_code, link.original_url);
                metrics::counter!("shortlinks_created_total").increment(1);
                return Ok(link);
            }

            debug!("Code taken concurrently on attempt {}: {}", attempt, link.short_code);
        }

        warn!(
            "No free short code after {} attempts",
            self.max_code_attempts
        );

        Err(AppError::internal(
            "Failed to generate unique code",
            json!({ "reason": "Too many collisions", "attempts": self.max_code_attempts }),
        ))
    }

    /// Resolves a code and counts the visit.
    ///
    /// The increment is a single atomic store operation, so concurrent
    /// resolves of the same code are all counted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code; the store is
    /// left unchanged.
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn resolve_and_increment(&self, code: &str) -> Result<Link, AppError> {
        match self.store.increment_hits(code).await? {
            Some(link) => {
                metrics::counter!("shortlinks_resolved_total").increment(1);
                Ok(link)
            }
            None => {
                metrics::counter!("shortlinks_not_found_total").increment(1);
                Err(not_found(code))
            }
        }
    }

    /// Reads a link without counting a visit.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn find(&self, code: &str) -> Result<Link, AppError> {
        self.store
            .get(code)
            .await?
            .ok_or_else(|| not_found(code))
    }

    /// Constructs the full short URL for a code.
    ///
    /// Shown as `https` unless the base URL points at a loopback host, where
    /// the configured `http` scheme is kept for local development.
    pub fn build_short_url(&self, code: &str) -> String {
        let short_url = format!("{}/{}", self.base_url.trim_end_matches('/'), code);

        match Url::parse(&short_url) {
            Ok(mut url)
                if url.scheme() == "http"
                    && !url.host().is_some_and(|host| is_loopback_host(&host)) =>
            {
                if url.set_scheme("https").is_ok() {
                    url.into()
                } else {
                    short_url
                }
            }
            _ => short_url,
        }
    }

    /// Checks if the underlying store is reachable.
    pub async fn store_healthy(&self) -> bool {
        self.store.ping().await
    }
}

fn not_found(code: &str) -> AppError {
    AppError::not_found("Short link not found", json!({ "code": code }))
}
