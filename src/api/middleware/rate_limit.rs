//! Per-client rate limiting for link creation.
//!
//! Each client may create one link per window. The last accepted request of
//! every client is kept in a bounded `moka` cache whose entries expire with
//! the window, so memory use stays flat no matter how many clients appear.

use axum::extract::ConnectInfo;
use axum::http::{Extensions, HeaderMap};
use moka::sync::Cache;
use std::net::{IpAddr, SocketAddr};
use std::time::{Duration, Instant};
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::client_ip;

/// Default minimum interval between two creations by the same client.
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(5);

/// Default number of clients tracked at once.
pub const DEFAULT_MAX_CLIENTS: u64 = 100_000;

/// Fixed-window limiter keyed by client IP.
pub struct CreationRateLimiter {
    last_accepted: Cache<IpAddr, Instant>,
    window: Duration,
}

impl CreationRateLimiter {
    /// Creates a limiter allowing one request per `window` per client,
    /// tracking at most `max_clients` clients.
    pub fn new(window: Duration, max_clients: u64) -> Self {
        let last_accepted = Cache::builder()
            .max_capacity(max_clients)
            .time_to_live(window)
            .build();

        Self {
            last_accepted,
            window,
        }
    }

    /// Records a request from `client`.
    ///
    /// # Errors
    ///
    /// Returns the time left until the client may try again.
    pub fn check(&self, client: IpAddr) -> Result<(), Duration> {
        self.check_at(client, Instant::now())
    }

    fn check_at(&self, client: IpAddr, now: Instant) -> Result<(), Duration> {
        let entry = self.last_accepted.entry(client).or_insert_with(|| now);
        if entry.is_fresh() {
            return Ok(());
        }

        let elapsed = now.saturating_duration_since(*entry.value());
        if elapsed >= self.window {
            self.last_accepted.insert(client, now);
            return Ok(());
        }

        Err(self.window - elapsed)
    }
}

impl Default for CreationRateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW, DEFAULT_MAX_CLIENTS)
    }
}

/// Charges one link creation to the client behind a request.
///
/// Called by the creation handler once the request body has passed
/// validation, so malformed or blank submissions do not start a window.
///
/// # Errors
///
/// Returns `429 Too Many Requests` with a `Retry-After` header (whole
/// seconds, at least 1).
///
/// # Example
///
/// ```rust,ignore
/// payload.validate()?;
/// rate_limit::enforce(&state, &headers, &extensions)?;
/// ```
pub fn enforce(
    state: &AppState,
    headers: &HeaderMap,
    extensions: &Extensions,
) -> Result<(), AppError> {
    let peer = extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let client = client_ip(headers, peer, state.behind_proxy);

    if let Err(remaining) = state.rate_limiter.check(client) {
        let retry_after_secs = retry_after_secs(remaining);
        debug!("Rate limited {} for {}s", client, retry_after_secs);
        metrics::counter!("rate_limited_total").increment(1);
        return Err(AppError::rate_limited(retry_after_secs));
    }

    Ok(())
}

fn retry_after_secs(remaining: Duration) -> u64 {
    remaining.as_secs_f64().ceil().max(1.0) as u64
}
