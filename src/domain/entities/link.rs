//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A shortened URL with its hit counter.
///
/// Stored as JSON under `shortlink:<code>`:
///
/// ```json
/// {
///   "shortCode": "aZ09bY18",
///   "originalUrl": "https://example.com",
///   "createdAt": "2026-10-17T09:30:00Z",
///   "hitCount": 0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub short_code: String,
    /// Always a normalized absolute URL.
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub hit_count: u64,
}

impl Link {
    /// Creates a link that has not been visited yet.
    pub fn new(short_code: String, original_url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            short_code,
            original_url,
            created_at,
            hit_count: 0,
        }
    }
}
