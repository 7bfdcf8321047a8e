//! Store trait for link records.

use crate::domain::entities::Link;
use crate::error::AppError;
use async_trait::async_trait;

/// Access to link records in the external key-value store.
///
/// Records are addressed by short code only. Implementations decide how the
/// code maps to a key (the Redis store uses `shortlink:<code>`).
///
/// # Implementations
///
/// - [`crate::infrastructure::store::RedisLinkStore`] - Redis implementation
/// - [`crate::infrastructure::store::MemoryLinkStore`] - process-local map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Reads a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store or decoding errors.
    async fn get(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Returns whether a record exists for the code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn exists(&self, code: &str) -> Result<bool, AppError>;

    /// Stores a new link unless its code is already taken.
    ///
    /// Returns `Ok(false)` without touching the existing record when the code
    /// is in use.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store or encoding errors.
    async fn insert(&self, link: &Link) -> Result<bool, AppError>;

    /// Atomically increments the hit counter of a link.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` with the updated counter if found
    /// - `Ok(None)` if no record exists; nothing is written in that case
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store or decoding errors.
    async fn increment_hits(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Checks if the store backend is reachable.
    async fn ping(&self) -> bool;
}
