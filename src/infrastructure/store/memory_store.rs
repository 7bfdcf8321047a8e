//! Process-local link store.

use crate::domain::entities::Link;
use crate::domain::repositories::LinkStore;
use crate::error::AppError;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// A link store kept in process memory.
///
/// Used when Redis is not configured and by the integration tests. Records
/// are lost on restart and are not shared between instances.
#[derive(Default)]
pub struct MemoryLinkStore {
    links: RwLock<HashMap<String, Link>>,
}

impl MemoryLinkStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        debug!("Using MemoryLinkStore (links are not persisted)");
        Self::default()
    }

    /// Number of stored links.
    pub async fn len(&self) -> usize {
        self.links.read().await.len()
    }

    /// Returns true if no links are stored.
    pub async fn is_empty(&self) -> bool {
        self.links.read().await.is_empty()
    }
}

#[async_trait]
impl LinkStore for MemoryLinkStore {
    async fn get(&self, code: &str) -> Result<Option<Link>, AppError> {
        Ok(self.links.read().await.get(code).cloned())
    }

    async fn exists(&self, code: &str) -> Result<bool, AppError> {
        Ok(self.links.read().await.contains_key(code))
    }

    async fn insert(&self, link: &Link) -> Result<bool, AppError> {
        let mut links = self.links.write().await;

        if links.contains_key(&link.short_code) {
            return Ok(false);
        }

        links.insert(link.short_code.clone(), link.clone());
        Ok(true)
    }

    async fn increment_hits(&self, code: &str) -> Result<Option<Link>, AppError> {
        let mut links = self.links.write().await;

        Ok(links.get_mut(code).map(|link| {
            link.hit_count = link.hit_count.saturating_add(1);
            link.clone()
        }))
    }

    async fn ping(&self) -> bool {
        true
    }
}
