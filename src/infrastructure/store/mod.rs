//! Link store implementations.
//!
//! Provides two implementations of [`crate::domain::repositories::LinkStore`]:
//! - [`RedisLinkStore`] - Production Redis-backed store
//! - [`MemoryLinkStore`] - Process-local store for development and tests

mod memory_store;
mod redis_store;

pub use memory_store::MemoryLinkStore;
pub use redis_store::{KEY_PREFIX, RedisLinkStore};
