//! Repository trait definitions for the domain layer.
//!
//! - [`LinkStore`] - Link records in the key-value store
//!
//! Implementations live in `crate::infrastructure::store`; a mock is
//! generated via `mockall` for unit tests.

pub mod link_store;

pub use link_store::LinkStore;

#[cfg(test)]
pub use link_store::MockLinkStore;
