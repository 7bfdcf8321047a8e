//! # Shortlink
//!
//! A small URL shortening service built with Axum and Redis.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - The link record and the store trait
//! - **Application Layer** ([`application`]) - Link creation, resolution and short URL formatting
//! - **Infrastructure Layer** ([`infrastructure`]) - Redis and in-memory stores, QR rendering
//! - **API Layer** ([`api`]) - REST API handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Lenient URL input (`example.com` becomes `https://example.com`), IDN hosts in punycode
//! - 8-character base62 codes with collision checks
//! - Atomic hit counting on redirect
//! - QR code (PNG, base64) for every short URL
//! - Per-client creation rate limiting with bounded memory
//!
//! ## Quick Start
//!
//! ```bash
//! export BASE_URL="https://s.example.com"
//! export REDIS_URL="redis://localhost:6379"  # Optional, in-memory otherwise
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::LinkService;
    pub use crate::domain::entities::Link;
    pub use crate::domain::repositories::LinkStore;
    pub use crate::error::AppError;
    pub use crate::infrastructure::store::{MemoryLinkStore, RedisLinkStore};
    pub use crate::state::AppState;
}
