//! HTTP middleware for request processing and protection.
//!
//! Provides the creation rate limiter and request tracing.

pub mod rate_limit;
pub mod tracing;
