//! Utility functions for code generation, URL processing, and request handling.
//!
//! - [`code_generator`] - Short code generation and validation
//! - [`url_normalizer`] - URL normalization and sanitization
//! - [`client_ip`] - Client address resolution for rate limiting

pub mod client_ip;
pub mod code_generator;
pub mod url_normalizer;
