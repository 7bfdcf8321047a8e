//! Infrastructure layer for external integrations.
//!
//! Implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`store`] - Link store implementations (Redis and in-memory)
//! - [`qr`] - QR code rendering

pub mod qr;
pub mod store;
