//! Application layer services implementing business logic.
//!
//! Services coordinate store calls, validation and business rules, and offer
//! HTTP handlers a small API.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short link creation and resolution

pub mod services;
