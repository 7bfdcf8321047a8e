//! Core domain entities.
//!
//! - [`Link`] - A shortened URL mapping with its hit counter

pub mod link;

pub use link::Link;
