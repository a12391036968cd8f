//! Grayscale Mode
//!
//! Site-wide grayscale filter with a visitor opt-out toggle.
//! This library exposes modules for integration testing.

pub mod api;
pub mod assets;
pub mod error;
pub mod models;
pub mod server;
pub mod services;
