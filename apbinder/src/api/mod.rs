//! Public API module.
//!
//! This module contains the high-level user-facing API for the `apbinder` crate.

pub mod client;
pub mod models;
pub mod service;
