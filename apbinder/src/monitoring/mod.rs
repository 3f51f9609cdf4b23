//! Real-time monitoring of station changes.
//!
//! This module provides the task that carries station count events from the
//! backing interface to the registered listener.

pub mod stations;
