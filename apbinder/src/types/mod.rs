//! Type definitions and constants.
//!
//! This module contains the wire codes and bus names shared with callers.

pub mod constants;
