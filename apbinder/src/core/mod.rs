//! Core logic of the access point control surface.
//!
//! This module contains the capability traits the binder consumes and the
//! binder itself, independent of any transport.

pub mod ap_interface;
pub mod binder;
