//! A D-Bus control surface for a software access point interface.
//!
//! This crate exposes the control operations of an access point interface
//! (start and stop the access point daemon, write its SSID, band and
//! encryption, query the interface name and the number of associated
//! stations) to other processes:
//!
//! - [`ApInterfaceBinder`] validates requests and forwards them to an
//!   [`ApInterface`], the object that owns the daemon
//! - [`serve`] exports a binder on the system or session bus
//! - [`ApClient`] calls a running service and streams station counts back
//! - [`monitor_station_events`] carries station changes to the registered listener
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use apbinder::{serve, ApInterfaceBinder, MemoryApInterface, ServiceOptions};
//!
//! # async fn example() -> apbinder::Result<()> {
//! let ap = Arc::new(MemoryApInterface::new("wlan0"));
//! let binder = Arc::new(ApInterfaceBinder::new(&ap));
//!
//! let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(());
//! let _conn = serve(binder.clone(), &ServiceOptions::default()).await?;
//! apbinder::monitor_station_events(&binder, shutdown_rx).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! Service methods never fail at the D-Bus level. A torn-down interface, an
//! unknown band or encryption code, or a daemon that refuses to start all
//! come back as `false`, an empty interface name or a station count of `-1`.
//! Library plumbing (bus connections, the client, the monitor) returns
//! `Result<T, ApError>`.
//!
//! # Logging
//!
//! This crate uses the [`log`](https://docs.rs/log) facade for logging. To see
//! log output, add a logging implementation like `env_logger`. For example:

//! ```no_run,ignore
//! env_logger::init();
//! // ...
//! ```

// Internal implementation modules
mod dbus;
mod util;

// Public API modules
pub mod api;
pub mod core;
pub mod memory;
pub mod monitoring;
pub mod types;

// Re-exported public API
pub use api::client::{ApClient, StationEvents};
pub use api::models::{ApConfig, ApError, Band, BusKind, EncryptionType, ServiceOptions};
pub use api::service::serve;
pub use crate::core::ap_interface::{ApInterface, StationEventStream, StationListener};
pub use crate::core::binder::ApInterfaceBinder;
pub use dbus::{ApInterfaceService, WificondApProxy};
pub use memory::MemoryApInterface;
pub use monitoring::stations::monitor_station_events;

/// A specialized `Result` type for access point operations.
pub type Result<T> = std::result::Result<T, ApError>;
