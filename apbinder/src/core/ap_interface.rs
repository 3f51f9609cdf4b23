//! Capability interfaces the binder is built on.
//!
//! [`ApInterface`] is implemented by whatever owns the access point daemon.
//! [`StationListener`] is implemented by whoever wants station count
//! notifications; over D-Bus that is a proxy to the caller's callback object.

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::api::models::ApConfig;
use crate::Result;

/// Stream of associated station counts published by a backing interface.
pub type StationEventStream = BoxStream<'static, i32>;

/// The backing access point interface.
///
/// Owns the daemon lifecycle and its configuration. Every method reports
/// business failure through its return value; the binder forwards those
/// values verbatim.
#[async_trait]
pub trait ApInterface: Send + Sync {
    /// Starts the access point daemon.
    async fn start_daemon(&self) -> bool;

    /// Stops the access point daemon.
    async fn stop_daemon(&self) -> bool;

    /// Applies a configuration for the next daemon start.
    async fn write_config(&self, config: &ApConfig) -> bool;

    /// Name of the network interface, e.g. `wlan0`.
    async fn interface_name(&self) -> String;

    /// Number of stations currently associated with the access point.
    async fn associated_station_count(&self) -> i32;

    /// Subscribes to station count changes.
    ///
    /// Returns `None` if this interface does not publish events.
    fn station_events(&self) -> Option<StationEventStream>;
}

/// Receiver of station count notifications.
#[async_trait]
pub trait StationListener: Send + Sync {
    /// Called with the new count each time it changes.
    async fn on_associated_station_count_changed(&self, count: i32) -> Result<()>;
}
