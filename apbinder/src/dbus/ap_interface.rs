//! Access point control proxy.

use zbus::{proxy, Result};
use zvariant::ObjectPath;

/// Proxy for the access point control interface.
///
/// Every method reports business failure through its return value; a
/// `zbus::Error` only means the call itself did not go through.
#[proxy(
    interface = "org.wificond.ApInterface1",
    default_service = "org.wificond",
    default_path = "/org/wificond/ApInterface"
)]
pub trait WificondAp {
    /// Starts the daemon; `listener` is the caller's callback object.
    fn start_daemon(&self, listener: &ObjectPath<'_>) -> Result<bool>;

    /// Stops the daemon and forgets the listener.
    fn stop_daemon(&self) -> Result<bool>;

    /// Writes the access point configuration using raw band and encryption codes.
    fn write_configuration(
        &self,
        ssid: &[u8],
        hidden: bool,
        band: i32,
        encryption: i32,
        passphrase: &[u8],
    ) -> Result<bool>;

    /// Name of the network interface, empty if it is gone.
    fn get_interface_name(&self) -> Result<String>;

    /// Number of associated stations, -1 if the interface is gone.
    fn get_associated_station_count(&self) -> Result<i32>;
}
