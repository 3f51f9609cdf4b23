//! Station event callback proxy.

use zbus::{proxy, Result};

/// Proxy for a listener object exported by a caller of `StartDaemon`.
#[proxy(interface = "org.wificond.ApInterfaceEventCallback1")]
pub trait ApEventCallback {
    /// Delivers a new associated station count. Fire and forget.
    #[zbus(no_reply)]
    fn on_associated_station_count_changed(&self, count: i32) -> Result<()>;
}
