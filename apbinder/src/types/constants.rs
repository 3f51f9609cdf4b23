//! Constants for the access point control wire contract.
//!
//! These constants correspond to the numeric codes exchanged with callers
//! over D-Bus for band and encryption selection, and to the bus names
//! under which the service and its callbacks are exported.

/// Band selection codes.
pub mod band {
    pub const BAND_2G: i32 = 0;
    pub const BAND_5G: i32 = 1;
    pub const BAND_ANY: i32 = 2;
}

/// Encryption selection codes.
pub mod encryption {
    pub const ENCRYPTION_TYPE_NONE: i32 = 0;
    pub const ENCRYPTION_TYPE_WPA: i32 = 1;
    pub const ENCRYPTION_TYPE_WPA2: i32 = 2;
}

/// Station count values.
pub mod station {
    /// Reported in place of a count when the interface is gone.
    pub const UNKNOWN_COUNT: i32 = -1;
}

/// Default D-Bus names.
///
/// The `#[proxy]` and `#[interface]` attributes repeat the interface names
/// as literals. Tests in the `dbus` module check them against these.
pub mod bus {
    /// Well-known name requested by the service.
    pub const SERVICE_NAME: &str = "org.wificond";
    /// Path of the access point interface object.
    pub const AP_INTERFACE_PATH: &str = "/org/wificond/ApInterface";
    /// Access point control interface.
    pub const AP_INTERFACE: &str = "org.wificond.ApInterface1";
    /// Interface implemented by listener objects exported by callers.
    pub const EVENT_CALLBACK: &str = "org.wificond.ApInterfaceEventCallback1";
    /// Parent path for listener objects exported by [`crate::ApClient`].
    pub const EVENT_CALLBACK_PATH_PREFIX: &str = "/org/wificond/ApInterfaceEventCallback";
}
