use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Display, Formatter};
use thiserror::Error;
use zbus::connection;
use zbus::Connection;

use crate::types::constants::{band, bus, encryption};
use crate::util::utils::{redacted, ssid_for_display};

/// Radio band the access point operates on.
///
/// Transmitted on the wire as an `i32`. Use `Band::try_from(code)` to
/// validate a code received from a caller; unknown codes are rejected with
/// [`ApError::UnknownBand`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Band {
    /// 2.4 GHz band.
    Band2G,
    /// 5 GHz band.
    Band5G,
    /// Let the daemon pick a band.
    Any,
}

impl TryFrom<i32> for Band {
    type Error = ApError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            band::BAND_2G => Ok(Self::Band2G),
            band::BAND_5G => Ok(Self::Band5G),
            band::BAND_ANY => Ok(Self::Any),
            v => Err(ApError::UnknownBand(v)),
        }
    }
}

impl From<Band> for i32 {
    fn from(value: Band) -> Self {
        match value {
            Band::Band2G => band::BAND_2G,
            Band::Band5G => band::BAND_5G,
            Band::Any => band::BAND_ANY,
        }
    }
}

impl Display for Band {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Band2G => write!(f, "2.4 GHz"),
            Self::Band5G => write!(f, "5 GHz"),
            Self::Any => write!(f, "any"),
        }
    }
}

/// Encryption applied to the access point.
///
/// Transmitted on the wire as an `i32`. Unknown codes are rejected with
/// [`ApError::UnknownEncryption`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EncryptionType {
    /// No encryption, open network.
    Open,
    /// WPA personal.
    Wpa,
    /// WPA2 personal.
    Wpa2,
}

impl TryFrom<i32> for EncryptionType {
    type Error = ApError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            encryption::ENCRYPTION_TYPE_NONE => Ok(Self::Open),
            encryption::ENCRYPTION_TYPE_WPA => Ok(Self::Wpa),
            encryption::ENCRYPTION_TYPE_WPA2 => Ok(Self::Wpa2),
            v => Err(ApError::UnknownEncryption(v)),
        }
    }
}

impl From<EncryptionType> for i32 {
    fn from(value: EncryptionType) -> Self {
        match value {
            EncryptionType::Open => encryption::ENCRYPTION_TYPE_NONE,
            EncryptionType::Wpa => encryption::ENCRYPTION_TYPE_WPA,
            EncryptionType::Wpa2 => encryption::ENCRYPTION_TYPE_WPA2,
        }
    }
}

impl Display for EncryptionType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Wpa => write!(f, "WPA"),
            Self::Wpa2 => write!(f, "WPA2"),
        }
    }
}

/// Access point configuration handed to the backing interface.
///
/// SSID and passphrase are opaque byte strings; nothing here checks their
/// length or encoding. The `Debug` output never includes the passphrase.
///
/// # Examples
///
/// ```rust
/// use apbinder::{ApConfig, Band, EncryptionType};
///
/// let config = ApConfig::new("HomeAP", Band::Band5G, EncryptionType::Wpa2)
///     .with_passphrase("correct horse")
///     .with_hidden(true);
///
/// assert!(config.hidden);
/// assert!(!format!("{config:?}").contains("correct horse"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApConfig {
    /// Network name broadcast by the access point.
    pub ssid: Vec<u8>,
    /// Whether the SSID is hidden from beacons.
    pub hidden: bool,
    /// Radio band.
    pub band: Band,
    /// Encryption type.
    pub encryption: EncryptionType,
    /// Pre-shared passphrase, empty for open networks.
    pub passphrase: Vec<u8>,
}

impl ApConfig {
    /// Creates a visible configuration without a passphrase.
    pub fn new(ssid: impl Into<Vec<u8>>, band: Band, encryption: EncryptionType) -> Self {
        Self {
            ssid: ssid.into(),
            hidden: false,
            band,
            encryption,
            passphrase: Vec::new(),
        }
    }

    /// Sets whether the SSID is hidden.
    #[must_use]
    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Sets the passphrase.
    #[must_use]
    pub fn with_passphrase(mut self, passphrase: impl Into<Vec<u8>>) -> Self {
        self.passphrase = passphrase.into();
        self
    }
}

impl Debug for ApConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApConfig")
            .field("ssid", &ssid_for_display(&self.ssid))
            .field("hidden", &self.hidden)
            .field("band", &self.band)
            .field("encryption", &self.encryption)
            .field("passphrase", &redacted(&self.passphrase))
            .finish()
    }
}

/// Message bus hosting the service.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BusKind {
    /// The system bus, where the service normally lives.
    #[default]
    System,
    /// The per-user session bus, useful for development.
    Session,
    /// A bus daemon at an explicit D-Bus address, e.g. `unix:path=/run/ap/bus`.
    Address(String),
}

impl BusKind {
    /// Opens a plain connection to this bus.
    pub(crate) async fn connect(&self) -> zbus::Result<Connection> {
        match self {
            Self::System => Connection::system().await,
            Self::Session => Connection::session().await,
            Self::Address(_) => self.builder()?.build().await,
        }
    }

    /// Returns a connection builder for this bus.
    pub(crate) fn builder<'a>(&self) -> zbus::Result<connection::Builder<'a>> {
        match self {
            Self::System => connection::Builder::system(),
            Self::Session => connection::Builder::session(),
            Self::Address(address) => connection::Builder::address(address.as_str()),
        }
    }
}

/// Where the service is exported and where clients look for it.
///
/// # Examples
///
/// ```rust
/// use apbinder::{BusKind, ServiceOptions};
///
/// // System bus with the default names
/// let opts = ServiceOptions::default();
///
/// // Session bus, custom object path
/// let dev = ServiceOptions::default()
///     .with_bus(BusKind::Session)
///     .with_object_path("/org/wificond/ApInterface/wlan1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceOptions {
    /// Bus to connect to
    pub bus: BusKind,
    /// Well-known name owned by the service
    pub bus_name: String,
    /// Object path of the access point interface
    pub object_path: String,
}

impl Default for ServiceOptions {
    /// Returns the default service options.
    ///
    /// Defaults:
    /// - `bus`: [`BusKind::System`]
    /// - `bus_name`: `org.wificond`
    /// - `object_path`: `/org/wificond/ApInterface`
    fn default() -> Self {
        Self {
            bus: BusKind::default(),
            bus_name: bus::SERVICE_NAME.to_string(),
            object_path: bus::AP_INTERFACE_PATH.to_string(),
        }
    }
}

impl ServiceOptions {
    /// Selects the bus.
    #[must_use]
    pub fn with_bus(mut self, bus: BusKind) -> Self {
        self.bus = bus;
        self
    }

    /// Overrides the well-known bus name.
    #[must_use]
    pub fn with_bus_name(mut self, name: impl Into<String>) -> Self {
        self.bus_name = name.into();
        self
    }

    /// Overrides the object path.
    #[must_use]
    pub fn with_object_path(mut self, path: impl Into<String>) -> Self {
        self.object_path = path.into();
        self
    }
}

/// Errors raised by the library plumbing.
///
/// None of these ever cross the RPC boundary: the D-Bus methods collapse
/// every failure into a `false`, an empty name or a `-1` count. `ApError`
/// is what the client, the service bootstrap and the station monitor report
/// to their Rust callers.
#[derive(Debug, Error)]
pub enum ApError {
    /// A D-Bus communication error occurred.
    #[error("D-Bus error: {0}")]
    Dbus(#[from] zbus::Error),

    /// A bus name or object path could not be built.
    #[error("invalid D-Bus value: {0}")]
    Variant(#[from] zvariant::Error),

    /// A band code outside the known set.
    #[error("unknown band type: {0}")]
    UnknownBand(i32),

    /// An encryption code outside the known set.
    #[error("unknown encryption type: {0}")]
    UnknownEncryption(i32),

    /// The backing access point interface has been torn down.
    #[error("access point interface is gone")]
    InterfaceGone,

    /// The backing interface does not publish station events.
    #[error("access point interface provides no station events")]
    NoStationEvents,

    /// The station event stream ended while being monitored.
    #[error("station event stream ended")]
    MonitorEnded,

    /// A call carried no sender, so there is nobody to call back.
    #[error("message has no sender")]
    MissingSender,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_from_code_all_variants() {
        assert_eq!(Band::try_from(0).unwrap(), Band::Band2G);
        assert_eq!(Band::try_from(1).unwrap(), Band::Band5G);
        assert_eq!(Band::try_from(2).unwrap(), Band::Any);
    }

    #[test]
    fn band_from_unknown_code() {
        assert!(matches!(Band::try_from(3), Err(ApError::UnknownBand(3))));
        assert!(matches!(Band::try_from(-1), Err(ApError::UnknownBand(-1))));
    }

    #[test]
    fn band_code_round_trip() {
        for band in [Band::Band2G, Band::Band5G, Band::Any] {
            assert_eq!(Band::try_from(i32::from(band)).unwrap(), band);
        }
    }

    #[test]
    fn encryption_from_code_all_variants() {
        assert_eq!(EncryptionType::try_from(0).unwrap(), EncryptionType::Open);
        assert_eq!(EncryptionType::try_from(1).unwrap(), EncryptionType::Wpa);
        assert_eq!(EncryptionType::try_from(2).unwrap(), EncryptionType::Wpa2);
    }

    #[test]
    fn encryption_from_unknown_code() {
        assert!(matches!(
            EncryptionType::try_from(99),
            Err(ApError::UnknownEncryption(99))
        ));
    }

    #[test]
    fn translation_is_deterministic() {
        for _ in 0..3 {
            assert_eq!(Band::try_from(1).unwrap(), Band::Band5G);
            assert_eq!(EncryptionType::try_from(2).unwrap(), EncryptionType::Wpa2);
        }
    }

    #[test]
    fn display_impls() {
        assert_eq!(format!("{}", Band::Band2G), "2.4 GHz");
        assert_eq!(format!("{}", Band::Any), "any");
        assert_eq!(format!("{}", EncryptionType::Wpa2), "WPA2");
        assert_eq!(
            format!("{}", ApError::UnknownEncryption(7)),
            "unknown encryption type: 7"
        );
    }

    #[test]
    fn ap_config_debug_hides_passphrase() {
        let config = ApConfig::new("Cafe", Band::Band2G, EncryptionType::Wpa2)
            .with_passphrase("supersecret");
        let shown = format!("{config:?}");
        assert!(shown.contains("Cafe"));
        assert!(!shown.contains("supersecret"));
        assert!(shown.contains("<redacted>"));
    }

    #[test]
    fn service_options_defaults() {
        let opts = ServiceOptions::default();
        assert_eq!(opts.bus, BusKind::System);
        assert_eq!(opts.bus_name, "org.wificond");
        assert_eq!(opts.object_path, "/org/wificond/ApInterface");
    }

    #[test]
    fn service_options_builders() {
        let opts = ServiceOptions::default()
            .with_bus(BusKind::Session)
            .with_bus_name("org.example.Ap")
            .with_object_path("/org/example/Ap");
        assert_eq!(opts.bus, BusKind::Session);
        assert_eq!(opts.bus_name, "org.example.Ap");
        assert_eq!(opts.object_path, "/org/example/Ap");
    }

    #[test]
    fn bus_address_is_parsed_up_front() {
        assert!(BusKind::Address("unix:path=/run/ap/bus".into()).builder().is_ok());
        assert!(BusKind::Address("not a bus address".into()).builder().is_err());
    }
}
