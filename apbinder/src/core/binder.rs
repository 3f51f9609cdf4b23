//! Transport-independent access point control surface.
//!
//! [`ApInterfaceBinder`] sits between an RPC transport and the backing
//! [`ApInterface`]. It checks that the interface is still alive, validates
//! band and encryption codes, forwards the call and reports the outcome as
//! a plain value. Nothing here returns an error: a torn-down interface, an
//! unknown code and a failing daemon all collapse into `false`, an empty
//! name or [`station::UNKNOWN_COUNT`].

use log::{debug, error, info, warn};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use crate::api::models::{ApConfig, Band, EncryptionType};
use crate::core::ap_interface::{ApInterface, StationListener};
use crate::types::constants::station;
use crate::util::utils::ssid_for_display;

/// Control surface for one access point interface.
///
/// Holds a weak reference to the backing interface, which its owner may
/// drop at any time, and the listener registered by the last successful
/// [`start_daemon`](Self::start_daemon).
///
/// # Thread Safety
///
/// All methods take `&self`. Calls are not serialized against each other;
/// concurrent starts and stops race exactly as the backing interface allows.
/// The listener slot is swapped under a lock that is never held across an
/// `.await`, so a notification sees either the old or the new listener.
pub struct ApInterfaceBinder {
    interface: Weak<dyn ApInterface>,
    listener: Mutex<Option<Arc<dyn StationListener>>>,
}

impl ApInterfaceBinder {
    /// Creates a binder for `interface` without taking ownership of it.
    pub fn new<I>(interface: &Arc<I>) -> Self
    where
        I: ApInterface + 'static,
    {
        let weak: Weak<I> = Arc::downgrade(interface);
        Self::from_weak(weak)
    }

    /// Creates a binder from an existing weak reference.
    pub fn from_weak(interface: Weak<dyn ApInterface>) -> Self {
        Self {
            interface,
            listener: Mutex::new(None),
        }
    }

    /// Returns `true` while the backing interface is alive.
    #[must_use]
    pub fn is_interface_alive(&self) -> bool {
        self.interface.strong_count() > 0
    }

    /// Returns `true` if a listener is registered.
    #[must_use]
    pub fn has_listener(&self) -> bool {
        self.listener_slot().is_some()
    }

    /// Starts the daemon and registers `listener` for station events.
    ///
    /// The listener replaces any previous one, but only if the daemon
    /// started. Returns `false` if the interface is gone or the start failed.
    pub async fn start_daemon(&self, listener: Arc<dyn StationListener>) -> bool {
        let Some(interface) = self.interface() else {
            warn!("Cannot start daemon on dead access point interface");
            return false;
        };

        let started = interface.start_daemon().await;
        if started {
            *self.listener_slot() = Some(listener);
            info!("Access point daemon started, station listener registered");
        } else {
            debug!("Access point daemon failed to start");
        }
        started
    }

    /// Stops the daemon and drops the registered listener.
    ///
    /// The listener is cleared even if the stop failed.
    pub async fn stop_daemon(&self) -> bool {
        let Some(interface) = self.interface() else {
            warn!("Cannot stop daemon on dead access point interface");
            return false;
        };

        let stopped = interface.stop_daemon().await;
        self.listener_slot().take();
        if stopped {
            info!("Access point daemon stopped");
        } else {
            debug!("Access point daemon failed to stop, listener cleared anyway");
        }
        stopped
    }

    /// Validates the wire codes and writes the configuration.
    ///
    /// The encryption code is checked before the band code. Nothing reaches
    /// the backing interface unless both are known.
    pub async fn write_configuration(
        &self,
        ssid: Vec<u8>,
        hidden: bool,
        band_code: i32,
        encryption_code: i32,
        passphrase: Vec<u8>,
    ) -> bool {
        let Some(interface) = self.interface() else {
            warn!("Cannot set config on dead access point interface");
            return false;
        };

        let encryption = match EncryptionType::try_from(encryption_code) {
            Ok(encryption) => encryption,
            Err(e) => {
                error!("{e}");
                return false;
            }
        };

        let band = match Band::try_from(band_code) {
            Ok(band) => band,
            Err(e) => {
                error!("{e}");
                return false;
            }
        };

        debug!(
            "Writing config for {} (band: {band}, encryption: {encryption}, hidden: {hidden})",
            ssid_for_display(&ssid)
        );

        let config = ApConfig {
            ssid,
            hidden,
            band,
            encryption,
            passphrase,
        };
        interface.write_config(&config).await
    }

    /// Name of the network interface, empty if the interface is gone.
    pub async fn interface_name(&self) -> String {
        let Some(interface) = self.interface() else {
            warn!("Cannot get interface name from dead access point interface");
            return String::new();
        };
        interface.interface_name().await
    }

    /// Number of associated stations, or `-1` if the interface is gone.
    pub async fn associated_station_count(&self) -> i32 {
        let Some(interface) = self.interface() else {
            warn!("Cannot get number of associated stations from dead access point interface");
            return station::UNKNOWN_COUNT;
        };
        interface.associated_station_count().await
    }

    /// Forwards a station count change to the registered listener.
    ///
    /// Dropped silently when no listener is registered. A failed delivery is
    /// logged and not retried.
    pub async fn notify_station_count_changed(&self, count: i32) {
        let listener = self.listener_slot().clone();
        let Some(listener) = listener else {
            debug!("No listener registered, dropping station count {count}");
            return;
        };

        if let Err(e) = listener.on_associated_station_count_changed(count).await {
            warn!("Failed to deliver station count {count}: {e}");
        }
    }

    pub(crate) fn interface(&self) -> Option<Arc<dyn ApInterface>> {
        self.interface.upgrade()
    }

    fn listener_slot(&self) -> MutexGuard<'_, Option<Arc<dyn StationListener>>> {
        self.listener.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for ApInterfaceBinder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApInterfaceBinder")
            .field("interface_alive", &self.is_interface_alive())
            .field("has_listener", &self.has_listener())
            .finish()
    }
}
