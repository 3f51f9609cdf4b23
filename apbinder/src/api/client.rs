use log::{debug, warn};
use tokio::sync::mpsc;
use zbus::fdo::DBusProxy;
use zbus::names::OwnedUniqueName;
use zbus::Connection;
use zvariant::OwnedObjectPath;

use crate::api::models::{ApConfig, ServiceOptions};
use crate::dbus::{StationEventCallback, WificondApProxy};
use crate::util::utils::event_callback_path;
use crate::Result;

/// High-level client for the access point control service.
///
/// Mirrors the service's methods one to one. `Err` is reserved for transport
/// failures (no bus, service not running, malformed reply); whether the
/// operation itself worked is in the returned value.
///
/// # Example
///
/// ```no_run
/// use apbinder::{ApClient, ApConfig, Band, EncryptionType, ServiceOptions};
///
/// # async fn example() -> apbinder::Result<()> {
/// let client = ApClient::new(&ServiceOptions::default()).await?;
///
/// let config = ApConfig::new("HomeAP", Band::Band5G, EncryptionType::Wpa2)
///     .with_passphrase("correct horse");
/// if !client.write_configuration(&config).await? {
///     eprintln!("configuration rejected");
///     return Ok(());
/// }
///
/// if let Some(mut events) = client.start_daemon().await? {
///     while let Some(count) = events.next().await {
///         println!("{count} stations associated");
///     }
/// }
/// # Ok(())
/// # }
/// ```
///
/// # Thread Safety
///
/// `ApClient` is `Clone`; clones share the same D-Bus connection.
#[derive(Debug, Clone)]
pub struct ApClient {
    conn: Connection,
    proxy: WificondApProxy<'static>,
}

impl ApClient {
    /// Connects to the bus named in `options` and targets the service there.
    pub async fn new(options: &ServiceOptions) -> Result<Self> {
        let conn = options.bus.connect().await?;
        Self::with_connection(conn, options).await
    }

    /// Targets the service over an existing connection.
    pub async fn with_connection(conn: Connection, options: &ServiceOptions) -> Result<Self> {
        let proxy = WificondApProxy::builder(&conn)
            .destination(options.bus_name.clone())?
            .path(options.object_path.clone())?
            .build()
            .await?;
        Ok(Self { conn, proxy })
    }

    /// Starts the daemon and subscribes to station count changes.
    ///
    /// Exports a callback object on this client's connection and hands its
    /// path to the service. The callback only accepts calls from the
    /// connection currently owning the service name. Returns `None` if the
    /// service reported failure, in which case the callback object is
    /// withdrawn again.
    pub async fn start_daemon(&self) -> Result<Option<StationEvents>> {
        let service = self.service_owner().await?;
        let path = event_callback_path()?;
        let (tx, rx) = mpsc::unbounded_channel();
        self.conn
            .object_server()
            .at(path.clone(), StationEventCallback::new(service, tx))
            .await?;

        let started = match self.proxy.start_daemon(&path).await {
            Ok(started) => started,
            Err(e) => {
                unexport_callback(&self.conn, &path).await;
                return Err(e.into());
            }
        };

        if !started {
            debug!("Service refused to start the daemon");
            unexport_callback(&self.conn, &path).await;
            return Ok(None);
        }

        Ok(Some(StationEvents {
            rx,
            path,
            conn: Some(self.conn.clone()),
        }))
    }

    /// Stops the daemon.
    pub async fn stop_daemon(&self) -> Result<bool> {
        Ok(self.proxy.stop_daemon().await?)
    }

    /// Writes a typed configuration.
    pub async fn write_configuration(&self, config: &ApConfig) -> Result<bool> {
        self.write_configuration_raw(
            &config.ssid,
            config.hidden,
            config.band.into(),
            config.encryption.into(),
            &config.passphrase,
        )
        .await
    }

    /// Writes a configuration using raw band and encryption codes.
    ///
    /// The service rejects unknown codes by returning `false`.
    pub async fn write_configuration_raw(
        &self,
        ssid: &[u8],
        hidden: bool,
        band: i32,
        encryption: i32,
        passphrase: &[u8],
    ) -> Result<bool> {
        Ok(self
            .proxy
            .write_configuration(ssid, hidden, band, encryption, passphrase)
            .await?)
    }

    /// Name of the network interface, empty if it is gone.
    pub async fn interface_name(&self) -> Result<String> {
        Ok(self.proxy.get_interface_name().await?)
    }

    /// Number of associated stations, `-1` if the interface is gone.
    pub async fn associated_station_count(&self) -> Result<i32> {
        Ok(self.proxy.get_associated_station_count().await?)
    }

    async fn service_owner(&self) -> Result<OwnedUniqueName> {
        let dbus = DBusProxy::new(&self.conn).await?;
        let owner = dbus
            .get_name_owner(self.proxy.inner().destination().clone())
            .await
            .map_err(zbus::Error::from)?;
        Ok(owner)
    }
}

/// Station count notifications for one successful `start_daemon`.
///
/// Backed by a callback object exported on the client connection. The
/// service stops calling it after the next `StopDaemon`. The object is
/// withdrawn by [`close`](Self::close), or in the background when the
/// value is dropped inside a tokio runtime.
#[derive(Debug)]
pub struct StationEvents {
    rx: mpsc::UnboundedReceiver<i32>,
    path: OwnedObjectPath,
    conn: Option<Connection>,
}

impl StationEvents {
    /// Waits for the next station count.
    ///
    /// Returns `None` once the callback object has been withdrawn.
    pub async fn next(&mut self) -> Option<i32> {
        self.rx.recv().await
    }

    /// Path of the exported callback object.
    #[must_use]
    pub fn path(&self) -> &str {
        self.path.as_str()
    }

    /// Withdraws the callback object.
    pub async fn close(mut self) -> Result<()> {
        if let Some(conn) = self.conn.take() {
            conn.object_server()
                .remove::<StationEventCallback, _>(self.path.clone())
                .await?;
        }
        Ok(())
    }
}

impl Drop for StationEvents {
    fn drop(&mut self) {
        let Some(conn) = self.conn.take() else {
            return;
        };
        let path = self.path.clone();
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move { unexport_callback(&conn, &path).await });
            }
            Err(_) => warn!(
                "No runtime to withdraw callback object {}, it stays exported",
                path.as_str()
            ),
        }
    }
}

async fn unexport_callback(conn: &Connection, path: &OwnedObjectPath) {
    if let Err(e) = conn
        .object_server()
        .remove::<StationEventCallback, _>(path.clone())
        .await
    {
        warn!("Failed to withdraw callback object {}: {e}", path.as_str());
    }
}
