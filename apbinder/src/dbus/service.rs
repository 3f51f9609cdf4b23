//! D-Bus object exporting an [`ApInterfaceBinder`].

use log::{debug, error};
use std::sync::Arc;
use zbus::message::Header;
use zbus::{interface, Connection};
use zvariant::OwnedObjectPath;

use crate::api::models::ApError;
use crate::core::binder::ApInterfaceBinder;
use crate::dbus::listener::DbusStationListener;

/// Serves `org.wificond.ApInterface1` on behalf of a binder.
///
/// Each method replies with the binder's plain result. A method call always
/// succeeds at the D-Bus level; callers must look at the returned value.
#[derive(Debug, Clone)]
pub struct ApInterfaceService {
    binder: Arc<ApInterfaceBinder>,
}

impl ApInterfaceService {
    /// Wraps a binder for export.
    pub fn new(binder: Arc<ApInterfaceBinder>) -> Self {
        Self { binder }
    }
}

#[interface(name = "org.wificond.ApInterface1")]
impl ApInterfaceService {
    /// Starts the daemon. `listener` is the path of a callback object owned
    /// by the calling connection.
    async fn start_daemon(
        &self,
        listener: OwnedObjectPath,
        #[zbus(header)] header: Header<'_>,
        #[zbus(connection)] conn: &Connection,
    ) -> bool {
        let Some(sender) = header.sender() else {
            error!("StartDaemon: {}", ApError::MissingSender);
            return false;
        };
        debug!("StartDaemon from {sender}, listener at {}", listener.as_str());

        let listener = match DbusStationListener::new(conn, sender.to_owned(), listener).await {
            Ok(listener) => listener,
            Err(e) => {
                error!("StartDaemon: cannot reach listener: {e}");
                return false;
            }
        };
        self.binder.start_daemon(Arc::new(listener)).await
    }

    async fn stop_daemon(&self) -> bool {
        self.binder.stop_daemon().await
    }

    async fn write_configuration(
        &self,
        ssid: Vec<u8>,
        hidden: bool,
        band: i32,
        encryption: i32,
        passphrase: Vec<u8>,
    ) -> bool {
        self.binder
            .write_configuration(ssid, hidden, band, encryption, passphrase)
            .await
    }

    async fn get_interface_name(&self) -> String {
        self.binder.interface_name().await
    }

    async fn get_associated_station_count(&self) -> i32 {
        self.binder.associated_station_count().await
    }
}
