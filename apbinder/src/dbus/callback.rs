//! Listener object exported by clients.

use log::{debug, warn};
use tokio::sync::mpsc;
use zbus::interface;
use zbus::message::Header;
use zbus::names::{OwnedUniqueName, UniqueName};

/// Serves `org.wificond.ApInterfaceEventCallback1` and queues every
/// notification the service sends.
///
/// Calls from any other connection are dropped.
#[derive(Debug)]
pub(crate) struct StationEventCallback {
    service: OwnedUniqueName,
    tx: mpsc::UnboundedSender<i32>,
}

impl StationEventCallback {
    /// `service` is the unique name of the connection serving the access
    /// point interface.
    pub(crate) fn new(service: OwnedUniqueName, tx: mpsc::UnboundedSender<i32>) -> Self {
        Self { service, tx }
    }

    fn is_from_service(&self, sender: Option<&UniqueName<'_>>) -> bool {
        sender.is_some_and(|sender| sender.as_str() == self.service.as_str())
    }
}

#[interface(name = "org.wificond.ApInterfaceEventCallback1")]
impl StationEventCallback {
    fn on_associated_station_count_changed(&self, count: i32, #[zbus(header)] header: Header<'_>) {
        if !self.is_from_service(header.sender()) {
            warn!(
                "Ignoring station count {count} from {:?}, expected {}",
                header.sender().map(UniqueName::as_str),
                self.service
            );
            return;
        }
        if self.tx.send(count).is_err() {
            debug!("Station count {count} arrived after the receiver was closed");
        }
    }
}
