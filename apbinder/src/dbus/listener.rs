//! Station listener reached over D-Bus.

use async_trait::async_trait;
use log::debug;
use zbus::names::UniqueName;
use zbus::proxy::CacheProperties;
use zbus::Connection;
use zvariant::OwnedObjectPath;

use crate::core::ap_interface::StationListener;
use crate::dbus::ApEventCallbackProxy;
use crate::types::constants::bus;
use crate::Result;

/// Calls back into the callback object a remote caller exported.
///
/// The caller is addressed by its unique bus name, so a listener stops
/// receiving anything once that connection goes away.
#[derive(Debug)]
pub(crate) struct DbusStationListener {
    proxy: ApEventCallbackProxy<'static>,
}

impl DbusStationListener {
    pub(crate) async fn new(
        conn: &Connection,
        owner: UniqueName<'static>,
        path: OwnedObjectPath,
    ) -> Result<Self> {
        debug!("Station listener: {} on {owner} at {}", bus::EVENT_CALLBACK, path.as_str());
        let proxy = ApEventCallbackProxy::builder(conn)
            .destination(owner)?
            .path(path)?
            .cache_properties(CacheProperties::No)
            .build()
            .await?;
        Ok(Self { proxy })
    }
}

#[async_trait]
impl StationListener for DbusStationListener {
    async fn on_associated_station_count_changed(&self, count: i32) -> Result<()> {
        self.proxy.on_associated_station_count_changed(count).await?;
        Ok(())
    }
}
