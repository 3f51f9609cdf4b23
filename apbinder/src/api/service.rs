use log::info;
use std::sync::Arc;
use zbus::Connection;

use crate::api::models::ServiceOptions;
use crate::core::binder::ApInterfaceBinder;
use crate::dbus::ApInterfaceService;
use crate::types::constants::bus;
use crate::Result;

/// Exports `binder` on the bus described by `options`.
///
/// Requests the well-known name and serves the control interface at the
/// object path. The service lives as long as the returned connection.
///
/// # Errors
///
/// Fails if the bus is unreachable or the name is already owned.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use apbinder::{serve, ApInterfaceBinder, MemoryApInterface, ServiceOptions};
///
/// # async fn example() -> apbinder::Result<()> {
/// let ap = Arc::new(MemoryApInterface::new("wlan0"));
/// let binder = Arc::new(ApInterfaceBinder::new(&ap));
/// let _conn = serve(binder, &ServiceOptions::default()).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(binder: Arc<ApInterfaceBinder>, options: &ServiceOptions) -> Result<Connection> {
    let conn = options
        .bus
        .builder()?
        .name(options.bus_name.as_str())?
        .serve_at(options.object_path.as_str(), ApInterfaceService::new(binder))?
        .build()
        .await?;

    info!(
        "Serving {} at {} as {}",
        bus::AP_INTERFACE,
        options.object_path,
        options.bus_name
    );
    Ok(conn)
}
