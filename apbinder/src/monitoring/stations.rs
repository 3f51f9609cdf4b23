//! Real-time station count monitoring.
//!
//! Bridges the backing interface's station event stream into the binder, so
//! every change reaches whichever listener is registered at that moment.

use futures::StreamExt;
use log::{debug, warn};
use tokio::sync::watch;

use crate::api::models::ApError;
use crate::core::binder::ApInterfaceBinder;
use crate::Result;

/// Forwards station count changes from the backing interface to the binder.
///
/// Subscribes to [`ApInterface::station_events`] once and calls
/// [`ApInterfaceBinder::notify_station_count_changed`] for each event.
/// Events are forwarded one at a time, in order.
///
/// Runs until `shutdown` fires (or its sender is dropped), which returns
/// `Ok(())`. Run it in a background task.
///
/// # Errors
///
/// - [`ApError::InterfaceGone`] if the backing interface is already gone
/// - [`ApError::NoStationEvents`] if it does not publish events
/// - [`ApError::MonitorEnded`] if the event stream ends, typically because
///   the interface was torn down
///
/// [`ApInterface::station_events`]: crate::ApInterface::station_events
///
/// # Example
///
/// ```ignore
/// let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(());
/// tokio::spawn({
///     let binder = binder.clone();
///     async move { monitor_station_events(&binder, shutdown_rx).await }
/// });
/// // ...
/// let _ = shutdown_tx.send(());
/// ```
pub async fn monitor_station_events(
    binder: &ApInterfaceBinder,
    mut shutdown: watch::Receiver<()>,
) -> Result<()> {
    let mut events = {
        let interface = binder.interface().ok_or(ApError::InterfaceGone)?;
        interface.station_events().ok_or(ApError::NoStationEvents)?
    };

    debug!("Subscribed to station events");

    loop {
        tokio::select! {
            _ = shutdown.changed() => {
                debug!("Station monitoring shut down");
                return Ok(());
            }
            event = events.next() => match event {
                Some(count) => {
                    debug!("Associated station count changed to {count}");
                    binder.notify_station_count_changed(count).await;
                }
                None => {
                    warn!("Station event stream ended unexpectedly");
                    return Err(ApError::MonitorEnded);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{ApConfig, Band, EncryptionType};
    use crate::core::ap_interface::{ApInterface, StationListener};
    use crate::memory::MemoryApInterface;
    use async_trait::async_trait;
    use std::sync::{Arc, Weak};
    use tokio::sync::mpsc;

    struct ChannelListener(mpsc::UnboundedSender<i32>);

    #[async_trait]
    impl StationListener for ChannelListener {
        async fn on_associated_station_count_changed(&self, count: i32) -> Result<()> {
            let _ = self.0.send(count);
            Ok(())
        }
    }

    struct Silent;

    #[async_trait]
    impl ApInterface for Silent {
        async fn start_daemon(&self) -> bool {
            true
        }
        async fn stop_daemon(&self) -> bool {
            true
        }
        async fn write_config(&self, _config: &ApConfig) -> bool {
            true
        }
        async fn interface_name(&self) -> String {
            "wlan0".into()
        }
        async fn associated_station_count(&self) -> i32 {
            0
        }
        fn station_events(&self) -> Option<crate::StationEventStream> {
            None
        }
    }

    async fn running_interface() -> Arc<MemoryApInterface> {
        let ap = Arc::new(MemoryApInterface::new("wlan0"));
        ap.write_config(&ApConfig::new("HomeAP", Band::Any, EncryptionType::Open))
            .await;
        ap
    }

    #[tokio::test]
    async fn forwards_events_to_listener() {
        let ap = running_interface().await;
        let binder = Arc::new(ApInterfaceBinder::new(&ap));
        let (tx, mut rx) = mpsc::unbounded_channel();
        assert!(binder.start_daemon(Arc::new(ChannelListener(tx))).await);

        let (shutdown_tx, shutdown_rx) = watch::channel(());
        let monitor = tokio::spawn({
            let binder = binder.clone();
            async move { monitor_station_events(&binder, shutdown_rx).await }
        });
        tokio::task::yield_now().await;

        ap.set_station_count(3);
        assert_eq!(rx.recv().await, Some(3));

        shutdown_tx.send(()).unwrap();
        assert!(monitor.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn stream_end_is_reported() {
        let ap = running_interface().await;
        let binder = Arc::new(ApInterfaceBinder::new(&ap));
        let (_shutdown_tx, shutdown_rx) = watch::channel(());

        let monitor = tokio::spawn({
            let binder = binder.clone();
            async move { monitor_station_events(&binder, shutdown_rx).await }
        });
        tokio::task::yield_now().await;

        drop(ap);
        assert!(matches!(monitor.await.unwrap(), Err(ApError::MonitorEnded)));
    }

    #[tokio::test]
    async fn dead_interface_is_reported() {
        let weak: Weak<dyn ApInterface> = Weak::<MemoryApInterface>::new();
        let binder = ApInterfaceBinder::from_weak(weak);
        let (_shutdown_tx, shutdown_rx) = watch::channel(());

        let result = monitor_station_events(&binder, shutdown_rx).await;
        assert!(matches!(result, Err(ApError::InterfaceGone)));
    }

    #[tokio::test]
    async fn interface_without_events_is_reported() {
        let silent = Arc::new(Silent);
        let binder = ApInterfaceBinder::new(&silent);
        let (_shutdown_tx, shutdown_rx) = watch::channel(());

        let result = monitor_station_events(&binder, shutdown_rx).await;
        assert!(matches!(result, Err(ApError::NoStationEvents)));
    }
}
