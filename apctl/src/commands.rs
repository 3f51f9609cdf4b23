//! Subcommand handlers.

use anyhow::{bail, Context};
use apbinder::{
    monitor_station_events, ApClient, ApConfig, ApError, ApInterfaceBinder, MemoryApInterface,
    ServiceOptions,
};
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

async fn client(options: &ServiceOptions) -> anyhow::Result<ApClient> {
    ApClient::new(options)
        .await
        .with_context(|| format!("Failed to reach {} on the {:?} bus", options.bus_name, options.bus))
}

/// Station counts cycled through by `serve --simulate-stations`.
const SIMULATED_STATIONS: [i32; 6] = [1, 2, 3, 2, 1, 0];

/// Hosts the service until Ctrl-C.
///
/// With `simulate` set, the associated station count changes once per
/// period while the daemon runs.
pub async fn serve(
    options: &ServiceOptions,
    interface: String,
    simulate: Option<Duration>,
) -> anyhow::Result<()> {
    let ap = Arc::new(MemoryApInterface::new(interface));
    let binder = Arc::new(ApInterfaceBinder::new(&ap));

    let _conn = apbinder::serve(binder.clone(), options)
        .await
        .context("Failed to export the service")?;

    let (shutdown_tx, shutdown_rx) = watch::channel(());
    let monitor = tokio::spawn({
        let binder = binder.clone();
        let shutdown_rx = shutdown_rx.clone();
        async move { monitor_station_events(&binder, shutdown_rx).await }
    });
    let simulation = simulate.map(|period| {
        info!("Simulating station changes every {period:?}");
        tokio::spawn(simulate_stations(ap.clone(), period, shutdown_rx))
    });

    tokio::signal::ctrl_c().await?;
    info!("Shutting down");
    let _ = shutdown_tx.send(());

    if let Some(simulation) = simulation {
        simulation.await?;
    }
    match monitor.await? {
        Ok(()) | Err(ApError::MonitorEnded) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Walks the station count through [`SIMULATED_STATIONS`] until `shutdown`
/// fires. Ticks while the daemon is stopped are skipped.
async fn simulate_stations(
    ap: Arc<MemoryApInterface>,
    period: Duration,
    mut shutdown: watch::Receiver<()>,
) {
    let mut ticker = tokio::time::interval(period);
    ticker.tick().await;

    for count in SIMULATED_STATIONS.iter().copied().cycle() {
        tokio::select! {
            _ = shutdown.changed() => return,
            _ = ticker.tick() => {
                if ap.is_running() {
                    debug!("Simulated station count {count}");
                    ap.set_station_count(count);
                }
            }
        }
    }
}

/// Starts the daemon and prints station counts until Ctrl-C.
pub async fn start(options: &ServiceOptions) -> anyhow::Result<()> {
    let client = client(options).await?;
    let Some(mut events) = client.start_daemon().await? else {
        bail!("Service failed to start the daemon");
    };
    debug!("Station notifications arrive at {}", events.path());
    println!("Daemon started, waiting for station changes (Ctrl-C to quit)");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            count = events.next() => match count {
                Some(count) => println!("associated stations: {count}"),
                None => {
                    warn!("Station notifications closed");
                    break;
                }
            }
        }
    }

    events.close().await?;
    Ok(())
}

pub async fn stop(options: &ServiceOptions) -> anyhow::Result<()> {
    if !client(options).await?.stop_daemon().await? {
        bail!("Service failed to stop the daemon");
    }
    println!("Daemon stopped");
    Ok(())
}

pub async fn configure(options: &ServiceOptions, config: &ApConfig) -> anyhow::Result<()> {
    if !client(options).await?.write_configuration(config).await? {
        bail!("Service rejected the configuration");
    }
    println!("Configuration written: {config:?}");
    Ok(())
}

pub async fn interface_name(options: &ServiceOptions) -> anyhow::Result<()> {
    let name = client(options).await?.interface_name().await?;
    if name.is_empty() {
        bail!("Access point interface is gone");
    }
    println!("{name}");
    Ok(())
}

pub async fn stations(options: &ServiceOptions) -> anyhow::Result<()> {
    let count = client(options).await?.associated_station_count().await?;
    if count < 0 {
        bail!("Access point interface is gone");
    }
    println!("{count}");
    Ok(())
}
