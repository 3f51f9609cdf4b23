//! In-memory access point interface.
//!
//! [`MemoryApInterface`] keeps daemon state in process memory. It never
//! spawns a daemon or touches the driver; it lets the control surface be
//! hosted and exercised without either, and its failure switches let callers
//! drive every failure path.

use async_trait::async_trait;
use futures::stream;
use log::{debug, warn};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::broadcast;

use crate::api::models::ApConfig;
use crate::core::ap_interface::{ApInterface, StationEventStream};

const EVENT_CAPACITY: usize = 16;

#[derive(Debug, Default)]
struct MemoryState {
    running: bool,
    config: Option<ApConfig>,
    config_writes: usize,
    stations: i32,
    fail_start: bool,
    fail_stop: bool,
    fail_write: bool,
}

/// Access point interface backed by process memory.
///
/// # Example
///
/// ```rust
/// use apbinder::{ApConfig, ApInterface, Band, EncryptionType, MemoryApInterface};
///
/// # async fn example() {
/// let ap = MemoryApInterface::new("wlan0");
///
/// // The daemon refuses to start until it has a configuration
/// assert!(!ap.start_daemon().await);
///
/// let config = ApConfig::new("HomeAP", Band::Band2G, EncryptionType::Open);
/// assert!(ap.write_config(&config).await);
/// assert!(ap.start_daemon().await);
/// # }
/// ```
#[derive(Debug)]
pub struct MemoryApInterface {
    name: String,
    state: Mutex<MemoryState>,
    events: broadcast::Sender<i32>,
}

impl MemoryApInterface {
    /// Creates a stopped, unconfigured interface called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            name: name.into(),
            state: Mutex::new(MemoryState::default()),
            events,
        }
    }

    /// Returns `true` while the daemon is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state().running
    }

    /// The last configuration written, if any.
    #[must_use]
    pub fn config(&self) -> Option<ApConfig> {
        self.state().config.clone()
    }

    /// Number of configuration writes received, including failed ones.
    #[must_use]
    pub fn config_writes(&self) -> usize {
        self.state().config_writes
    }

    /// Sets the station count and publishes it if it changed.
    ///
    /// Ignored while the daemon is stopped.
    pub fn set_station_count(&self, count: i32) {
        let mut state = self.state();
        if !state.running {
            warn!("Ignoring station count {count} on stopped interface {}", self.name);
            return;
        }
        if state.stations == count {
            return;
        }
        state.stations = count;
        drop(state);

        // No subscribers is fine, the event is simply lost.
        let _ = self.events.send(count);
    }

    /// Makes subsequent starts fail.
    pub fn set_fail_start(&self, fail: bool) {
        self.state().fail_start = fail;
    }

    /// Makes subsequent stops fail.
    pub fn set_fail_stop(&self, fail: bool) {
        self.state().fail_stop = fail;
    }

    /// Makes subsequent configuration writes fail.
    pub fn set_fail_write(&self, fail: bool) {
        self.state().fail_write = fail;
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ApInterface for MemoryApInterface {
    async fn start_daemon(&self) -> bool {
        let mut state = self.state();
        if state.fail_start {
            debug!("Simulated start failure on {}", self.name);
            return false;
        }
        if state.config.is_none() {
            warn!("Refusing to start daemon on {} without a configuration", self.name);
            return false;
        }
        state.running = true;
        true
    }

    async fn stop_daemon(&self) -> bool {
        let mut state = self.state();
        if state.fail_stop {
            debug!("Simulated stop failure on {}", self.name);
            return false;
        }
        state.running = false;
        state.stations = 0;
        true
    }

    async fn write_config(&self, config: &ApConfig) -> bool {
        let mut state = self.state();
        state.config_writes += 1;
        if state.fail_write {
            debug!("Simulated config write failure on {}", self.name);
            return false;
        }
        state.config = Some(config.clone());
        true
    }

    async fn interface_name(&self) -> String {
        self.name.clone()
    }

    async fn associated_station_count(&self) -> i32 {
        self.state().stations
    }

    fn station_events(&self) -> Option<StationEventStream> {
        let rx = self.events.subscribe();
        let events = stream::unfold(rx, |mut rx| async move {
            loop {
                match rx.recv().await {
                    Ok(count) => return Some((count, rx)),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!("Station event subscriber lagged, skipped {skipped} events");
                    }
                    Err(broadcast::error::RecvError::Closed) => return None,
                }
            }
        });
        Some(Box::pin(events))
    }
}
