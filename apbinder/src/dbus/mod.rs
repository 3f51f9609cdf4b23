//! D-Bus plumbing for the access point control surface.
//!
//! This module contains the proxies used by clients, the objects exported
//! by the service and by clients, and the listener that calls back into a
//! remote caller.

mod ap_interface;
mod callback;
mod event_callback;
mod listener;
mod service;

pub use ap_interface::WificondApProxy;
pub(crate) use callback::StationEventCallback;
pub(crate) use event_callback::ApEventCallbackProxy;
pub use service::ApInterfaceService;
