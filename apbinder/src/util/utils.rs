//! Utility functions for log-friendly rendering and bus paths.
//!
//! SSIDs and passphrases travel as raw bytes, these helpers decide how they
//! show up in logs and debug output.

use std::borrow::Cow;
use std::str;
use uuid::Uuid;
use zvariant::OwnedObjectPath;

use crate::types::constants::bus;
use crate::Result;

/// Decode SSID bytes for display, defaulting to `<Hidden Network>` if empty.
///
/// Invalid UTF-8 is rendered lossily; the SSID is an opaque byte string and
/// only needs to be recognisable in logs.
pub(crate) fn ssid_for_display(bytes: &[u8]) -> Cow<'_, str> {
    if bytes.is_empty() {
        return Cow::Borrowed("<Hidden Network>");
    }

    match str::from_utf8(bytes) {
        Ok(s) => Cow::Borrowed(s),
        Err(_) => String::from_utf8_lossy(bytes),
    }
}

/// Placeholder shown instead of secret material.
pub(crate) fn redacted(secret: &[u8]) -> &'static str {
    if secret.is_empty() {
        "<empty>"
    } else {
        "<redacted>"
    }
}

/// Builds a fresh object path for a listener object exported by a client.
///
/// Each call yields a distinct path below
/// [`bus::EVENT_CALLBACK_PATH_PREFIX`], so several `start_daemon` calls on one
/// connection never collide.
pub(crate) fn event_callback_path() -> Result<OwnedObjectPath> {
    let path = format!(
        "{}/{}",
        bus::EVENT_CALLBACK_PATH_PREFIX,
        Uuid::new_v4().simple()
    );
    Ok(OwnedObjectPath::try_from(path)?)
}
