//! Blocking bridge over the store's asynchronous permission request.

use std::sync::mpsc;
use std::time::Duration;

use tracing::{debug, error, info};

use crate::error::{CalendarError, CalendarResult};
use crate::store::{EntityKind, EventStore};

/// How long to wait for the store to answer an access request.
pub const DEFAULT_ACCESS_TIMEOUT: Duration = Duration::from_secs(10);

/// Request access to `kind` entities and block the calling thread until the
/// store answers or the timeout expires.
///
/// Exactly one request is issued; the store's completion releases the wait.
/// A store that never answers surfaces [`CalendarError::PermissionTimeout`]
/// instead of blocking forever.
pub fn request_access(
    store: &dyn EventStore,
    kind: EntityKind,
    timeout: Duration,
) -> CalendarResult<()> {
    let (sender, receiver) = mpsc::channel();

    store.request_access(
        kind,
        Box::new(move |granted, diagnostic| {
            if let Some(diagnostic) = diagnostic {
                debug!("access completion carried diagnostic: {diagnostic}");
            }
            let _ = sender.send(granted);
        }),
    );

    match receiver.recv_timeout(timeout) {
        Ok(true) => {
            info!("Calendar access granted");
            Ok(())
        }
        Ok(false) => {
            error!("Calendar access request denied");
            Err(CalendarError::PermissionDenied)
        }
        // Disconnection means the store dropped the completion unfired;
        // either way the store never answered.
        Err(_) => Err(CalendarError::PermissionTimeout(timeout.as_secs())),
    }
}
