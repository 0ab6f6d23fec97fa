//! Background rotation of the short-lived session cookie.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::client::GeminiWebClient;
use crate::credentials::Credentials;

/// Rotate the client's cookie every `interval` until the handle is aborted.
///
/// `on_rotated` receives each renewed pair so the caller can persist it.
/// A failed rotation is logged and the stale cookie stays in use; the
/// loop keeps going.
pub fn spawn_rotation<F>(
    client: Arc<GeminiWebClient>,
    interval: Duration,
    on_rotated: F,
) -> JoinHandle<()>
where
    F: Fn(&Credentials) + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // the first tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;
            match client.rotate().await {
                Ok(credentials) => {
                    debug!("scheduled cookie rotation succeeded");
                    on_rotated(&credentials);
                }
                Err(e) => warn!(error = %e, "scheduled cookie rotation failed"),
            }
        }
    })
}
