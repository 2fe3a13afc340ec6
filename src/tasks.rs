//! Background tasks.
//!
//! An optional interval loop re-runs the full catalog reload so the
//! snapshot converges with writes made by other clients of the shared
//! store. It performs the same reload-and-replace operation as every other
//! refresh; a tick that loses to a newer reload is simply discarded by the
//! generation guard.

use std::time::Duration;

use tokio::time::interval;
use tracing::{debug, info};

use crate::config::AppState;

/// Start the periodic catalog refresh task.
///
/// Returns immediately when the configured interval is zero.
pub async fn start_refresh_loop(state: AppState) {
    let seconds = state.config.refresh_interval_seconds;
    if seconds == 0 {
        info!("Periodic catalog refresh disabled");
        return;
    }

    info!("Refreshing catalog every {}s", seconds);
    let mut ticker = interval(Duration::from_secs(seconds));

    loop {
        ticker.tick().await;

        // Load failures are logged inside refresh; the snapshot is kept.
        if state.service.refresh().await {
            debug!("Catalog snapshot refreshed");
        }
    }
}
