use std::time::Duration;

use tokio::sync::watch;

use crate::db;
use crate::state::SharedState;

pub const SWEEP_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// Background janitor: drops expired reset codes and elapsed login limiter windows.
/// Runs until shutdown is signaled.
pub async fn run(state: SharedState, mut shutdown: watch::Receiver<bool>, interval: Duration) {
    tracing::debug!("Janitor started (every {}s)", interval.as_secs());

    loop {
        if *shutdown.borrow() {
            break;
        }

        sweep(&state).await;

        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = shutdown.changed() => {}
        }
    }

    tracing::debug!("Janitor stopped");
}

/// One cleanup pass. Errors are logged and retried on the next pass.
pub async fn sweep(state: &SharedState) {
    match db::password_reset_codes::purge_expired(&state.pool).await {
        Ok(0) => {}
        Ok(n) => tracing::info!("Purged {n} expired reset code(s)"),
        Err(e) => tracing::error!("Failed to purge expired reset codes: {e}"),
    }

    state.login_limiter.cleanup();
}
