/// Scheduler module
///
/// Runs the reconciliation job automatically at a fixed interval. A failed
/// run is logged and retried naturally at the next tick; nothing is fatal
/// to the loop itself.

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time;

use crate::http_server::RunStatus;
use crate::job::ReconcileJob;

/// Start the automatic run scheduler.
pub async fn start_scheduler(
    job: Arc<ReconcileJob>,
    run_status: Arc<RwLock<RunStatus>>,
    interval_hours: u64,
) -> Result<()> {
    let mut interval = time::interval(Duration::from_secs(interval_hours * 3600));

    log::info!(
        "Starting run scheduler (interval: {} hours)",
        interval_hours
    );

    // Skip the first tick (immediate execution)
    interval.tick().await;

    loop {
        interval.tick().await;

        log::info!("Automatic run triggered");

        let result = job.run().await;
        let mut status = run_status.write().await;
        status.last_run = Some(chrono::Utc::now());
        status.total_runs += 1;

        match result {
            Ok(report) => {
                log::info!(
                    "Automatic run complete: {} scanned, {} replied",
                    report.posts_scanned,
                    report.replies_posted
                );
                status.last_report = Some(report);
                status.last_error = None;
            }
            Err(e) => {
                log::error!("Automatic run failed: {}", e);
                status.last_error = Some(e.to_string());
            }
        }
    }
}
