/// Metric Rain Bot
///
/// A scheduled automation job that reads a rainfall-reporting account,
/// converts each posted inch measurement to a metric unit, and replies with
/// the converted value. Runs are triggered by webhook or on a timer; the
/// reply ledger is rebuilt from the bot's own timeline every run.

use anyhow::Result;
use std::sync::Arc;
use tokio::sync::RwLock;

use metric_rain_bot::config::Config;
use metric_rain_bot::http_server::{start_server, AppState, RunStatus};
use metric_rain_bot::job::ReconcileJob;
use metric_rain_bot::scheduler::start_scheduler;
use metric_rain_bot::twitter::TwitterClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger
    pretty_env_logger::init();

    log::info!("Starting Metric Rain Bot...");

    // Load configuration from environment
    let config = Config::from_env()?;

    log::info!(
        "Watching @{} as @{} (unit: {}, policy: {}, dry run: {})",
        config.target_handle,
        config.bot_handle,
        config.profile.suffix,
        config.scan_policy,
        config.dry_run
    );

    let client = Arc::new(TwitterClient::new(&config));
    let job = Arc::new(ReconcileJob::new(config.clone(), client));
    let run_status = Arc::new(RwLock::new(RunStatus::default()));

    if config.run_interval_hours > 0 {
        let scheduler_job = Arc::clone(&job);
        let scheduler_status = Arc::clone(&run_status);
        let interval_hours = config.run_interval_hours;
        tokio::spawn(async move {
            if let Err(e) = start_scheduler(scheduler_job, scheduler_status, interval_hours).await {
                log::error!("Scheduler stopped: {}", e);
            }
        });
    } else {
        log::info!("RUN_INTERVAL_HOURS is 0, automatic runs disabled");
    }

    let port = config.webhook_port;
    let state = AppState {
        config,
        job,
        run_status,
    };

    start_server(state, port).await?;

    Ok(())
}
