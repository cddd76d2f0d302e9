use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{error::AppError, scheduler::queue::SyncJob};

/// Starts the repeating issue refresh.
///
/// Every `interval` a `RefreshAll` job is put on the sync queue. The job does not
/// wait for the sweep; a tick arriving while a sweep is still running is simply
/// processed after it.
///
/// # Arguments
/// - `jobs` - Sender side of the sync queue
/// - `interval` - Time between refreshes
///
/// # Returns
/// - `Ok(JobScheduler)` - Running scheduler; keep it alive for the ticks to continue
/// - `Err(AppError::SchedulerErr)` - Job could not be created or scheduler not started
pub async fn start_scheduler(
    jobs: UnboundedSender<SyncJob>,
    interval: Duration,
) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_repeated_async(interval, move |_uuid, _lock| {
        let jobs = jobs.clone();

        Box::pin(async move {
            if jobs.send(SyncJob::RefreshAll).is_err() {
                tracing::warn!("Sync queue closed, dropping scheduled refresh");
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!(
        "Issue refresh scheduler started (every {} minutes)",
        interval.as_secs() / 60
    );

    Ok(scheduler)
}
