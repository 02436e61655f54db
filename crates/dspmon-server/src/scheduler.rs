//! Background feed refresh.
//!
//! Initialises a [`JobScheduler`] at server startup and registers the
//! recurring feed reload job.

use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use crate::state::AppState;

/// Builds and starts the background refresh scheduler.
///
/// Returns the running [`JobScheduler`] handle, which must be kept alive
/// for the lifetime of the process — dropping it shuts down the job.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the scheduler cannot be initialised,
/// the job cannot be registered, or the scheduler fails to start.
pub async fn build_scheduler(state: AppState) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;
    register_feed_refresh_job(&scheduler, state).await?;
    scheduler.start().await?;
    Ok(scheduler)
}

/// Register the ten-minute feed refresh job (`0 */10 * * * *`).
///
/// Each run drops the feed cache and reloads, seeding default annotation
/// entries for newly-seen store identifiers. The annotation session is
/// never reset, so operator edits pending a save survive every timer
/// firing; a failed reload keeps the previous state and simply logs.
async fn register_feed_refresh_job(
    scheduler: &JobScheduler,
    state: AppState,
) -> Result<(), JobSchedulerError> {
    let job = Job::new_async("0 */10 * * * *", move |_uuid, _lock| {
        let state = state.clone();

        Box::pin(async move {
            tracing::info!("scheduler: starting feed refresh");
            state.invalidate_feed().await;
            let outcome = state.load_feed().await;
            match outcome.error {
                None => {
                    let rows = outcome.snapshot.map_or(0, |s| s.table.len());
                    tracing::info!(rows, "scheduler: feed refresh complete");
                }
                Some(error) => {
                    tracing::warn!(%error, "scheduler: feed refresh failed; keeping previous state");
                }
            }
        })
    })?;

    scheduler.add(job).await?;
    Ok(())
}
