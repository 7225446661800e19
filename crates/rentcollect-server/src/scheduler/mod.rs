//! Background job scheduler.
//!
//! Registers a repeated wake-check that runs the collection cycle once per
//! calendar day at the configured local time. A firing missed while the
//! process was down is not made up; the next one is the following day's.

mod trigger;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use rentcollect_core::AppConfig;
use rentcollect_workflow::AppContext;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

pub use trigger::DailyTrigger;

/// Builds and starts the background job scheduler.
///
/// Returns the running [`JobScheduler`] handle, which must be kept alive
/// for the lifetime of the process. Dropping it shuts down all jobs.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the scheduler cannot be initialised,
/// a job cannot be registered, or the scheduler fails to start.
pub async fn build_scheduler(
    ctx: Arc<AppContext>,
    config: &AppConfig,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;

    register_billing_job(
        &scheduler,
        ctx,
        DailyTrigger::new(config.billing_time, chrono::Local::now().naive_local()),
        Duration::from_secs(config.wake_interval_secs),
    )
    .await?;

    scheduler.start().await?;
    Ok(scheduler)
}

/// Register the wake-check that drives the daily collection cycle.
async fn register_billing_job(
    scheduler: &JobScheduler,
    ctx: Arc<AppContext>,
    trigger: DailyTrigger,
    wake_interval: Duration,
) -> Result<(), JobSchedulerError> {
    let next = trigger.next_fire(chrono::Local::now().naive_local());
    let trigger = Arc::new(Mutex::new(trigger));

    let job = Job::new_repeated_async(wake_interval, move |_uuid, _lock| {
        let ctx = Arc::clone(&ctx);
        let trigger = Arc::clone(&trigger);

        Box::pin(async move {
            if !poll_trigger(&trigger, chrono::Local::now().naive_local()) {
                return;
            }

            tracing::info!("scheduler: starting daily collection cycle");
            let result = rentcollect_workflow::run_collection_cycle(&ctx).await;
            tracing::info!(
                attempted = result.attempted,
                succeeded = result.succeeded,
                failed = result.failed,
                "scheduler: daily collection cycle complete"
            );
        })
    })?;

    scheduler.add(job).await?;
    tracing::info!(
        next_run = %next.format("%d/%m/%Y %H:%M"),
        wake_interval_secs = wake_interval.as_secs(),
        "scheduler: registered billing job"
    );
    Ok(())
}

/// Check the latch without holding the lock across an await point.
fn poll_trigger(trigger: &Mutex<DailyTrigger>, now: chrono::NaiveDateTime) -> bool {
    match trigger.lock() {
        Ok(mut guard) => guard.poll(now),
        Err(poisoned) => poisoned.into_inner().poll(now),
    }
}
