//! Scheduled background tasks using tokio-cron-scheduler.
//!
//! A sponsor payment left `initiated` means the payment modal was closed or
//! the user navigated away. The workflow performs no rollback at that
//! moment; this sweep marks such rows abandoned once they are clearly
//! stale so they stop counting as open payment attempts.

use anyhow::Result;
use chrono::Duration;
use sqlx::PgPool;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::domains::payment::models::Payment;

/// How old an `initiated` payment must be before the sweep abandons it.
const STALE_PAYMENT_AGE_HOURS: i64 = 24;

/// Start all scheduled tasks
pub async fn start_scheduler(pool: PgPool) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    // Stale payment sweep - runs every hour
    let sweep_pool = pool.clone();
    let sweep_job = Job::new_async("0 0 * * * *", move |_uuid, _lock| {
        let pool = sweep_pool.clone();
        Box::pin(async move {
            if let Err(e) = run_payment_sweep(&pool).await {
                tracing::error!("Stale payment sweep failed: {}", e);
            }
        })
    })?;

    scheduler.add(sweep_job).await?;
    scheduler.start().await?;

    tracing::info!("Scheduled tasks started (stale payment sweep every hour)");
    Ok(scheduler)
}

/// Abandon initiated payments that never received a capture.
async fn run_payment_sweep(pool: &PgPool) -> Result<()> {
    let swept = Payment::abandon_stale(Duration::hours(STALE_PAYMENT_AGE_HOURS), pool).await?;
    if swept > 0 {
        tracing::info!("Marked {} stale payments as abandoned", swept);
    }
    Ok(())
}
