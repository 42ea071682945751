//! Periodic removal of finished casting calls and stale sign-ups.
//!
//! A casting call is deleted once its shooting end date has passed (its
//! submissions go with it via `ON DELETE CASCADE`). Pending registrations
//! whose verification code expired are purged in the same sweep.

use std::time::Duration;

use actory_db::repositories::{CastingCallRepo, PendingRegistrationRepo};
use chrono::Utc;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

const MIN_INTERVAL: Duration = Duration::from_secs(1);

/// Run one sweep. Returns `(casting_calls_deleted, registrations_deleted)`.
pub async fn sweep(pool: &PgPool) -> Result<(u64, u64), sqlx::Error> {
    let now = Utc::now();
    let calls = CastingCallRepo::delete_expired(pool, now).await?;
    let registrations = PendingRegistrationRepo::delete_expired(pool, now).await?;
    Ok((calls, registrations))
}

/// Run the expiry loop every `interval` until `cancel` is triggered.
pub async fn run(pool: PgPool, interval: Duration, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = interval.as_secs(),
        "Casting call expiry job started"
    );

    // `interval` panics on a zero period.
    let mut ticker = tokio::time::interval(interval.max(MIN_INTERVAL));

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Casting call expiry job stopping");
                break;
            }
            _ = ticker.tick() => {
                match sweep(&pool).await {
                    Ok((0, 0)) => tracing::debug!("Expiry sweep: nothing to purge"),
                    Ok((calls, registrations)) => {
                        tracing::info!(calls, registrations, "Expiry sweep: purged rows");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Expiry sweep failed");
                    }
                }
            }
        }
    }
}
