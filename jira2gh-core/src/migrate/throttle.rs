//! Rate-limit waiting

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::tracker::{IssueTracker, RateLimit};
use crate::Result;

/// Source of time for the migration
#[async_trait]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    async fn sleep(&self, duration: Duration);
}

/// Wall clock backed by tokio timers
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// How long to wait before the next call
///
/// `None` while calls remain. Once the window is exhausted, the time until
/// reset plus `margin`; a reset already in the past still waits `margin`.
pub fn wait_duration(limit: &RateLimit, now: DateTime<Utc>, margin: Duration) -> Option<Duration> {
    if limit.remaining > 0 {
        return None;
    }
    let until_reset = (limit.reset - now).to_std().unwrap_or(Duration::ZERO);
    Some(until_reset + margin)
}

/// Block until the tracker accepts another call
pub async fn wait_for_rate_limit<T, C>(tracker: &T, clock: &C, margin: Duration) -> Result<()>
where
    T: IssueTracker + ?Sized,
    C: Clock + ?Sized,
{
    let limit = tracker.rate_limit().await?;
    match wait_duration(&limit, clock.now(), margin) {
        Some(wait) => {
            info!(
                seconds = wait.as_secs(),
                reset = %limit.reset,
                "Rate limit exhausted, sleeping until reset"
            );
            clock.sleep(wait).await;
        }
        None => debug!(remaining = limit.remaining, "Rate limit ok"),
    }
    Ok(())
}
