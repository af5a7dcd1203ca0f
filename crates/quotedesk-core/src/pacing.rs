//! Minimum spacing between outbound provider requests.
//!
//! The batch runner awaits [`PacingPolicy::pace`] before every fetch except
//! the first. Policies only decide how long that wait lasts.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use tokio::time::Instant;

/// Request quota published by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderQuota {
    pub window: Duration,
    pub limit: u32,
}

impl ProviderQuota {
    /// Alpha Vantage free tier: 5 requests per rolling minute.
    pub const fn alphavantage_free_tier() -> Self {
        Self {
            window: Duration::from_secs(60),
            limit: 5,
        }
    }

    /// Spacing that keeps a sequential caller inside the quota.
    pub fn min_interval(self) -> Duration {
        self.window / self.limit.max(1)
    }
}

/// Pacing seam. Tests inject zero-delay or recording policies.
pub trait PacingPolicy: Send {
    /// Wait before the next request.
    fn pace(&mut self) -> Pin<Box<dyn Future<Output = ()> + Send + '_>>;

    /// Called immediately before each request is sent.
    fn record_request(&mut self) {}
}

/// Sleeps the full interval every time, regardless of request latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedIntervalPacer {
    interval: Duration,
}

impl FixedIntervalPacer {
    pub const fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn from_quota(quota: ProviderQuota) -> Self {
        Self::new(quota.min_interval())
    }

    pub const fn interval(&self) -> Duration {
        self.interval
    }
}

impl PacingPolicy for FixedIntervalPacer {
    fn pace(&mut self) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        let interval = self.interval;
        Box::pin(async move {
            if !interval.is_zero() {
                tokio::time::sleep(interval).await;
            }
        })
    }
}

/// Sleeps only until `interval` has passed since the previous request started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElapsedIntervalPacer {
    interval: Duration,
    last_request: Option<Instant>,
}

impl ElapsedIntervalPacer {
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_request: None,
        }
    }

    /// Remaining wait as of `now`.
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.last_request {
            Some(last) => self.interval.saturating_sub(now.saturating_duration_since(last)),
            None => Duration::ZERO,
        }
    }
}

impl PacingPolicy for ElapsedIntervalPacer {
    fn pace(&mut self) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        let remaining = self.remaining(Instant::now());
        Box::pin(async move {
            if !remaining.is_zero() {
                tokio::time::sleep(remaining).await;
            }
        })
    }

    fn record_request(&mut self) {
        self.last_request = Some(Instant::now());
    }
}

/// Never waits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoPacing;

impl PacingPolicy for NoPacing {
    fn pace(&mut self) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin(async {})
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_tier_spacing_is_twelve_seconds() {
        let quota = ProviderQuota::alphavantage_free_tier();
        assert_eq!(quota.min_interval(), Duration::from_secs(12));
        assert_eq!(
            FixedIntervalPacer::from_quota(quota).interval(),
            Duration::from_secs(12)
        );
    }

    #[test]
    fn zero_limit_does_not_divide_by_zero() {
        let quota = ProviderQuota {
            window: Duration::from_secs(10),
            limit: 0,
        };
        assert_eq!(quota.min_interval(), Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn fixed_pacer_sleeps_full_interval() {
        let mut pacer = FixedIntervalPacer::new(Duration::from_secs(12));
        let started = Instant::now();

        pacer.pace().await;

        assert_eq!(started.elapsed(), Duration::from_secs(12));
    }

    #[tokio::test(start_paused = true)]
    async fn elapsed_pacer_subtracts_time_already_spent() {
        let mut pacer = ElapsedIntervalPacer::new(Duration::from_secs(12));
        assert_eq!(pacer.remaining(Instant::now()), Duration::ZERO);

        pacer.record_request();
        tokio::time::advance(Duration::from_secs(5)).await;
        let started = Instant::now();

        pacer.pace().await;

        assert_eq!(started.elapsed(), Duration::from_secs(7));
    }
}
