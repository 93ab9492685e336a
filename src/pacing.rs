//! Politeness delay between addresses.

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Pauses between outbound request bursts.
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self);
}

/// Sleeps for a duration drawn uniformly from `[min_ms, max_ms]`.
#[derive(Debug, Clone, Copy)]
pub struct RandomDelay {
    min_ms: u64,
    max_ms: u64,
}

impl RandomDelay {
    /// Creates a delay range; bounds given backwards are swapped.
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        if min_ms <= max_ms {
            Self { min_ms, max_ms }
        } else {
            Self { min_ms: max_ms, max_ms: min_ms }
        }
    }

    /// Picks the next delay.
    pub fn sample(&self) -> Duration {
        if self.max_ms == 0 {
            return Duration::ZERO;
        }

        Duration::from_millis(rand::random_range(self.min_ms..=self.max_ms))
    }
}

#[async_trait]
impl Pacer for RandomDelay {
    async fn pause(&self) {
        let delay = self.sample();
        if delay.is_zero() {
            return;
        }

        debug!("Delaying {}ms", delay.as_millis());
        tokio::time::sleep(delay).await;
    }
}

/// When the orchestrator pauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelayPolicy {
    /// Only between addresses
    Between,
    /// Between addresses and after the last one
    Always,
}

impl DelayPolicy {
    pub fn from_trailing(trailing: bool) -> Self {
        if trailing {
            DelayPolicy::Always
        } else {
            DelayPolicy::Between
        }
    }

    /// Whether to pause after the address at `index` (0-based) of `total`.
    pub fn pause_after(&self, index: usize, total: usize) -> bool {
        match self {
            DelayPolicy::Always => true,
            DelayPolicy::Between => index + 1 < total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_within_bounds() {
        let delay = RandomDelay::new(2000, 4000);
        for _ in 0..100 {
            let ms = delay.sample().as_millis();
            assert!((2000..=4000).contains(&ms), "{ms} out of range");
        }
    }

    #[test]
    fn test_sample_fixed() {
        assert_eq!(RandomDelay::new(50, 50).sample(), Duration::from_millis(50));
    }

    #[test]
    fn test_sample_zero() {
        assert_eq!(RandomDelay::new(0, 0).sample(), Duration::ZERO);
    }

    #[test]
    fn test_bounds_swapped() {
        let delay = RandomDelay::new(300, 100);
        for _ in 0..20 {
            let ms = delay.sample().as_millis();
            assert!((100..=300).contains(&ms));
        }
    }

    #[tokio::test]
    async fn test_zero_pause_returns() {
        RandomDelay::new(0, 0).pause().await;
    }

    #[test]
    fn test_policy_between() {
        let policy = DelayPolicy::from_trailing(false);
        assert_eq!(policy, DelayPolicy::Between);
        assert!(policy.pause_after(0, 2));
        assert!(!policy.pause_after(1, 2));
        assert!(!policy.pause_after(0, 1));
    }

    #[test]
    fn test_policy_always() {
        let policy = DelayPolicy::from_trailing(true);
        assert_eq!(policy, DelayPolicy::Always);
        assert!(policy.pause_after(0, 2));
        assert!(policy.pause_after(1, 2));
    }
}
