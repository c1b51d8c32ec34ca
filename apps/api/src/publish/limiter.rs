//! Rate limiting for sequential calls against external APIs.

use tokio::time::{sleep_until, Duration, Instant};

/// A single-permit leaky bucket: the first `acquire` resolves immediately,
/// each subsequent one no sooner than `interval` after the previous permit.
#[derive(Debug)]
pub struct RateLimiter {
    interval: Duration,
    next_permit: Option<Instant>,
}

impl RateLimiter {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_permit: None,
        }
    }

    /// Waits for the next permit.
    pub async fn acquire(&mut self) {
        if let Some(at) = self.next_permit {
            sleep_until(at).await;
        }
        self.next_permit = Some(Instant::now() + self.interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_first_acquire_is_immediate() {
        let mut limiter = RateLimiter::new(Duration::from_secs(1));
        let start = Instant::now();
        limiter.acquire().await;
        assert_eq!(Instant::now(), start);
    }

    #[tokio::test(start_paused = true)]
    async fn test_acquires_are_spaced_by_interval() {
        let mut limiter = RateLimiter::new(Duration::from_secs(1));
        let start = Instant::now();
        limiter.acquire().await;
        limiter.acquire().await;
        limiter.acquire().await;
        assert!(start.elapsed() >= Duration::from_secs(2));
        assert!(start.elapsed() < Duration::from_secs(3));
    }
}
