// research/backoff.rs
use crate::research::ResearchError;
use std::time::Duration;
use tracing::warn;

/// Added on top of a provider-suggested wait.
pub const SUGGESTED_WAIT_BUFFER: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            base_delay: Duration::from_secs(45),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// How long to wait after a failed attempt (0-based), or `None` if the
    /// error isn't worth retrying.
    pub fn delay_for(&self, attempt: u32, err: &ResearchError) -> Option<Duration> {
        let ResearchError::RateLimited {
            retry_after_secs, ..
        } = err
        else {
            return None;
        };

        // A suggestion too large (or odd) to be a Duration falls back to
        // exponential backoff.
        let suggested =
            (*retry_after_secs).and_then(|secs| Duration::try_from_secs_f64(secs).ok());

        match suggested {
            Some(wait) => Some(wait.saturating_add(SUGGESTED_WAIT_BUFFER)),
            None => {
                let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
                Some(self.base_delay.saturating_mul(factor))
            }
        }
    }
}

/// Blocks the calling thread between attempts.
pub trait Sleeper: Send + Sync {
    fn sleep(&self, duration: Duration);
}

pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Run `operation`, retrying rate-limited failures with backoff.
///
/// Only [`ResearchError::RateLimited`] is retried. Anything else, or the last
/// rate limit once the budget is spent, comes back unchanged.
pub fn invoke<T, F>(
    policy: &RetryPolicy,
    sleeper: &dyn Sleeper,
    progress: &mut dyn FnMut(&str),
    mut operation: F,
) -> Result<T, ResearchError>
where
    F: FnMut() -> Result<T, ResearchError>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0u32;

    loop {
        progress(&format!(
            "⚙️ Processing analysis (Attempt {}/{max_attempts})...",
            attempt + 1
        ));

        let err = match operation() {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        let remaining = attempt + 1 < max_attempts;
        let delay = match policy.delay_for(attempt, &err) {
            Some(delay) if remaining => delay,
            _ => return Err(err),
        };

        warn!(
            attempt = attempt + 1,
            max_attempts,
            wait_secs = delay.as_secs_f64(),
            "rate limited, backing off"
        );
        progress(&format!(
            "⏳ Rate limit hit. Waiting {}s before retry {}/{max_attempts}...",
            delay.as_secs(),
            attempt + 2
        ));

        sleeper.sleep(delay);
        attempt += 1;
    }
}
