use std::time::Duration;

use tracing::debug;

use crate::travel_time_oracle::RouteUnavailable;

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Extra attempts after the first one. Zero disables retrying.
    pub max_retries: u32,
    pub initial_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_retries: 1,
            initial_backoff: Duration::from_millis(250),
        }
    }
}

impl RetryPolicy {
    pub fn none() -> Self {
        RetryPolicy {
            max_retries: 0,
            initial_backoff: Duration::ZERO,
        }
    }

    pub fn backoff(&self, retry: u32) -> Duration {
        let factor = 1u32.checked_shl(retry).unwrap_or(u32::MAX);
        self.initial_backoff.saturating_mul(factor)
    }

    /// Runs `query` until it succeeds, fails permanently, or retries run out.
    /// Only use it for idempotent requests.
    pub async fn run<T, F, Fut>(&self, mut query: F) -> Result<T, RouteUnavailable>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, RouteUnavailable>>,
    {
        let mut retry = 0;
        loop {
            match query().await {
                Ok(value) => return Ok(value),
                Err(error) if error.is_transient() && retry < self.max_retries => {
                    let backoff = self.backoff(retry);
                    debug!(
                        "Transient routing failure, retrying in {:?} ({}/{}): {}",
                        backoff,
                        retry + 1,
                        self.max_retries,
                        error
                    );
                    tokio::time::sleep(backoff).await;
                    retry += 1;
                }
                Err(error) => return Err(error),
            }
        }
    }
}
