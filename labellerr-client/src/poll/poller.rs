//! Poll loop

use std::future::Future;
use std::pin::Pin;

use labellerr_core::Progress;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::time::{self, Duration, Instant};
use tracing::{debug, info, warn};

use super::handle::JobHandle;

/// Interval used when none is configured
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(2);

/// Boxed status-fetch future, for callers that need to name the fetch closure's type
pub type FetchFuture<T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'static>>;

type ValueHook<T> = Box<dyn FnOnce(&T) + Send>;
type ErrorHook<E> = Box<dyn FnOnce(&E) + Send>;

/// Timing limits of a poll loop
///
/// With neither `timeout` nor `max_retries` set the loop only ends on a
/// terminal status or a fetch error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollConfig {
    /// Pause between consecutive fetches; must be non-zero
    pub interval: Duration,
    /// Wall-clock budget measured from the start of the loop
    pub timeout: Option<Duration>,
    /// Cap on the number of fetch attempts
    pub max_retries: Option<u32>,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            timeout: None,
            max_retries: None,
        }
    }
}

impl PollConfig {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }
}

/// Why a poll loop ended without a successful result
#[derive(Debug, Error)]
pub enum PollError<E> {
    #[error("Poll interval must be greater than zero")]
    InvalidInterval,

    /// The status reached a terminal failure state
    #[error("Operation failed after {attempts} attempt(s): {reason}")]
    Failed { attempts: u32, reason: String },

    #[error("Timed out after {attempts} attempt(s) ({elapsed:?} elapsed)")]
    TimedOut { attempts: u32, elapsed: Duration },

    #[error("Gave up after {attempts} attempt(s) without reaching a terminal status")]
    RetriesExhausted { attempts: u32 },

    /// Fetching the status failed; the loop does not retry
    #[error("Status check failed on attempt {attempt}: {source}")]
    Fetch {
        attempt: u32,
        #[source]
        source: E,
    },

    /// The background task panicked or was cancelled
    #[error("Polling task aborted: {0}")]
    Aborted(String),
}

impl<E> PollError<E> {
    /// Number of fetch attempts made, when known
    pub fn attempts(&self) -> Option<u32> {
        match self {
            Self::Failed { attempts, .. }
            | Self::TimedOut { attempts, .. }
            | Self::RetriesExhausted { attempts } => Some(*attempts),
            Self::Fetch { attempt, .. } => Some(*attempt),
            Self::InvalidInterval | Self::Aborted(_) => None,
        }
    }

    pub fn is_timed_out(&self) -> bool {
        matches!(self, Self::TimedOut { .. })
    }

    pub fn is_retries_exhausted(&self) -> bool {
        matches!(self, Self::RetriesExhausted { .. })
    }

    /// The fetch error that ended the loop, if any
    pub fn fetch_error(&self) -> Option<&E> {
        match self {
            Self::Fetch { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Repeatedly fetches a status until `check` classifies it as terminal
///
/// ```no_run
/// # use labellerr_client::poll::{PollConfig, Poller};
/// # use labellerr_core::Progress;
/// # use std::time::Duration;
/// # async fn demo() {
/// let mut calls = 0;
/// let result = Poller::new(
///     move || {
///         calls += 1;
///         let value = calls;
///         async move { Ok::<_, std::io::Error>(value) }
///     },
///     |n: &i32| if *n >= 3 { Progress::Done } else { Progress::Pending },
/// )
/// .interval(Duration::from_millis(100))
/// .timeout(Duration::from_secs(5))
/// .run()
/// .await;
/// # }
/// ```
pub struct Poller<F, C, T, E> {
    fetch: F,
    check: C,
    config: PollConfig,
    on_success: Option<ValueHook<T>>,
    on_failure: Option<ValueHook<T>>,
    on_exception: Option<ErrorHook<E>>,
}

impl<F, Fut, C, T, E> Poller<F, C, T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    C: Fn(&T) -> Progress,
{
    pub fn new(fetch: F, check: C) -> Self {
        Self {
            fetch,
            check,
            config: PollConfig::default(),
            on_success: None,
            on_failure: None,
            on_exception: None,
        }
    }

    pub fn with_config(mut self, config: PollConfig) -> Self {
        self.config = config;
        self
    }

    pub fn interval(mut self, interval: Duration) -> Self {
        self.config.interval = interval;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.config.max_retries = Some(max_retries);
        self
    }

    /// Called once with the value that satisfied `check`
    pub fn on_success(mut self, hook: impl FnOnce(&T) + Send + 'static) -> Self {
        self.on_success = Some(Box::new(hook));
        self
    }

    /// Called once with the value `check` classified as failed
    pub fn on_failure(mut self, hook: impl FnOnce(&T) + Send + 'static) -> Self {
        self.on_failure = Some(Box::new(hook));
        self
    }

    /// Called once with the error that stopped the loop
    pub fn on_exception(mut self, hook: impl FnOnce(&E) + Send + 'static) -> Self {
        self.on_exception = Some(Box::new(hook));
        self
    }

    pub fn config(&self) -> &PollConfig {
        &self.config
    }

    /// Runs the loop to completion in the current task
    ///
    /// Each attempt fetches once and evaluates `check`. A pending status
    /// first counts against `max_retries`, then against `timeout`, and only
    /// then sleeps for `interval`, so no sleep follows the final attempt.
    /// The loop times out as soon as another `interval` would carry the next
    /// attempt past the deadline; it never sleeps beyond `timeout`.
    pub async fn run(mut self) -> Result<T, PollError<E>> {
        if self.config.interval.is_zero() {
            return Err(PollError::InvalidInterval);
        }

        let started = Instant::now();
        let mut attempts: u32 = 0;

        loop {
            attempts += 1;
            debug!("Polling status (attempt {})", attempts);

            let value = match (self.fetch)().await {
                Ok(value) => value,
                Err(err) => {
                    warn!("Status check failed on attempt {}", attempts);
                    if let Some(hook) = self.on_exception.take() {
                        hook(&err);
                    }
                    return Err(PollError::Fetch {
                        attempt: attempts,
                        source: err,
                    });
                }
            };

            match (self.check)(&value) {
                Progress::Done => {
                    info!(
                        "Operation completed after {} attempt(s) in {:?}",
                        attempts,
                        started.elapsed()
                    );
                    if let Some(hook) = self.on_success.take() {
                        hook(&value);
                    }
                    return Ok(value);
                }
                Progress::Failed(reason) => {
                    warn!("Operation failed after {} attempt(s): {}", attempts, reason);
                    if let Some(hook) = self.on_failure.take() {
                        hook(&value);
                    }
                    return Err(PollError::Failed { attempts, reason });
                }
                Progress::Pending => {}
            }

            if self.config.max_retries.is_some_and(|max| attempts >= max) {
                warn!("Giving up after {} attempt(s)", attempts);
                return Err(PollError::RetriesExhausted { attempts });
            }

            // The next attempt would start after the deadline.
            let elapsed = started.elapsed();
            if self
                .config
                .timeout
                .is_some_and(|timeout| elapsed + self.config.interval > timeout)
            {
                warn!("Timed out after {} attempt(s) ({:?})", attempts, elapsed);
                return Err(PollError::TimedOut { attempts, elapsed });
            }

            time::sleep(self.config.interval).await;
        }
    }
}

impl<F, Fut, C, T, E> Poller<F, C, T, E>
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    C: Fn(&T) -> Progress + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    /// Runs the loop on a background task
    ///
    /// Dropping the returned handle does not stop the task; it ends on its
    /// own once the loop terminates.
    pub fn spawn(self) -> JobHandle<T, E> {
        JobHandle::spawn(self.run())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn counting(
        done_at: u32,
    ) -> (
        Arc<AtomicU32>,
        impl FnMut() -> std::future::Ready<Result<u32, String>>,
    ) {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let fetch = move || {
            let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
            std::future::ready(Ok(n.min(done_at)))
        };
        (calls, fetch)
    }

    fn reached(target: u32) -> impl Fn(&u32) -> Progress {
        move |n| {
            if *n >= target {
                Progress::Done
            } else {
                Progress::Pending
            }
        }
    }

    #[test]
    fn test_default_config() {
        let config = PollConfig::default();
        assert_eq!(config.interval, Duration::from_secs(2));
        assert_eq!(config.timeout, None);
        assert_eq!(config.max_retries, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_interval_is_rejected_before_fetching() {
        let (calls, fetch) = counting(1);
        let result = Poller::new(fetch, reached(1))
            .interval(Duration::ZERO)
            .run()
            .await;

        assert!(matches!(result, Err(PollError::InvalidInterval)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_immediate_success_does_not_sleep() {
        let (calls, fetch) = counting(1);
        let started = Instant::now();
        let result = Poller::new(fetch, reached(1))
            .interval(Duration::from_secs(10))
            .run()
            .await;

        assert_eq!(result.unwrap(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_max_retries_counts_attempts() {
        let (calls, fetch) = counting(u32::MAX);
        let result = Poller::new(fetch, reached(u32::MAX))
            .interval(Duration::from_millis(10))
            .max_retries(4)
            .run()
            .await;

        assert!(matches!(result, Err(PollError::RetriesExhausted { attempts: 4 })));
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_never_sleeps_past_the_deadline() {
        let (calls, fetch) = counting(u32::MAX);
        let started = Instant::now();
        let result = Poller::new(fetch, reached(u32::MAX))
            .interval(Duration::from_secs(4))
            .timeout(Duration::from_secs(10))
            .run()
            .await;

        // Attempts at 0s, 4s and 8s; a fourth at 12s would miss the deadline.
        match result {
            Err(PollError::TimedOut { attempts, elapsed }) => {
                assert_eq!(attempts, 3);
                assert_eq!(elapsed, Duration::from_secs(8));
            }
            other => panic!("expected timeout, got {:?}", other),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(started.elapsed() <= Duration::from_secs(10));
    }

    #[test]
    fn test_timeout_and_exhaustion_are_distinct() {
        let timed_out: PollError<String> = PollError::TimedOut {
            attempts: 2,
            elapsed: Duration::from_secs(1),
        };
        let exhausted: PollError<String> = PollError::RetriesExhausted { attempts: 2 };

        assert!(timed_out.is_timed_out());
        assert!(!timed_out.is_retries_exhausted());
        assert!(exhausted.is_retries_exhausted());
        assert!(!exhausted.is_timed_out());
    }
}
