//! Handle to a poll loop running on a background task

use std::future::Future;

use tokio::sync::OnceCell;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::{self, Duration};

use super::poller::PollError;

/// Handle to a spawned poll loop
///
/// The outcome is captured the first time it is observed and every later
/// call to [`JobHandle::result`] returns the same value.
pub struct JobHandle<T, E> {
    task: JoinHandle<Result<T, PollError<E>>>,
    outcome: OnceCell<Result<T, PollError<E>>>,
}

impl<T, E> JobHandle<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    pub(crate) fn spawn<Fut>(future: Fut) -> Self
    where
        Fut: Future<Output = Result<T, PollError<E>>> + Send + 'static,
    {
        Self {
            task: tokio::spawn(future),
            outcome: OnceCell::new(),
        }
    }
}

impl<T, E> JobHandle<T, E> {
    /// Waits for the loop to finish and returns its outcome
    ///
    /// Cancel-safe: dropping the returned future before it resolves leaves
    /// the handle unchanged.
    pub async fn result(&mut self) -> Result<&T, &PollError<E>> {
        let task = &mut self.task;
        self.outcome
            .get_or_init(|| async move { joined(task.await) })
            .await
            .as_ref()
    }

    /// Like [`JobHandle::result`], but gives up after `wait`
    ///
    /// `None` means the loop is still running; the handle stays usable.
    pub async fn result_timeout(&mut self, wait: Duration) -> Option<Result<&T, &PollError<E>>> {
        time::timeout(wait, self.result()).await.ok()
    }

    /// Whether the outcome is available without waiting
    pub fn is_finished(&self) -> bool {
        self.outcome.initialized() || self.task.is_finished()
    }

    /// Waits for the loop and takes ownership of its outcome
    pub async fn into_result(self) -> Result<T, PollError<E>> {
        let Self { task, outcome } = self;
        match outcome.into_inner() {
            Some(outcome) => outcome,
            None => joined(task.await),
        }
    }
}

impl<T, E> std::fmt::Debug for JobHandle<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobHandle")
            .field("finished", &self.is_finished())
            .finish_non_exhaustive()
    }
}

fn joined<T, E>(result: Result<Result<T, PollError<E>>, JoinError>) -> Result<T, PollError<E>> {
    result.unwrap_or_else(|err| Err(PollError::Aborted(err.to_string())))
}
