//! Status polling
//!
//! Long-running platform operations (dataset processing, exports,
//! pre-annotation imports) are tracked by repeatedly fetching a status and
//! classifying it with a [`Progress`](labellerr_core::Progress) predicate.
//! [`Poller`] runs that loop in the caller's task; [`Poller::spawn`] moves it
//! onto a tokio task and returns a [`JobHandle`].

mod handle;
mod poller;

pub use handle::JobHandle;
pub use poller::{DEFAULT_INTERVAL, FetchFuture, PollConfig, PollError, Poller};
