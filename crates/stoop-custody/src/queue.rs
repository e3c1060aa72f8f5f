//! Strictly-sequential execution queue for crypto operations.
//!
//! A single worker task drains an unbounded channel one job at a time;
//! each job is fully awaited before the next begins, regardless of how
//! many tasks submit concurrently. This is true mutual exclusion, not
//! just ordered submission: serialization here is a correctness
//! requirement of the non-reentrant HSM session, throughput is secondary.
//!
//! Result delivery is per-job: every submission carries its own oneshot
//! channel, so an operation's error reaches only its submitter and the
//! drain loop keeps going. An abandoned caller (dropped future) does not
//! cancel its operation - once queued, a job always runs to completion,
//! since the underlying hardware call cannot safely be aborted.

use futures::future::BoxFuture;
use std::future::Future;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::error::{Error, Result};

type Job = Box<dyn FnOnce() -> BoxFuture<'static, ()> + Send>;

/// FIFO executor funneling all submitted operations through one worker.
///
/// Cheap to clone; all clones feed the same worker and therefore share
/// the same ordering and exclusion guarantees.
#[derive(Clone)]
pub struct SerialQueue {
    tx: mpsc::UnboundedSender<Job>,
}

impl SerialQueue {
    /// Spawn the worker and return a handle to its queue.
    ///
    /// Must be called within a tokio runtime. The worker exits once every
    /// handle is dropped and the backlog is drained.
    pub fn new() -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<Job>();
        tokio::spawn(async move {
            while let Some(job) = rx.recv().await {
                job().await;
            }
            debug!("crypto queue drained and closed");
        });
        Self { tx }
    }

    /// Append an operation and return a future resolving to its result.
    ///
    /// The operation starts only after all earlier submissions have fully
    /// completed, successfully or not. Dropping the returned future does
    /// not cancel the operation.
    pub fn submit<T, F, Fut>(&self, op: F) -> impl Future<Output = Result<T>>
    where
        T: Send + 'static,
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let (done_tx, done_rx) = oneshot::channel();
        let job: Job = Box::new(move || {
            Box::pin(async move {
                let result = op().await;
                // The submitter may have gone away; the work is done either way.
                let _ = done_tx.send(result);
            })
        });
        // Enqueue eagerly so the operation runs even if the caller never polls.
        let submitted = self.tx.send(job).is_ok();

        async move {
            if !submitted {
                return Err(Error::QueueClosed);
            }
            done_rx.await.unwrap_or(Err(Error::QueueClosed))
        }
    }
}

impl std::fmt::Debug for SerialQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialQueue").finish_non_exhaustive()
    }
}
