//! Requests the front end has started but not yet seen finish.

use tokio::task::{JoinError, JoinSet};
use tracing::{debug, error};

/// Owns every in-flight request so none is dropped when the input loop ends.
#[derive(Debug, Default)]
pub struct InFlight {
    tasks: JoinSet<()>,
}

impl InFlight {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `request` on its own task and keep its handle.
    pub fn track<F>(&mut self, request: F)
    where
        F: Future + Send + 'static,
        F::Output: Send,
    {
        self.tasks.spawn(async move {
            request.await;
        });
    }

    /// Collect tasks that have already finished. Never waits.
    ///
    /// Returns how many were collected.
    pub fn reap(&mut self) -> usize {
        let mut reaped = 0;
        while let Some(result) = self.tasks.try_join_next() {
            log_join(result);
            reaped += 1;
        }
        reaped
    }

    /// Wait for every outstanding task.
    pub async fn drain(&mut self) {
        if !self.tasks.is_empty() {
            debug!(name: "requests.drain", pending = self.tasks.len(), "Waiting for in-flight requests");
        }
        while let Some(result) = self.tasks.join_next().await {
            log_join(result);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

fn log_join(result: Result<(), JoinError>) {
    if let Err(e) = result {
        error!(name: "request.task.failed", error = %e, panicked = e.is_panic(), "Request task did not complete");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn test_drain_waits_for_slow_tasks() {
        let done = Arc::new(AtomicUsize::new(0));
        let mut inflight = InFlight::new();

        for delay in [30, 10, 20] {
            let done = Arc::clone(&done);
            inflight.track(async move {
                tokio::time::sleep(Duration::from_millis(delay)).await;
                done.fetch_add(1, Ordering::SeqCst);
            });
        }
        assert_eq!(inflight.len(), 3);

        inflight.drain().await;

        assert_eq!(done.load(Ordering::SeqCst), 3);
        assert!(inflight.is_empty());
    }

    #[tokio::test]
    async fn test_reap_only_collects_finished_tasks() {
        let mut inflight = InFlight::new();
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();

        inflight.track(async {});
        inflight.track(async move {
            let _ = rx.await;
        });

        // Let the first task run to completion.
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(inflight.reap(), 1);
        assert_eq!(inflight.len(), 1);

        tx.send(()).unwrap();
        inflight.drain().await;
        assert!(inflight.is_empty());
    }

    #[tokio::test]
    async fn test_panicking_task_does_not_stop_drain() {
        let mut inflight = InFlight::new();
        inflight.track(async {
            panic!("boom");
        });
        inflight.track(async {});

        inflight.drain().await;
        assert!(inflight.is_empty());
    }
}
