//! Scheduling of connection handlers.
//!
//! The listener hands every accepted connection to an [`Executor`]. The
//! protocol code does not care which one is in use.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;

pub trait Executor: Send + Sync + 'static {
    /// Schedules `task`. May wait before returning when the executor applies
    /// admission control, which in turn holds back the accept loop.
    fn execute<F>(&self, task: F) -> impl Future<Output = ()> + Send
    where
        F: Future<Output = ()> + Send + 'static;
}

/// One task per connection, no limit.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unbounded;

impl Executor for Unbounded {
    fn execute<F>(&self, task: F) -> impl Future<Output = ()> + Send
    where
        F: Future<Output = ()> + Send + 'static,
    {
        tokio::spawn(task);
        std::future::ready(())
    }
}

/// At most `limit` handlers run at once; further connections wait in the
/// accept backlog until a slot frees up.
#[derive(Debug, Clone)]
pub struct Bounded {
    permits: Arc<Semaphore>,
}

impl Bounded {
    pub fn new(limit: usize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(limit)),
        }
    }

    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }
}

impl Executor for Bounded {
    fn execute<F>(&self, task: F) -> impl Future<Output = ()> + Send
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let permits = self.permits.clone();
        async move {
            // The semaphore is never closed.
            let Ok(permit) = permits.acquire_owned().await else {
                return;
            };
            tokio::spawn(async move {
                task.await;
                drop(permit);
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn bounded_waits_for_free_slot() {
        let exec = Bounded::new(1);
        let (release_tx, release_rx) = oneshot::channel::<()>();

        exec.execute(async move {
            let _ = release_rx.await;
        })
        .await;
        assert_eq!(exec.available(), 0);

        let second = exec.execute(async {});
        tokio::pin!(second);
        assert!(
            tokio::time::timeout(Duration::from_millis(50), &mut second)
                .await
                .is_err()
        );

        release_tx.send(()).unwrap();
        tokio::time::timeout(Duration::from_secs(1), second).await.unwrap();
    }
}
