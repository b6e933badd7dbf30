// ── Trailing-edge debouncer ──
//
// Used for the email/phone availability checks that fire while the
// operator types. Each call waits out the delay; a newer call cancels any
// call still waiting, and the superseded caller gets `None`.

use std::future::Future;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::trace;

pub struct Debouncer {
    delay: Duration,
    current: Mutex<CancellationToken>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            current: Mutex::new(CancellationToken::new()),
        }
    }

    /// Wait out the delay, then run `f` unless a newer call arrived first.
    pub async fn run<F, Fut, T>(&self, f: F) -> Option<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let token = CancellationToken::new();
        {
            let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
            current.cancel();
            *current = token.clone();
        }

        tokio::select! {
            biased;
            () = token.cancelled() => {
                trace!("debounced call superseded");
                None
            }
            () = tokio::time::sleep(self.delay) => Some(f().await),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn newer_call_supersedes_pending_one() {
        let debouncer = Arc::new(Debouncer::new(Duration::from_millis(500)));
        let calls = Arc::new(AtomicUsize::new(0));

        let first = {
            let debouncer = Arc::clone(&debouncer);
            let calls = Arc::clone(&calls);
            tokio::spawn(async move {
                debouncer
                    .run(|| async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        "first"
                    })
                    .await
            })
        };
        tokio::time::sleep(Duration::from_millis(100)).await;

        let second = debouncer.run(|| async { "second" }).await;

        assert_eq!(second, Some("second"));
        assert_eq!(first.await.unwrap(), None);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn spaced_calls_both_run() {
        let debouncer = Debouncer::new(Duration::from_millis(500));
        assert_eq!(debouncer.run(|| async { 1 }).await, Some(1));
        assert_eq!(debouncer.run(|| async { 2 }).await, Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn waits_for_the_full_delay() {
        let debouncer = Debouncer::new(Duration::from_millis(500));
        let started = tokio::time::Instant::now();
        debouncer.run(|| async {}).await;
        assert!(started.elapsed() >= Duration::from_millis(500));
    }
}
