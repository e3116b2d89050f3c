//! Request-lifetime scoping.
//!
//! A view that fires dropdown or list fetches and never cancels them
//! leaks work past navigation: a slow response can arrive after the view
//! is gone and try to update state that no longer exists. Every spawned
//! request is therefore pinned to the owning view through a
//! [`FetchScope`]: when the scope drops, whatever is still in flight is
//! aborted.

use parking_lot::Mutex;
use std::future::Future;
use tokio::task::{AbortHandle, JoinHandle};

/// Owns the tasks a view spawns; aborts the stragglers on drop.
///
/// # Example
///
/// ```no_run
/// use garda_api::FetchScope;
///
/// async fn mount_report_screen() {
///     let scope = FetchScope::new();
///     scope.spawn(async {
///         // fetch dropdown options, update view state
///     });
///     // navigating away drops `scope`, aborting the fetch
/// }
/// ```
#[derive(Debug, Default)]
pub struct FetchScope {
    tasks: Mutex<Vec<AbortHandle>>,
}

impl FetchScope {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns a future tied to this scope.
    ///
    /// The returned handle can be awaited as usual. Once the scope drops,
    /// the task is aborted and the handle resolves to a cancellation
    /// error instead of a late result.
    pub fn spawn<F>(&self, future: F) -> JoinHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        let handle = tokio::spawn(future);
        self.tasks.lock().push(handle.abort_handle());
        handle
    }
}

impl Drop for FetchScope {
    fn drop(&mut self) {
        for task in self.tasks.lock().drain(..) {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn dropping_the_scope_aborts_pending_work() {
        let touched = Arc::new(AtomicBool::new(false));
        let scope = FetchScope::new();

        let flag = Arc::clone(&touched);
        let handle = scope.spawn(async move {
            std::future::pending::<()>().await;
            flag.store(true, Ordering::SeqCst);
        });

        drop(scope);

        let err = handle.await.expect_err("aborted task should not join cleanly");
        assert!(err.is_cancelled());
        assert!(!touched.load(Ordering::SeqCst), "stale update ran anyway");
    }

    #[tokio::test]
    async fn completed_work_is_unaffected() {
        let scope = FetchScope::new();
        let handle = scope.spawn(async { 41 + 1 });
        assert_eq!(handle.await.expect("task should complete"), 42);
        drop(scope);
    }

    #[tokio::test]
    async fn scope_owns_many_tasks() {
        let scope = FetchScope::new();
        let handles: Vec<_> = (0..5)
            .map(|_| scope.spawn(std::future::pending::<()>()))
            .collect();
        drop(scope);

        for handle in handles {
            let err = handle.await.expect_err("should be aborted");
            assert!(err.is_cancelled());
        }
    }
}
