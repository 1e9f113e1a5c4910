use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use tokio::sync::watch;

/// Signals dependent views to re-fetch. The token is an opaque timestamp;
/// the only contract is "changed means refetch".
///
/// `refreshing` follows the lifecycle of the future passed to `run`, so the
/// pull-to-refresh indicator cannot disappear while the fetch it announced
/// is still in flight.
pub struct RefreshCoordinator {
    trigger_tx: watch::Sender<i64>,
    refreshing: AtomicBool,
    last_token: Mutex<i64>,
}

impl Default for RefreshCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl RefreshCoordinator {
    pub fn new() -> Self {
        let (trigger_tx, _) = watch::channel(0);
        Self {
            trigger_tx,
            refreshing: AtomicBool::new(false),
            last_token: Mutex::new(0),
        }
    }

    /// Receiver side for views keyed on the trigger.
    pub fn subscribe(&self) -> watch::Receiver<i64> {
        self.trigger_tx.subscribe()
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing.load(Ordering::SeqCst)
    }

    /// Bump the trigger. Strictly monotonic even for back-to-back calls
    /// within one clock tick; equal tokens would look like "no change" to
    /// subscribers.
    pub fn trigger(&self) -> i64 {
        let mut last = self.last_token.lock();
        let now = chrono::Utc::now().timestamp_millis();
        let token = now.max(*last + 1);
        *last = token;
        let _ = self.trigger_tx.send(token);
        token
    }

    /// Run one refresh cycle: raise `refreshing`, bump the trigger, await
    /// the actual fetch, and lower `refreshing` whatever the outcome.
    pub async fn run<F, T>(&self, fut: F) -> T
    where
        F: Future<Output = T>,
    {
        self.refreshing.store(true, Ordering::SeqCst);
        self.trigger();
        let out = fut.await;
        self.refreshing.store(false, Ordering::SeqCst);
        out
    }
}
