// SPDX-License-Identifier: Apache-2.0

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Settle time for the free-text name input.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(700);

/// Delays an action until the input has been quiet for `delay`. Each submit
/// aborts the previously scheduled task, so only the last value commits.
pub struct Debouncer<T: Send + 'static> {
    delay: Duration,
    action: Arc<dyn Fn(T) + Send + Sync>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(delay: Duration, action: impl Fn(T) + Send + Sync + 'static) -> Self {
        Self {
            delay,
            action: Arc::new(action),
            pending: Mutex::new(None),
        }
    }

    /// Schedules `value`; any not-yet-fired value is dropped.
    pub fn submit(&self, value: T) {
        let action = Arc::clone(&self.action);
        let delay = self.delay;
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action(value);
        });
        let mut pending = self.lock_pending();
        if let Some(previous) = pending.replace(task) {
            previous.abort();
        }
    }

    /// Drops whatever is scheduled without firing it.
    pub fn cancel(&self) {
        if let Some(task) = self.lock_pending().take() {
            task.abort();
        }
    }

    fn lock_pending(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Send + 'static> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}
