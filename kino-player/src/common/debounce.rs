//! Trailing-edge debounce on top of Tokio timers.
//!
//! Each [`TrailingDebounce::call`] replaces the pending timer, so only the
//! last value of a burst reaches the sink, one full window after the burst
//! went quiet.

use std::{fmt, sync::Arc, time::Duration};
use tokio::task::JoinHandle;

type Sink<T> = Arc<dyn Fn(T) + Send + Sync>;

/// Build a [`TrailingDebounce`] that delivers to `f` after `window` of quiet.
pub fn debounce<T, F>(window: Duration, f: F) -> TrailingDebounce<T>
where
    T: Send + 'static,
    F: Fn(T) + Send + Sync + 'static,
{
    TrailingDebounce {
        window,
        sink: Arc::new(f),
        pending: None,
    }
}

/// A single cancellable timer slot.
///
/// Scheduling requires a Tokio runtime. Dropping the debounce cancels
/// whatever is pending.
pub struct TrailingDebounce<T> {
    window: Duration,
    sink: Sink<T>,
    pending: Option<JoinHandle<()>>,
}

impl<T> fmt::Debug for TrailingDebounce<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrailingDebounce")
            .field("window", &self.window)
            .field("pending", &self.is_pending())
            .finish()
    }
}

impl<T: Send + 'static> TrailingDebounce<T> {
    /// Cancel any pending delivery and schedule `value` one window from now.
    pub fn call(&mut self, value: T) {
        self.cancel();

        let sink = Arc::clone(&self.sink);
        let window = self.window;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            sink(value);
        }));
    }
}

impl<T> TrailingDebounce<T> {
    /// Drop the pending delivery. Returns whether one was still waiting.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) => {
                let was_waiting = !handle.is_finished();
                handle.abort();
                was_waiting
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}

impl<T> Drop for TrailingDebounce<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}
