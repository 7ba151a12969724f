//! Delay-and-coalesce wrappers for callbacks and values.
//!
//! A [`Debouncer`] delivers only the last value of a burst, `delay` after the
//! last call. Every call pushes the deadline back. Pending deliveries run as
//! tokio tasks guarded by a [`CancellationToken`]; cancelling the debouncer
//! (or dropping it) suppresses anything still waiting.
//!
//! ```ignore
//! let notify = Debouncer::new(Duration::from_millis(150), |rows: Vec<User>| {
//!     println!("{} rows selected", rows.len());
//! });
//!
//! notify.call(vec![alice])?;
//! notify.call(vec![alice, bob])?; // only this one is delivered
//! ```

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use log::{debug, trace};
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::time::{Instant, sleep_until};
use tokio_util::sync::CancellationToken;

/// Errors returned when scheduling a debounced delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DebounceError {
    /// `call` was made outside a tokio runtime, so no timer can be armed.
    #[error("debounced call made outside a tokio runtime")]
    NoRuntime,
    /// The debouncer was torn down.
    #[error("debouncer has been cancelled")]
    Cancelled,
}

type Callback<T> = Arc<dyn Fn(T) + Send + Sync>;

/// Debounced callback with a fixed quiet period.
pub struct Debouncer<T> {
    delay: Duration,
    callback: Callback<T>,
    /// Parent token; cancelled on teardown.
    owner: CancellationToken,
    /// Token of the burst currently waiting to be delivered.
    pending: Mutex<Option<CancellationToken>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Create a debouncer that invokes `callback` after `delay` of quiet.
    pub fn new<F>(delay: Duration, callback: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        Self {
            delay,
            callback: Arc::new(callback),
            owner: CancellationToken::new(),
            pending: Mutex::new(None),
        }
    }

    /// The configured quiet period.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `value` for delivery, replacing any value still pending.
    pub fn call(&self, value: T) -> Result<(), DebounceError> {
        if self.owner.is_cancelled() {
            return Err(DebounceError::Cancelled);
        }
        let handle = Handle::try_current().map_err(|_| DebounceError::NoRuntime)?;

        let burst = self.owner.child_token();
        {
            let mut pending = self.pending.lock().unwrap_or_else(|p| p.into_inner());
            if let Some(previous) = pending.replace(burst.clone()) {
                previous.cancel();
            }
        }

        let deadline = Instant::now() + self.delay;
        let callback = Arc::clone(&self.callback);
        trace!("Debounced call armed for {:?}", self.delay);

        handle.spawn(async move {
            tokio::select! {
                biased;
                _ = burst.cancelled() => {}
                _ = sleep_until(deadline) => {
                    callback(value);
                    // Marks the burst as no longer pending.
                    burst.cancel();
                }
            }
        });

        Ok(())
    }

    /// Whether a delivery is waiting for its quiet period to end.
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .map(|guard| guard.as_ref().is_some_and(|t| !t.is_cancelled()))
            .unwrap_or(false)
    }

    /// Drop the pending delivery without tearing the debouncer down.
    /// Returns true if something was pending.
    pub fn cancel_pending(&self) -> bool {
        let mut pending = self.pending.lock().unwrap_or_else(|p| p.into_inner());
        match pending.take() {
            Some(token) if !token.is_cancelled() => {
                token.cancel();
                true
            }
            _ => false,
        }
    }
}

impl<T> Debouncer<T> {
    /// Tear the debouncer down.
    ///
    /// Suppresses any pending delivery and rejects later calls. Returns false
    /// if it was already cancelled.
    pub fn cancel(&self) -> bool {
        if self.owner.is_cancelled() {
            return false;
        }
        self.owner.cancel();
        debug!("Debouncer cancelled");
        true
    }

    pub fn is_cancelled(&self) -> bool {
        self.owner.is_cancelled()
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.owner.cancel();
    }
}

impl<T> fmt::Debug for Debouncer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.delay)
            .field("cancelled", &self.owner.is_cancelled())
            .finish_non_exhaustive()
    }
}

/// A value whose changes become visible after a quiet period.
///
/// `set` records the latest value immediately; `get` returns the settled
/// value, which catches up once `set` has not been called for `delay`.
#[derive(Debug)]
pub struct DebouncedValue<T> {
    latest: Arc<RwLock<T>>,
    settled: Arc<RwLock<T>>,
    /// Set whenever the settled value changes.
    dirty: Arc<AtomicBool>,
    debouncer: Debouncer<T>,
}

impl<T: Clone + Send + Sync + 'static> DebouncedValue<T> {
    /// Create a debounced value starting settled at `initial`.
    pub fn new(initial: T, delay: Duration) -> Self {
        let settled = Arc::new(RwLock::new(initial.clone()));
        let dirty = Arc::new(AtomicBool::new(false));

        let settled_for_task = Arc::clone(&settled);
        let dirty_for_task = Arc::clone(&dirty);
        let debouncer = Debouncer::new(delay, move |value: T| {
            if let Ok(mut guard) = settled_for_task.write() {
                *guard = value;
                dirty_for_task.store(true, Ordering::SeqCst);
            }
        });

        Self {
            latest: Arc::new(RwLock::new(initial)),
            settled,
            dirty,
            debouncer,
        }
    }

    /// Record a new value; it settles after the quiet period.
    pub fn set(&self, value: T) -> Result<(), DebounceError> {
        if let Ok(mut guard) = self.latest.write() {
            *guard = value.clone();
        }
        self.debouncer.call(value)
    }

    /// The most recent value passed to `set`.
    pub fn latest(&self) -> T {
        self.latest
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// The settled value.
    pub fn get(&self) -> T {
        self.settled
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Whether a newer value is still waiting to settle.
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Check if the settled value changed since the last `clear_dirty`.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }

    /// Stop settling; the settled value stays where it is.
    pub fn cancel(&self) -> bool {
        self.debouncer.cancel()
    }
}
