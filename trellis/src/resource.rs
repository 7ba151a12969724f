//! State of an asynchronous load.
//!
//! Tables show a loading state while their data is in flight. [`Resource`]
//! tracks that fetch so it can end in either data or a failure, instead of
//! assuming success.

use std::future::Future;
use std::io;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use log::{debug, warn};
use thiserror::Error;

/// Why a load failed, as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ResourceError {
    pub message: String,
}

impl ResourceError {
    pub fn new(message: impl Into<String>) -> Self {
        ResourceError {
            message: message.into(),
        }
    }
}

impl From<io::Error> for ResourceError {
    fn from(err: io::Error) -> Self {
        ResourceError::new(format!("I/O error: {}", err))
    }
}

impl From<String> for ResourceError {
    fn from(message: String) -> Self {
        ResourceError { message }
    }
}

impl From<&str> for ResourceError {
    fn from(message: &str) -> Self {
        ResourceError::new(message)
    }
}

/// Where a load currently stands.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ResourceState<T> {
    /// Nothing requested yet.
    #[default]
    Idle,
    Loading,
    Ready(T),
    Error(ResourceError),
}

impl<T> ResourceState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ResourceState::Loading)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ResourceState::Error(_))
    }

    /// The loaded value, if the load succeeded.
    pub fn ready(&self) -> Option<&T> {
        if let ResourceState::Ready(value) = self {
            Some(value)
        } else {
            None
        }
    }

    /// The failure, if the load failed.
    pub fn error(&self) -> Option<&ResourceError> {
        if let ResourceState::Error(err) = self {
            Some(err)
        } else {
            None
        }
    }
}

/// Shared handle to a [`ResourceState`].
///
/// Clones share the same state, so a task can drive the load while the
/// page reads it. Only the most recent [`load`](Self::load) may publish its
/// outcome; a slower, older fetch finishing late is discarded.
///
/// ```ignore
/// let users: Resource<Vec<User>> = Resource::new();
/// users
///     .load(async {
///         tokio::time::sleep(Duration::from_millis(500)).await;
///         Ok::<_, ResourceError>(mock_users())
///     })
///     .await;
/// table.apply_resource(&users.get());
/// ```
#[derive(Debug)]
pub struct Resource<T> {
    state: Arc<RwLock<ResourceState<T>>>,
    /// Bumped by every `load` and `reset`; stale fetches compare against it.
    generation: Arc<AtomicU64>,
    /// Dirty flag for re-render.
    dirty: Arc<AtomicBool>,
}

impl<T> Resource<T> {
    pub fn new() -> Self {
        Resource {
            state: Arc::new(RwLock::new(ResourceState::Idle)),
            generation: Arc::new(AtomicU64::new(0)),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Snapshot of the current state.
    pub fn get(&self) -> ResourceState<T>
    where
        T: Clone,
    {
        match self.state.read() {
            Ok(state) => state.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().is_ok_and(|state| state.is_loading())
    }

    /// Publish `next` if no newer load or reset has happened since
    /// `generation` was taken. Returns false if the update was dropped.
    fn publish(&self, generation: u64, next: ResourceState<T>) -> bool {
        let Ok(mut state) = self.state.write() else {
            return false;
        };
        if self.generation.load(Ordering::SeqCst) != generation {
            return false;
        }
        *state = next;
        self.dirty.store(true, Ordering::SeqCst);
        true
    }

    fn begin(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Back to idle. A load still in flight will not publish its result.
    pub fn reset(&self) {
        let generation = self.begin();
        self.publish(generation, ResourceState::Idle);
    }

    /// Run `fetch`, moving through loading to ready or error.
    pub async fn load<F, E>(&self, fetch: F)
    where
        F: Future<Output = Result<T, E>>,
        E: Into<ResourceError>,
    {
        let generation = self.begin();
        self.publish(generation, ResourceState::Loading);
        debug!("Resource load {} started", generation);

        let next = match fetch.await {
            Ok(value) => ResourceState::Ready(value),
            Err(err) => {
                let err = err.into();
                warn!("Resource load {} failed: {}", generation, err);
                ResourceState::Error(err)
            }
        };

        if !self.publish(generation, next) {
            debug!("Resource load {} superseded, result dropped", generation);
        }
    }

    /// Check if the state changed since the last `clear_dirty`.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl<T> Default for Resource<T> {
    fn default() -> Self {
        Resource::new()
    }
}

impl<T> Clone for Resource<T> {
    fn clone(&self) -> Self {
        Resource {
            state: Arc::clone(&self.state),
            generation: Arc::clone(&self.generation),
            dirty: Arc::clone(&self.dirty),
        }
    }
}
