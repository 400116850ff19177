//! Debounce and throttle wrappers
//!
//! Both wrap a callback taking a single argument value; use a tuple for
//! several arguments. Whatever the callback needs from its surroundings it
//! captures, which is how the "calling context" travels with it.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;

type Callback<A> = Box<dyn Fn(A) + Send + Sync>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct DebounceInner<A> {
    callback: Callback<A>,
    wait: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

/// Runs the callback once calls have stopped for `wait`, with the arguments
/// of the last call.
///
/// Scheduling spawns onto the current tokio runtime; [`Debounce::call`]
/// outside one drops the call and returns `false`.
pub struct Debounce<A> {
    inner: Arc<DebounceInner<A>>,
}

impl<A> Clone for Debounce<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A: Send + 'static> Debounce<A> {
    pub fn new<F>(wait: Duration, callback: F) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(DebounceInner {
                callback: Box::new(callback),
                wait,
                pending: Mutex::new(None),
            }),
        }
    }

    /// Cancel any pending run and schedule a new one after `wait`.
    /// Returns `false` when no tokio runtime is available to schedule on.
    pub fn call(&self, args: A) -> bool {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            log::warn!("Debounced call dropped: no tokio runtime");
            return false;
        };

        let mut pending = lock(&self.inner.pending);
        if let Some(handle) = pending.take() {
            handle.abort();
        }

        let inner = Arc::clone(&self.inner);
        *pending = Some(runtime.spawn(async move {
            tokio::time::sleep(inner.wait).await;
            (inner.callback)(args);
        }));
        true
    }

    /// Drop the pending run, if any
    pub fn cancel(&self) {
        if let Some(handle) = lock(&self.inner.pending).take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        lock(&self.inner.pending)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn wait(&self) -> Duration {
        self.inner.wait
    }
}

/// Runs the callback at most once per `limit`.
///
/// The first call in a window runs immediately; later calls inside the
/// window are dropped.
pub struct Throttle<A> {
    callback: Callback<A>,
    limit: Duration,
    busy_until: Mutex<Option<Instant>>,
}

impl<A> Throttle<A> {
    pub fn new<F>(limit: Duration, callback: F) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self {
            callback: Box::new(callback),
            limit,
            busy_until: Mutex::new(None),
        }
    }

    /// Returns `true` when the callback ran
    pub fn call(&self, args: A) -> bool {
        let now = Instant::now();
        {
            let mut busy_until = lock(&self.busy_until);
            if busy_until.is_some_and(|until| now < until) {
                return false;
            }
            *busy_until = Some(now + self.limit);
        }

        (self.callback)(args);
        true
    }

    pub fn is_busy(&self) -> bool {
        lock(&self.busy_until).is_some_and(|until| Instant::now() < until)
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }
}
