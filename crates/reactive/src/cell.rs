//! Observable state cells.
//!
//! Provides [`Observable`], a shared mutable cell backed by
//! `tokio::sync::watch`. Writers replace or mutate the value; readers
//! take snapshots or subscribe for change notification. A write that
//! leaves the value structurally equal to the current one notifies
//! nobody.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tracing::trace;

// ---------------------------------------------------------------------------
// Observable
// ---------------------------------------------------------------------------

/// A shared observable cell holding a single value.
///
/// Uses `tokio::sync::watch` under the hood, so subscribers conflate:
/// a receiver that misses intermediate values wakes once and sees only
/// the latest. Writes compare against the current value and skip
/// notification when nothing actually changed, which keeps downstream
/// reactions quiet during no-op updates.
///
/// Cloning the cell is cheap and every clone writes to the same value.
pub struct Observable<T> {
    tx: Arc<watch::Sender<T>>,
    version: Arc<AtomicU64>,
}

impl<T> Observable<T> {
    /// Create a cell holding `initial`.
    #[must_use]
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self {
            tx: Arc::new(tx),
            version: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Run `f` against the current value and return its result.
    ///
    /// The read lock is held only for the duration of `f`; do not
    /// block or await inside it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.tx.borrow())
    }

    /// Subscribe for change notification.
    ///
    /// The receiver starts with the current value already seen, so
    /// `changed()` resolves only for writes made after this call.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Monotone count of accepted writes.
    ///
    /// Starts at zero and increments once per write that actually
    /// changed the value. Reading the version and reading the value
    /// are two separate operations, so this is a cheap dirty check,
    /// not a synchronization primitive.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Relaxed)
    }
}

impl<T: Clone> Observable<T> {
    /// Take a snapshot of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }
}

impl<T: PartialEq> Observable<T> {
    /// Replace the value, notifying subscribers only if it changed.
    ///
    /// Returns true if the value changed.
    pub fn set(&self, value: T) -> bool {
        let changed = self.tx.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        });
        if changed {
            self.version.fetch_add(1, Ordering::Relaxed);
            trace!("observable value replaced");
        }
        changed
    }
}

impl<T: Clone + PartialEq> Observable<T> {
    /// Mutate the value in place, notifying subscribers only if the
    /// result differs from the current value.
    ///
    /// The mutation runs against a copy, so a mutation that ends up
    /// reproducing the current value (push then pop, say) notifies
    /// nobody.
    ///
    /// Returns true if the value changed.
    pub fn update(&self, f: impl FnOnce(&mut T)) -> bool {
        let changed = self.tx.send_if_modified(|current| {
            let mut next = current.clone();
            f(&mut next);
            if next == *current {
                false
            } else {
                *current = next;
                true
            }
        });
        if changed {
            self.version.fetch_add(1, Ordering::Relaxed);
            trace!("observable value mutated");
        }
        changed
    }
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            tx: Arc::clone(&self.tx),
            version: Arc::clone(&self.version),
        }
    }
}

impl<T: Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observable")
            .field("version", &self.version())
            .field("subscriber_count", &self.tx.receiver_count())
            .finish()
    }
}
