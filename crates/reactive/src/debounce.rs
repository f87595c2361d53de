//! Debounced reactions to observable changes.
//!
//! [`watch_debounced`] spawns a background task that runs a reaction
//! once a watched value has been quiet for the policy's debounce
//! window, while capping how long a continuous burst of changes can
//! hold the reaction off.

use std::future::Future;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::policy::DebouncePolicy;

// ---------------------------------------------------------------------------
// watch_debounced
// ---------------------------------------------------------------------------

/// Spawn a background task that runs `on_settled` after changes to the
/// watched value settle.
///
/// Scheduling follows `policy`: each observed change (re)arms a
/// deadline one debounce window away, clamped so it never exceeds
/// `max_wait` past the first change of the burst. Only changes made
/// after this call count; the receiver's current value is treated as
/// already seen.
///
/// Reactions never overlap. The task awaits `on_settled` to completion
/// before watching again, so changes made while a reaction runs are
/// observed when it finishes and schedule a follow-up. The reaction
/// reads whatever state it closes over, which by then holds the latest
/// value.
///
/// The task exits when the returned [`DebouncedWatch`] is shut down or
/// every writer of the watched value is dropped; a pending reaction is
/// abandoned in both cases.
///
/// The policy is taken as given. Call
/// [`validate`](DebouncePolicy::validate) before constructing if you
/// want early validation.
pub fn watch_debounced<T, H, Fut>(
    mut rx: watch::Receiver<T>,
    policy: DebouncePolicy,
    mut on_settled: H,
) -> DebouncedWatch
where
    T: Send + Sync + 'static,
    H: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let cancel = CancellationToken::new();
    let task_cancel = cancel.clone();

    // Baseline taken now, not at the task's first poll: a write racing
    // the spawn must count as a change, not as already seen.
    rx.mark_unchanged();

    let handle = tokio::spawn(async move {
        // (fire_at, burst_cap): armed while a change awaits its reaction.
        let mut pending: Option<(Instant, Instant)> = None;

        loop {
            if let Some((fire_at, burst_cap)) = pending {
                tokio::select! {
                    () = task_cancel.cancelled() => break,
                    changed = rx.changed() => match changed {
                        Ok(()) => {
                            let fire_at = Instant::now() + policy.debounce;
                            pending = Some((fire_at.min(burst_cap), burst_cap));
                            trace!("change observed; reaction rescheduled");
                        }
                        Err(_) => break,
                    },
                    () = tokio::time::sleep_until(fire_at) => {
                        pending = None;
                        debug!("changes settled; running reaction");
                        tokio::select! {
                            () = task_cancel.cancelled() => break,
                            () = on_settled() => {}
                        }
                    }
                }
            } else {
                tokio::select! {
                    () = task_cancel.cancelled() => break,
                    changed = rx.changed() => match changed {
                        Ok(()) => {
                            let now = Instant::now();
                            pending = Some((now + policy.debounce, now + policy.max_wait));
                            trace!("change observed; reaction scheduled");
                        }
                        Err(_) => break,
                    },
                }
            }
        }

        debug!("debounced watch exited");
    });

    DebouncedWatch { cancel, handle }
}

// ---------------------------------------------------------------------------
// DebouncedWatch
// ---------------------------------------------------------------------------

/// Handle to a background task spawned by [`watch_debounced`].
///
/// Dropping the handle cancels the task, so a watch never outlives its
/// owner. Cancellation takes effect at the task's next await point and
/// also aborts a reaction that is mid-flight.
pub struct DebouncedWatch {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl DebouncedWatch {
    /// Cancel the background task.
    ///
    /// A pending or in-flight reaction is abandoned. Idempotent.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Whether the watch has been shut down.
    #[must_use]
    pub fn is_shut_down(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Wait for the background task to exit.
    ///
    /// Resolves after [`shutdown`](Self::shutdown), or once every
    /// writer of the watched value is gone. An `Err` carries a panic
    /// that escaped the reaction.
    pub async fn join(mut self) -> Result<(), tokio::task::JoinError> {
        (&mut self.handle).await
    }
}

impl Drop for DebouncedWatch {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl std::fmt::Debug for DebouncedWatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DebouncedWatch")
            .field("cancelled", &self.cancel.is_cancelled())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
