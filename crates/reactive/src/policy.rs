//! Debounce policy for background reactions.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Quiet period applied after each change. Default for [`DebouncePolicy`].
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Upper bound on reaction delay during a busy burst. Default for
/// [`DebouncePolicy`].
pub const DEFAULT_MAX_WAIT: Duration = Duration::from_millis(500);

// ---------------------------------------------------------------------------
// DebouncePolicy
// ---------------------------------------------------------------------------

/// Policy controlling when a debounced reaction fires.
///
/// After each change the reaction waits for `debounce` of quiet before
/// running. A burst of changes keeps pushing the deadline out, but
/// never past `max_wait` measured from the first change of the burst,
/// so continuous editing still produces a reaction at a bounded rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebouncePolicy {
    /// Quiet period after the last change before the reaction runs.
    /// Default: 300ms
    pub debounce: Duration,
    /// Longest a burst of changes may delay the reaction. Default: 500ms
    pub max_wait: Duration,
}

impl Default for DebouncePolicy {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            max_wait: DEFAULT_MAX_WAIT,
        }
    }
}

impl DebouncePolicy {
    /// Create a policy with explicit windows.
    #[must_use]
    pub fn new(debounce: Duration, max_wait: Duration) -> Self {
        Self { debounce, max_wait }
    }

    /// Validate the policy, returning an error if any window is out of
    /// range.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.debounce.is_zero() {
            return Err(PolicyError::ZeroDebounce);
        }
        if self.max_wait.is_zero() {
            return Err(PolicyError::ZeroMaxWait);
        }
        if self.max_wait < self.debounce {
            return Err(PolicyError::MaxWaitTooShort {
                debounce: self.debounce,
                max_wait: self.max_wait,
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// PolicyError
// ---------------------------------------------------------------------------

/// A [`DebouncePolicy`] that cannot drive a reaction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PolicyError {
    /// The debounce window is zero.
    #[error("debounce must be greater than zero")]
    ZeroDebounce,

    /// The burst cap is zero.
    #[error("max_wait must be greater than zero")]
    ZeroMaxWait,

    /// The burst cap undercuts the quiet period, which would make the
    /// cap fire before a single quiet period can even elapse.
    #[error("max_wait ({max_wait:?}) must not be shorter than debounce ({debounce:?})")]
    MaxWaitTooShort {
        /// The configured quiet period.
        debounce: Duration,
        /// The configured burst cap.
        max_wait: Duration,
    },
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
