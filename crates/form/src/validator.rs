//! Debounced form validation against a schema engine.
//!
//! [`FormValidator`] owns three observables — the editable values, the
//! per-field issues, and a validity flag — and keeps the latter two in
//! step with the former. A background reaction revalidates after edits
//! settle; [`validate`](FormValidator::validate) runs a pass on
//! demand.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::debug;

use formwatch_reactive::{
    DebouncePolicy, DebouncedWatch, Observable, PolicyError, watch_debounced,
};
use formwatch_schema::{FieldIssues, Schema};

use crate::report::ValidationReport;

// ---------------------------------------------------------------------------
// Cells
// ---------------------------------------------------------------------------

/// The observable state of one form, shared between the validator and
/// its background reaction.
struct Cells<T> {
    values: Observable<T>,
    errors: Observable<FieldIssues>,
    valid: Observable<bool>,
    /// Serializes result application so one pass's issues and validity
    /// always land together, even when passes race.
    apply_lock: Mutex<()>,
}

impl<T> Cells<T> {
    fn apply(&self, errors: &FieldIssues, valid: bool) {
        let _guard = self.apply_lock.lock();
        self.errors.set(errors.clone());
        self.valid.set(valid);
    }
}

/// Parse the current values and publish the outcome.
///
/// Passes overwrite each other wholesale; whichever pass applies last
/// owns the published state.
async fn run_pass<T, S>(cells: &Cells<T>, schema: &S) -> ValidationReport<T>
where
    T: Clone + PartialEq + Send + Sync,
    S: Schema<T>,
{
    let snapshot = cells.values.get();
    let report = match schema.parse(&snapshot).await {
        Ok(parsed) => ValidationReport::new(parsed, FieldIssues::new()),
        Err(failure) => {
            let grouped = FieldIssues::from_issues(failure.into_issues());
            ValidationReport::new(snapshot, grouped)
        }
    };

    cells.apply(&report.errors, report.is_valid);
    debug!(
        "validation pass applied (valid={}, issues={})",
        report.is_valid,
        report.errors.issue_count()
    );
    report
}

// ---------------------------------------------------------------------------
// FormValidator
// ---------------------------------------------------------------------------

/// Schema-backed validation state for a form.
///
/// The values cell is read-write for the caller; the issue and
/// validity cells are written only by validation passes. A new
/// validator starts optimistically valid — no pass has run, so no
/// issues are reported until the first edit settles or
/// [`validate`](Self::validate) is called.
///
/// Construction spawns the background reaction and therefore must
/// happen inside a tokio runtime. Dropping the validator cancels the
/// reaction.
///
/// # Examples
///
/// ```rust,ignore
/// use formwatch::{FieldRules, FormValidator, Issue};
///
/// #[derive(Clone, PartialEq, Default)]
/// struct Signup { name: String, age: i64 }
///
/// let schema = FieldRules::new().field("name", |s: &Signup| {
///     s.name.trim().is_empty().then(|| Issue::new("required", "This field is required"))
/// });
///
/// let form = FormValidator::new(schema, Signup::default());
/// form.update_values(|s| s.age = 33);
/// // ...the background reaction revalidates once edits settle.
/// ```
pub struct FormValidator<T, S> {
    cells: Arc<Cells<T>>,
    schema: Arc<S>,
    policy: DebouncePolicy,
    reaction: DebouncedWatch,
}

impl<T, S> FormValidator<T, S>
where
    T: Clone + PartialEq + Send + Sync + 'static,
    S: Schema<T> + 'static,
{
    /// Create a validator with the default debounce policy
    /// (300ms debounce, 500ms burst cap).
    #[must_use]
    pub fn new(schema: S, initial: T) -> Self {
        Self::spawn(schema, initial, DebouncePolicy::default())
    }

    /// Create a validator with an explicit debounce policy.
    ///
    /// # Errors
    ///
    /// Returns the policy's [`PolicyError`] if its windows are out of
    /// range.
    pub fn with_policy(schema: S, initial: T, policy: DebouncePolicy) -> Result<Self, PolicyError> {
        policy.validate()?;
        Ok(Self::spawn(schema, initial, policy))
    }

    fn spawn(schema: S, initial: T, policy: DebouncePolicy) -> Self {
        let cells = Arc::new(Cells {
            values: Observable::new(initial),
            errors: Observable::new(FieldIssues::new()),
            valid: Observable::new(true),
            apply_lock: Mutex::new(()),
        });
        let schema = Arc::new(schema);

        let reaction_cells = Arc::clone(&cells);
        let reaction_schema = Arc::clone(&schema);
        let reaction = watch_debounced(cells.values.subscribe(), policy, move || {
            let cells = Arc::clone(&reaction_cells);
            let schema = Arc::clone(&reaction_schema);
            async move {
                run_pass(cells.as_ref(), schema.as_ref()).await;
            }
        });

        debug!(
            "form validator started (debounce={:?}, max_wait={:?})",
            policy.debounce, policy.max_wait
        );

        Self {
            cells,
            schema,
            policy,
            reaction,
        }
    }

    /// The editable values cell.
    ///
    /// Edits notify the background reaction; an edit that leaves the
    /// values structurally unchanged does not.
    #[must_use]
    pub fn values(&self) -> &Observable<T> {
        &self.cells.values
    }

    /// Replace the form values. Returns true if they changed.
    pub fn set_values(&self, values: T) -> bool {
        self.cells.values.set(values)
    }

    /// Mutate the form values in place. Returns true if they changed.
    pub fn update_values(&self, f: impl FnOnce(&mut T)) -> bool {
        self.cells.values.update(f)
    }

    /// Snapshot of the current per-field issues.
    #[must_use]
    pub fn errors(&self) -> FieldIssues {
        self.cells.errors.get()
    }

    /// Subscribe to issue updates.
    #[must_use]
    pub fn subscribe_errors(&self) -> watch::Receiver<FieldIssues> {
        self.cells.errors.subscribe()
    }

    /// Whether the most recently applied pass found no issues.
    ///
    /// True until a first pass says otherwise.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.cells.valid.get()
    }

    /// Subscribe to validity flips.
    #[must_use]
    pub fn subscribe_validity(&self) -> watch::Receiver<bool> {
        self.cells.valid.subscribe()
    }

    /// The schema engine driving this validator.
    #[must_use]
    pub fn schema(&self) -> &S {
        &self.schema
    }

    /// The debounce policy the background reaction runs under.
    #[must_use]
    pub fn policy(&self) -> DebouncePolicy {
        self.policy
    }

    /// Validate the current values immediately, bypassing the
    /// debounce.
    ///
    /// The returned report describes this pass; the issue and validity
    /// observables are updated to match. Concurrent passes are safe —
    /// each call gets its own report and the observables reflect
    /// whichever pass applied last.
    pub async fn validate(&self) -> ValidationReport<T> {
        run_pass(self.cells.as_ref(), self.schema.as_ref()).await
    }

    /// Stop the background reaction.
    ///
    /// Pending and in-flight reactions are abandoned. The observables
    /// keep their current state and [`validate`](Self::validate) keeps
    /// working. Idempotent.
    pub fn shutdown(&self) {
        self.reaction.shutdown();
    }

    /// Whether the background reaction has been shut down.
    #[must_use]
    pub fn is_shut_down(&self) -> bool {
        self.reaction.is_shut_down()
    }

    /// Tear the validator down and wait for the background task to
    /// exit.
    ///
    /// An `Err` carries a panic that escaped the schema engine inside
    /// the background reaction.
    pub async fn close(self) -> Result<(), tokio::task::JoinError> {
        self.reaction.shutdown();
        self.reaction.join().await
    }
}

impl<T, S> std::fmt::Debug for FormValidator<T, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormValidator")
            .field("policy", &self.policy)
            .field("valid", &self.cells.valid.get())
            .field("shut_down", &self.reaction.is_shut_down())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
