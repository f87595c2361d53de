//! Validator teardown: shutdown, close, and drop.
//!
//! Verifies:
//! 1. Shutdown abandons pending reactions; later edits schedule nothing
//! 2. Manual validation keeps working on a shut-down validator
//! 3. Dropping the validator tears the whole watch down
//! 4. close() waits for the background task to exit

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use formwatch::{FormValidator, Issue, Schema, SchemaFailure, schema_fn};

#[derive(Debug, Clone, PartialEq, Default)]
struct Profile {
    age: i64,
}

fn counting_schema() -> (impl Schema<Profile> + 'static, Arc<AtomicUsize>) {
    let parses = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&parses);
    let schema = schema_fn(move |p: &Profile| {
        counter.fetch_add(1, Ordering::SeqCst);
        if (0..=130).contains(&p.age) {
            Ok(p.clone())
        } else {
            Err(SchemaFailure::from(Issue::out_of_range("age", 0, 130)))
        }
    });
    (schema, parses)
}

/// Shutting down with a pending reaction abandons it; edits after
/// shutdown schedule nothing.
#[tokio::test(start_paused = true)]
async fn shutdown_stops_background_revalidation() {
    let (schema, parses) = counting_schema();
    let form = FormValidator::new(schema, Profile::default());

    form.set_values(Profile { age: 200 });
    tokio::time::sleep(Duration::from_millis(100)).await;
    form.shutdown();
    assert!(form.is_shut_down());

    form.set_values(Profile { age: 300 });
    tokio::time::sleep(Duration::from_secs(2)).await;

    assert_eq!(parses.load(Ordering::SeqCst), 0, "no pass after shutdown");
    assert!(form.is_valid(), "state frozen at its pre-shutdown value");
    assert!(form.errors().is_empty());
}

/// Shutdown only stops the reaction; on-demand validation still runs
/// and still publishes to the observables.
#[tokio::test]
async fn manual_validate_survives_shutdown() {
    let (schema, parses) = counting_schema();
    let form = FormValidator::new(schema, Profile { age: 200 });

    form.shutdown();
    form.shutdown(); // idempotent

    let report = form.validate().await;

    assert_eq!(parses.load(Ordering::SeqCst), 1);
    assert!(!report.is_valid);
    assert!(!form.is_valid());
}

/// Dropping the validator cancels the reaction and drops every writer,
/// which subscribers observe as a closed channel.
#[tokio::test(start_paused = true)]
async fn drop_tears_the_watch_down() {
    let (schema, parses) = counting_schema();
    let form = FormValidator::new(schema, Profile::default());
    let mut errors = form.subscribe_errors();

    form.set_values(Profile { age: 200 });
    drop(form);
    tokio::time::sleep(Duration::from_secs(2)).await;

    assert_eq!(parses.load(Ordering::SeqCst), 0, "pending reaction abandoned");
    assert!(
        errors.changed().await.is_err(),
        "every writer gone after drop"
    );
}

/// close() resolves once the background task has fully exited.
#[tokio::test(start_paused = true)]
async fn close_waits_for_task_exit() {
    let (schema, parses) = counting_schema();
    let form = FormValidator::new(schema, Profile::default());

    form.set_values(Profile { age: 200 });
    form.close().await.unwrap();

    assert_eq!(parses.load(Ordering::SeqCst), 0, "pending reaction abandoned");
}
