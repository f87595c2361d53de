//! A signup form validated in the background while "typing" happens.
//!
//! Run with: `cargo run -p formwatch --example signup`

use std::time::Duration;

use formwatch::{FieldRules, FormValidator, Issue};

#[derive(Debug, Clone, PartialEq, Default)]
struct Signup {
    name: String,
    email: String,
    age: i64,
}

fn schema() -> FieldRules<Signup> {
    FieldRules::new()
        .field("name", |s: &Signup| {
            s.name
                .trim()
                .is_empty()
                .then(|| Issue::new("required", "This field is required"))
        })
        .field("email", |s: &Signup| {
            (!s.email.contains('@'))
                .then(|| Issue::new("invalid_format", "Expected an email address"))
        })
        .field("age", |s: &Signup| {
            (!(0..=130).contains(&s.age))
                .then(|| Issue::new("out_of_range", "Value must be between 0 and 130"))
        })
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let form = FormValidator::new(schema(), Signup::default());

    // Simulate typing: rapid edits coalesce into a single background pass.
    for chunk in ["A", "Ad", "Ada"] {
        form.update_values(|s| s.name = chunk.to_string());
        tokio::time::sleep(Duration::from_millis(80)).await;
    }
    form.update_values(|s| {
        s.email = "ada@example.com".to_string();
        s.age = 36;
    });

    tokio::time::sleep(Duration::from_millis(400)).await;
    println!("after settling: valid={}, {}", form.is_valid(), form.errors());

    // An invalid edit checked on demand, without waiting for the debounce.
    form.update_values(|s| s.age = 200);
    let report = form.validate().await;
    println!("manual pass:    valid={}", report.is_valid);
    for (field, issues) in report.errors.fields() {
        for issue in issues {
            println!("  {field}: {issue}");
        }
    }

    form.close().await.expect("background task exits cleanly");
}
