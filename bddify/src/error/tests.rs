//! Tests for configuration error aggregation and step failure details.

use std::fmt;

use anyhow::{Result, ensure};
use rstest::rstest;

use super::*;

#[derive(Debug)]
struct Inner;

impl fmt::Display for Inner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("disk full")
    }
}

impl std::error::Error for Inner {}

#[derive(Debug)]
struct Outer(Inner);

impl fmt::Display for Outer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("could not save")
    }
}

impl std::error::Error for Outer {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

fn dangling(method: &str) -> ConfigurationError {
    ConfigurationError::DanglingAnd {
        method: method.to_owned(),
    }
}

#[rstest]
fn collapse_empty_is_none() {
    assert!(ConfigurationError::collapse(Vec::new()).is_none());
}

#[rstest]
fn collapse_single_returns_it_unwrapped() -> Result<()> {
    let collapsed = ConfigurationError::collapse(vec![dangling("and_more")]);
    ensure!(
        matches!(collapsed, Some(ConfigurationError::DanglingAnd { ref method }) if method == "and_more"),
        "unexpected collapse: {collapsed:?}"
    );
    Ok(())
}

#[rstest]
fn collapse_many_numbers_each_error() -> Result<()> {
    let collapsed = ConfigurationError::collapse(vec![
        dangling("and_one"),
        ConfigurationError::ArityMismatch {
            method: String::from("given_inputs"),
            marker: 2,
            expected: 3,
            actual: 1,
        },
    ])
    .ok_or_else(|| anyhow::anyhow!("expected an error"))?;
    let ConfigurationError::Aggregate(ref aggregate) = collapsed else {
        anyhow::bail!("expected an aggregate, got {collapsed:?}");
    };
    ensure!(aggregate.len() == 2, "expected two errors");
    let text = collapsed.to_string();
    ensure!(
        text.contains("1: step 'and_one' is an `And` step"),
        "first entry missing: {text}"
    );
    ensure!(
        text.contains("2: step method 'given_inputs' takes 3 argument(s) but marker #2 supplies 1"),
        "second entry missing: {text}"
    );
    Ok(())
}

#[rstest]
fn configuration_errors_convert_transparently() {
    let err: BddifyError = dangling("and_x").into();
    assert_eq!(
        err.to_string(),
        "step 'and_x' is an `And` step with no preceding step to inherit a role from"
    );
}

#[rstest]
fn failure_detail_walks_nested_causes() {
    let failure = StepFailure::from_error(Outer(Inner));
    assert_eq!(failure.message(), "could not save");
    assert_eq!(failure.detail(), "could not save: disk full");
    assert!(!failure.panicked());
}

#[rstest]
#[case::static_str(Box::new("static message") as Box<dyn std::any::Any + Send>, "static message")]
#[case::owned(Box::new(String::from("owned message")) as Box<dyn std::any::Any + Send>, "owned message")]
#[case::other(Box::new(7_u8) as Box<dyn std::any::Any + Send>, "step panicked with a non-string payload")]
fn panic_payloads_become_messages(
    #[case] payload: Box<dyn std::any::Any + Send>,
    #[case] expected: &str,
) {
    let failure = StepFailure::from_panic(payload.as_ref());
    assert!(failure.panicked());
    assert_eq!(failure.message(), expected);
}

#[rstest]
fn string_errors_are_accepted() {
    let failure = StepFailure::from_error(String::from("plain text"));
    assert_eq!(failure.detail(), "plain text");
}
