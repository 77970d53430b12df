//! Tests for convention scanning: classification, fan-out, and validation.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Result, ensure};
use rstest::rstest;

use super::*;
use crate::argument::bind;
use crate::runner::ScenarioRunner;
use crate::step::StepDescriptor;

#[derive(Default)]
struct Fixture {
    seen: Vec<i32>,
}

fn noop(name: &'static str) -> StepMethod<Fixture> {
    StepMethod::new(name, |_, _| Ok(()))
}

fn recording(name: &'static str) -> StepMethod<Fixture> {
    StepMethod::new(name, |target: &mut Fixture, arguments: &[ArgumentSnapshot]| {
        target.seen.push(bind(arguments, 0)?);
        Ok(())
    })
    .parameter(Parameter::of::<i32>("value"))
}

fn texts<T>(steps: &[StepDescriptor<T>]) -> Vec<String> {
    steps.iter().map(|step| step.details().text()).collect()
}

#[rstest]
#[case::snake("given_an_input", Some(Role::Given))]
#[case::camel("WhenTheMethodRuns", Some(Role::When))]
#[case::then("then_it_passes", Some(Role::Then))]
#[case::and("and_also_this", Some(Role::And))]
#[case::upper("GIVEN_SHOUTING", Some(Role::Given))]
#[case::prefix_only("thence_onwards", None)]
#[case::helper("setup", None)]
fn classify_reads_the_leading_keyword(#[case] name: &str, #[case] expected: Option<Role>) {
    assert_eq!(classify(name), expected);
}

#[rstest]
fn unclassified_methods_are_skipped() -> Result<()> {
    let steps = ConventionScanner::default().scan_methods(vec![
        noop("setup"),
        noop("given_a_context"),
        noop("helper"),
        noop("then_an_outcome"),
    ])?;
    ensure!(
        texts(&steps) == vec!["Given a context", "Then an outcome"],
        "unexpected steps: {:?}",
        texts(&steps)
    );
    let ordinals: Vec<usize> = steps.iter().map(|s| s.details().ordinal()).collect();
    ensure!(ordinals == vec![1, 2], "ordinals should be contiguous");
    Ok(())
}

#[rstest]
fn each_marker_becomes_one_step() -> Result<()> {
    let method = recording("when_a_value_is_added")
        .with_args(vec![ArgumentSnapshot::literal(1_i32)])
        .with_args(vec![ArgumentSnapshot::literal(2_i32)])
        .with_args(vec![ArgumentSnapshot::literal(3_i32)]);
    let steps = ConventionScanner::default().scan_methods(vec![method])?;
    ensure!(
        texts(&steps)
            == vec![
                "When a value is added 1",
                "When a value is added 2",
                "When a value is added 3"
            ],
        "unexpected steps: {:?}",
        texts(&steps)
    );
    let mut runner = ScenarioRunner::new(Fixture::default());
    let result = runner.run(steps);
    ensure!(result.passed(), "scenario should pass");
    ensure!(runner.target().seen == vec![1, 2, 3], "each marker should run once");
    Ok(())
}

#[rstest]
fn and_steps_inherit_the_previous_role() -> Result<()> {
    let steps =
        ConventionScanner::default().scan_methods(vec![noop("then_first"), noop("and_second")])?;
    let second = steps
        .get(1)
        .map(|s| (s.details().role(), s.details().effective_role()));
    ensure!(
        second == Some((Role::And, Role::Then)),
        "unexpected roles: {second:?}"
    );
    ensure!(texts(&steps)[1] == "And second", "And keeps its keyword in text");
    Ok(())
}

#[rstest]
fn leading_and_is_rejected() {
    let err = ConventionScanner::default()
        .scan_methods(vec![noop("and_nothing_before")])
        .err();
    assert!(matches!(
        err,
        Some(ConfigurationError::DanglingAnd { ref method }) if method == "and_nothing_before"
    ));
}

#[rstest]
fn arity_mismatch_names_the_marker() {
    let method = recording("given_a_value")
        .with_args(vec![ArgumentSnapshot::literal(1_i32)])
        .with_args(vec![
            ArgumentSnapshot::literal(1_i32),
            ArgumentSnapshot::literal(2_i32),
        ]);
    let err = ConventionScanner::default().scan_methods(vec![method]).err();
    assert!(matches!(
        err,
        Some(ConfigurationError::ArityMismatch { marker: 2, expected: 1, actual: 2, .. })
    ));
}

#[rstest]
fn type_mismatch_names_both_types() -> Result<()> {
    let method = recording("given_a_value").with_args(vec![ArgumentSnapshot::literal("one")]);
    let err = ConventionScanner::default().scan_methods(vec![method]).err();
    let Some(ConfigurationError::TypeMismatch {
        parameter,
        expected,
        actual,
        ..
    }) = err
    else {
        anyhow::bail!("expected a type mismatch");
    };
    ensure!(parameter == "value", "unexpected parameter {parameter}");
    ensure!(expected == "i32", "unexpected expected type {expected}");
    ensure!(actual == "&str", "unexpected actual type {actual}");
    Ok(())
}

#[rstest]
fn parameterised_method_without_markers_is_rejected() {
    let err = ConventionScanner::default()
        .scan_methods(vec![recording("given_a_value")])
        .err();
    assert!(matches!(
        err,
        Some(ConfigurationError::MissingArguments { expected: 1, .. })
    ));
}

#[rstest]
fn opaque_parameters_only_check_arity() -> Result<()> {
    let method = StepMethod::<Fixture>::new("given_anything", |_, _| Ok(()))
        .parameter(Parameter::opaque("value"))
        .with_args(vec![ArgumentSnapshot::literal("text")]);
    let steps = ConventionScanner::default().scan_methods(vec![method])?;
    ensure!(steps.len() == 1, "expected one step");
    Ok(())
}

#[rstest]
fn every_problem_in_a_scan_is_reported() -> Result<()> {
    let err = ConventionScanner::default()
        .scan_methods(vec![
            noop("and_first"),
            recording("given_a_value"),
            recording("when_typed").with_args(vec![ArgumentSnapshot::literal(1_u8)]),
        ])
        .err();
    let Some(ConfigurationError::Aggregate(aggregate)) = err else {
        anyhow::bail!("expected an aggregate");
    };
    ensure!(aggregate.len() == 3, "expected three errors, got {}", aggregate.len());
    Ok(())
}

#[rstest]
fn explicit_titles_are_kept_verbatim() -> Result<()> {
    let method = recording("when_added")
        .titled("Adding {0} to the total")
        .with_args(vec![ArgumentSnapshot::literal(4_i32)]);
    let steps = ConventionScanner::default().scan_methods(vec![method])?;
    ensure!(
        texts(&steps) == vec!["Adding 4 to the total"],
        "unexpected steps: {:?}",
        texts(&steps)
    );
    Ok(())
}

#[rstest]
fn configuration_errors_prevent_any_step_from_running() {
    let calls = Rc::new(RefCell::new(0_u32));
    let counter = Rc::clone(&calls);
    let first = StepMethod::<Fixture>::new("given_a_context", move |_, _| {
        *counter.borrow_mut() += 1;
        Ok(())
    });
    let scanned = ConventionScanner::default().scan_methods(vec![first, recording("when_broken")]);
    assert!(scanned.is_err());
    assert_eq!(*calls.borrow(), 0);
}
