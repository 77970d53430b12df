//! Sequential, fail-fast execution of step descriptors.

use std::panic::{self, AssertUnwindSafe};

use serde::Serialize;

use crate::error::StepFailure;
use crate::report::StepReport;
use crate::step::{StepDescriptor, StepDetails};

/// Outcome of one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StepStatus {
    /// The step body returned normally.
    Passed,
    /// The step body returned an error or panicked.
    Failed,
    /// An earlier step failed, so this one never ran.
    NotExecuted,
}

/// Overall outcome of a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ScenarioStatus {
    /// Every step passed.
    Passed,
    /// At least one step did not pass.
    Failed,
}

/// Result of one step, paired with the step's details.
#[derive(Debug)]
pub struct StepResult {
    details: StepDetails,
    status: StepStatus,
    failure: Option<StepFailure>,
}

impl StepResult {
    /// Step that was run or skipped.
    #[must_use]
    pub const fn details(&self) -> &StepDetails {
        &self.details
    }

    /// Outcome of the step.
    #[must_use]
    pub const fn status(&self) -> StepStatus {
        self.status
    }

    /// Failure captured from the step body, for failed steps.
    #[must_use]
    pub const fn failure(&self) -> Option<&StepFailure> {
        self.failure.as_ref()
    }

    /// Plain record for external reporters.
    #[must_use]
    pub fn report(&self) -> StepReport {
        StepReport {
            title: self.details.text(),
            role: self.details.role(),
            status: self.status,
            failure_detail: self.failure.as_ref().map(StepFailure::detail),
        }
    }
}

/// Ordered step results of one scenario run.
#[derive(Debug, Default)]
pub struct ScenarioResult {
    steps: Vec<StepResult>,
}

impl ScenarioResult {
    /// Step results in execution order.
    #[must_use]
    pub fn steps(&self) -> &[StepResult] {
        &self.steps
    }

    /// `Passed` when every step passed; an empty scenario passes.
    #[must_use]
    pub fn status(&self) -> ScenarioStatus {
        if self
            .steps
            .iter()
            .all(|step| step.status == StepStatus::Passed)
        {
            ScenarioStatus::Passed
        } else {
            ScenarioStatus::Failed
        }
    }

    /// Whether the scenario passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.status() == ScenarioStatus::Passed
    }

    /// The step that failed, if any.
    #[must_use]
    pub fn failed_step(&self) -> Option<&StepResult> {
        self.steps
            .iter()
            .find(|step| step.status == StepStatus::Failed)
    }
}

/// Executes steps against one fixture instance.
///
/// Every step of a scenario sees the same instance, so state written by a
/// `Given` step is visible to the `When` and `Then` steps after it. Use one
/// runner, and one instance, per scenario.
#[derive(Debug)]
pub struct ScenarioRunner<T> {
    target: T,
}

impl<T> ScenarioRunner<T> {
    /// Creates a runner owning `target`.
    #[must_use]
    pub const fn new(target: T) -> Self {
        Self { target }
    }

    /// Borrows the fixture instance.
    #[must_use]
    pub const fn target(&self) -> &T {
        &self.target
    }

    /// Returns the fixture instance.
    #[must_use]
    pub fn into_target(self) -> T {
        self.target
    }

    /// Runs `steps` in ordinal order.
    ///
    /// A step passes when its body returns normally and fails when it
    /// returns an error or panics. After the first failure the remaining
    /// steps are recorded as [`StepStatus::NotExecuted`] without being
    /// invoked. Failures are returned as data, never raised.
    pub fn run(&mut self, mut steps: Vec<StepDescriptor<T>>) -> ScenarioResult {
        steps.sort_by_key(|step| step.details().ordinal());
        let mut results = Vec::with_capacity(steps.len());
        let mut halted = false;
        for step in steps {
            if halted {
                tracing::debug!(
                    ordinal = step.details().ordinal(),
                    step = %step.details().text(),
                    "step not executed after an earlier failure"
                );
                results.push(StepResult {
                    details: step.into_details(),
                    status: StepStatus::NotExecuted,
                    failure: None,
                });
                continue;
            }
            tracing::debug!(
                ordinal = step.details().ordinal(),
                step = %step.details().text(),
                "executing step"
            );
            let outcome = execute(&step, &mut self.target);
            let details = step.into_details();
            results.push(match outcome {
                Ok(()) => StepResult {
                    details,
                    status: StepStatus::Passed,
                    failure: None,
                },
                Err(failure) => {
                    tracing::warn!(
                        ordinal = details.ordinal(),
                        step = %details.text(),
                        panicked = failure.panicked(),
                        detail = %failure.detail(),
                        "step failed"
                    );
                    halted = true;
                    StepResult {
                        details,
                        status: StepStatus::Failed,
                        failure: Some(failure),
                    }
                }
            });
        }
        ScenarioResult { steps: results }
    }
}

fn execute<T>(step: &StepDescriptor<T>, target: &mut T) -> Result<(), StepFailure> {
    panic::catch_unwind(AssertUnwindSafe(|| step.invoke(target)))
        .unwrap_or_else(|payload| Err(StepFailure::from_panic(payload.as_ref())))
}
