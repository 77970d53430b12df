//! Stories group scenario results under optional narrative metadata.

use serde::{Deserialize, Serialize};

use crate::error::{BddifyError, BddifyResult};
use crate::report::{ScenarioReport, StoryReport};
use crate::runner::{ScenarioResult, ScenarioRunner, ScenarioStatus};
use crate::step::StepDescriptor;

/// "As a … I want … so that …" metadata attached to a story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Narrative {
    /// Who benefits.
    pub as_a: String,
    /// What they want.
    pub i_want: String,
    /// Why they want it.
    pub so_that: String,
}

impl Narrative {
    /// Creates a narrative from its three clauses.
    #[must_use]
    pub fn new(
        as_a: impl Into<String>,
        i_want: impl Into<String>,
        so_that: impl Into<String>,
    ) -> Self {
        Self {
            as_a: as_a.into(),
            i_want: i_want.into(),
            so_that: so_that.into(),
        }
    }
}

/// A titled scenario run.
#[derive(Debug)]
pub struct Scenario {
    title: String,
    result: ScenarioResult,
}

impl Scenario {
    /// Wraps an existing result.
    #[must_use]
    pub fn new(title: impl Into<String>, result: ScenarioResult) -> Self {
        Self {
            title: title.into(),
            result,
        }
    }

    /// Runs `steps` against `target` and records the outcome under `title`.
    #[must_use]
    pub fn run<T>(title: impl Into<String>, target: T, steps: Vec<StepDescriptor<T>>) -> Self {
        let mut runner = ScenarioRunner::new(target);
        let scenario = Self::new(title, runner.run(steps));
        tracing::info!(
            scenario = %scenario.title,
            status = ?scenario.result.status(),
            steps = scenario.result.steps().len(),
            "scenario finished"
        );
        scenario
    }

    /// Scenario title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Step results.
    #[must_use]
    pub const fn result(&self) -> &ScenarioResult {
        &self.result
    }

    /// Whether every step passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.result.passed()
    }

    /// Plain record for external reporters.
    #[must_use]
    pub fn report(&self) -> ScenarioReport {
        ScenarioReport {
            title: self.title.clone(),
            status: self.result.status(),
            steps: self.result.steps().iter().map(|step| step.report()).collect(),
        }
    }
}

/// A titled collection of scenarios.
#[derive(Debug)]
pub struct Story {
    title: String,
    narrative: Option<Narrative>,
    scenarios: Vec<Scenario>,
}

impl Story {
    /// Creates an empty story.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            narrative: None,
            scenarios: Vec::new(),
        }
    }

    /// Attaches narrative metadata.
    #[must_use]
    pub fn with_narrative(mut self, narrative: Narrative) -> Self {
        self.narrative = Some(narrative);
        self
    }

    /// Appends a scenario.
    pub fn push(&mut self, scenario: Scenario) {
        self.scenarios.push(scenario);
    }

    /// Story title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Narrative metadata, if any.
    #[must_use]
    pub const fn narrative(&self) -> Option<&Narrative> {
        self.narrative.as_ref()
    }

    /// Scenarios in the order they were added.
    #[must_use]
    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    /// `Failed` when any scenario failed.
    #[must_use]
    pub fn status(&self) -> ScenarioStatus {
        if self.passed() {
            ScenarioStatus::Passed
        } else {
            ScenarioStatus::Failed
        }
    }

    /// Whether every scenario passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.scenarios.iter().all(Scenario::passed)
    }

    /// Converts the first failing step into an error.
    ///
    /// Handy at the end of a test function returning a `Result`.
    ///
    /// # Errors
    ///
    /// Returns [`BddifyError::ScenarioFailed`] naming the first scenario
    /// and step that failed.
    pub fn ensure_passed(&self) -> BddifyResult<()> {
        let failure = self.scenarios.iter().find_map(|scenario| {
            scenario
                .result
                .failed_step()
                .map(|step| (scenario, step))
        });
        let Some((scenario, step)) = failure else {
            return Ok(());
        };
        Err(BddifyError::ScenarioFailed {
            story: self.title.clone(),
            scenario: scenario.title.clone(),
            step: step.details().text(),
            detail: step
                .failure()
                .map(crate::StepFailure::detail)
                .unwrap_or_default(),
        })
    }

    /// Plain record for external reporters.
    #[must_use]
    pub fn report(&self) -> StoryReport {
        StoryReport {
            title: self.title.clone(),
            narrative: self.narrative.clone(),
            scenarios: self.scenarios.iter().map(Scenario::report).collect(),
        }
    }

    /// Runs one scenario and wraps it in a story.
    pub(crate) fn single<T>(
        story_title: String,
        narrative: Option<Narrative>,
        scenario_title: &str,
        target: T,
        steps: Vec<StepDescriptor<T>>,
    ) -> Self {
        let mut story = Self {
            title: story_title,
            narrative,
            scenarios: Vec::with_capacity(1),
        };
        story.push(Scenario::run(scenario_title, target, steps));
        story
    }
}
