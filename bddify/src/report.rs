//! Serialisable run records for external reporters.
//!
//! Rendering is left to the consumer; these types only carry data.

use serde::Serialize;

use crate::runner::{ScenarioStatus, StepStatus};
use crate::step::Role;
use crate::story::Narrative;

/// One step as reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    /// Step text, including the role keyword for default titles.
    pub title: String,
    /// Role the step was declared with.
    pub role: Role,
    /// Outcome of the step.
    pub status: StepStatus,
    /// Failure message and causes, for failed steps.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_detail: Option<String>,
}

/// One scenario as reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioReport {
    /// Scenario title.
    pub title: String,
    /// Overall outcome.
    pub status: ScenarioStatus,
    /// Steps in execution order.
    pub steps: Vec<StepReport>,
}

/// One story as reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoryReport {
    /// Story title.
    pub title: String,
    /// Narrative metadata, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narrative: Option<Narrative>,
    /// Scenarios in the order they ran.
    pub scenarios: Vec<ScenarioReport>,
}

#[cfg(test)]
mod tests {
    use anyhow::{Result, ensure};
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    fn story_report_serialises_to_plain_json() -> Result<()> {
        let report = StoryReport {
            title: String::from("Account holder withdraws cash"),
            narrative: Some(Narrative::new("an account holder", "to withdraw cash", "I can eat")),
            scenarios: vec![ScenarioReport {
                title: String::from("Insufficient funds"),
                status: ScenarioStatus::Failed,
                steps: vec![
                    StepReport {
                        title: String::from("Given the balance is 10"),
                        role: Role::Given,
                        status: StepStatus::Passed,
                        failure_detail: None,
                    },
                    StepReport {
                        title: String::from("When 20 is withdrawn"),
                        role: Role::When,
                        status: StepStatus::Failed,
                        failure_detail: Some(String::from("insufficient funds")),
                    },
                    StepReport {
                        title: String::from("Then no cash is dispensed"),
                        role: Role::Then,
                        status: StepStatus::NotExecuted,
                        failure_detail: None,
                    },
                ],
            }],
        };
        let value = serde_json::to_value(&report)?;
        let expected = json!({
            "title": "Account holder withdraws cash",
            "narrative": {
                "as_a": "an account holder",
                "i_want": "to withdraw cash",
                "so_that": "I can eat"
            },
            "scenarios": [{
                "title": "Insufficient funds",
                "status": "Failed",
                "steps": [
                    { "title": "Given the balance is 10", "role": "Given", "status": "Passed" },
                    {
                        "title": "When 20 is withdrawn",
                        "role": "When",
                        "status": "Failed",
                        "failure_detail": "insufficient funds"
                    },
                    { "title": "Then no cash is dispensed", "role": "Then", "status": "NotExecuted" }
                ]
            }]
        });
        ensure!(value == expected, "unexpected report: {value}");
        Ok(())
    }
}
