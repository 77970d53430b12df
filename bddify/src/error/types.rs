//! Primary error enums for scanning and running scenarios.

use figment::Error as FigmentError;
use thiserror::Error;

use super::aggregate::AggregatedErrors;

/// Errors raised while turning a fixture into step descriptors.
///
/// These surface before any step runs, so a scenario with a configuration
/// error never executes partially.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigurationError {
    /// A `#[with_args]` marker supplies the wrong number of arguments.
    #[error(
        "step method '{method}' takes {expected} argument(s) but marker #{marker} supplies {actual}"
    )]
    ArityMismatch {
        /// Name of the step method.
        method: String,
        /// One-based position of the offending marker.
        marker: usize,
        /// Number of parameters the method declares.
        expected: usize,
        /// Number of values the marker supplies.
        actual: usize,
    },

    /// A marker value does not have the type of the matching parameter.
    #[error(
        "step method '{method}' marker #{marker}: parameter '{parameter}' expects `{expected}` but the argument is `{actual}`"
    )]
    TypeMismatch {
        /// Name of the step method.
        method: String,
        /// One-based position of the offending marker.
        marker: usize,
        /// Name of the parameter receiving the value.
        parameter: String,
        /// Declared parameter type.
        expected: &'static str,
        /// Type of the supplied value.
        actual: &'static str,
    },

    /// A method with parameters has no markers to resolve them from.
    #[error("step method '{method}' takes {expected} argument(s) but declares no #[with_args] markers")]
    MissingArguments {
        /// Name of the step method.
        method: String,
        /// Number of parameters the method declares.
        expected: usize,
    },

    /// An `And` step appears before any other step.
    #[error("step '{method}' is an `And` step with no preceding step to inherit a role from")]
    DanglingAnd {
        /// Name of the step method.
        method: String,
    },

    /// A fluent registration does not name a single method call.
    #[error("registration #{index} cannot be traced to a single method call: {reason}")]
    UntraceableRegistration {
        /// One-based position of the registration.
        index: usize,
        /// Why the registration was rejected.
        reason: String,
    },

    /// Several configuration errors were found in one scan.
    #[error("multiple configuration errors:\n{0}")]
    Aggregate(Box<AggregatedErrors>),
}

impl ConfigurationError {
    /// Collapses a list of errors into a single value.
    ///
    /// Returns `None` for an empty list, the sole error for a single-entry
    /// list, and [`ConfigurationError::Aggregate`] otherwise.
    #[must_use]
    pub fn collapse(mut errors: Vec<Self>) -> Option<Self> {
        match errors.len() {
            0 => None,
            1 => errors.pop(),
            _ => Some(Self::Aggregate(Box::new(AggregatedErrors::new(errors)))),
        }
    }
}

/// Top-level error type returned by the `bddify` entry points.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BddifyError {
    /// The fixture could not be turned into a runnable scenario.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Runtime settings could not be gathered.
    #[error("failed to gather bddify settings: {0}")]
    Settings(#[from] Box<FigmentError>),

    /// A scenario ran and at least one step failed.
    #[error("scenario '{scenario}' of story '{story}' failed at step '{step}': {detail}")]
    ScenarioFailed {
        /// Title of the story containing the scenario.
        story: String,
        /// Title of the failing scenario.
        scenario: String,
        /// Display text of the failing step.
        step: String,
        /// Failure detail captured from the step body.
        detail: String,
    },
}

/// Result alias used by the `bddify` entry points.
pub type BddifyResult<T> = Result<T, BddifyError>;
