//! Step descriptors: one resolved, executable unit of a scenario.

use std::error::Error as StdError;
use std::fmt;

use serde::Serialize;

use crate::argument::ArgumentSnapshot;
use crate::error::StepFailure;
use crate::title::TitleFormatter;

/// BDD role of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Role {
    /// Establishes context.
    Given,
    /// Performs the action under test.
    When,
    /// Checks an outcome.
    Then,
    /// Continues the preceding step's role.
    And,
}

impl Role {
    /// Matches a word against the role keywords, ignoring ASCII case.
    ///
    /// ```
    /// use bddify::Role;
    ///
    /// assert_eq!(Role::from_keyword("Given"), Some(Role::Given));
    /// assert_eq!(Role::from_keyword("thence"), None);
    /// ```
    #[must_use]
    pub fn from_keyword(word: &str) -> Option<Self> {
        [Self::Given, Self::When, Self::Then, Self::And]
            .into_iter()
            .find(|role| role.keyword().eq_ignore_ascii_case(word))
    }

    /// Keyword used in step text.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Given => "Given",
            Self::When => "When",
            Self::Then => "Then",
            Self::And => "And",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Converts a step body's return value into a step outcome.
///
/// Step methods may return `()` or any `Result<(), E>` whose error converts
/// into a boxed error, which covers `anyhow::Error`, `String`, and standard
/// library errors.
pub trait IntoStepOutcome {
    /// Converts the value, mapping errors to [`StepFailure`].
    ///
    /// # Errors
    ///
    /// Returns a [`StepFailure`] when the step body reported an error.
    fn into_step_outcome(self) -> Result<(), StepFailure>;
}

impl IntoStepOutcome for () {
    fn into_step_outcome(self) -> Result<(), StepFailure> {
        Ok(())
    }
}

impl<E> IntoStepOutcome for Result<(), E>
where
    E: Into<Box<dyn StdError + Send + Sync + 'static>>,
{
    fn into_step_outcome(self) -> Result<(), StepFailure> {
        self.map_err(StepFailure::from_error)
    }
}

/// Zero-argument closure bound to a step's captured arguments.
pub type StepCallable<T> = Box<dyn Fn(&mut T) -> Result<(), StepFailure>>;

/// Everything known about a step except how to invoke it.
#[derive(Debug, Clone, Serialize)]
pub struct StepDetails {
    role: Role,
    effective_role: Role,
    title: String,
    explicit_title: bool,
    ordinal: usize,
    method: String,
    #[serde(skip)]
    arguments: Vec<ArgumentSnapshot>,
}

impl StepDetails {
    /// Role keyword the step was declared with.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Role the step executes as; an `And` step reports the role it inherited.
    #[must_use]
    pub const fn effective_role(&self) -> Role {
        self.effective_role
    }

    /// Title after placeholder substitution.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Whether the title was supplied by the caller.
    #[must_use]
    pub const fn has_explicit_title(&self) -> bool {
        self.explicit_title
    }

    /// Position of the step in its scenario, starting at 1.
    #[must_use]
    pub const fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// Name of the method the step invokes.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Argument snapshots in positional order.
    #[must_use]
    pub fn arguments(&self) -> &[ArgumentSnapshot] {
        &self.arguments
    }

    /// Step text as reported: explicit titles verbatim, default titles
    /// prefixed with the role keyword.
    #[must_use]
    pub fn text(&self) -> String {
        if self.explicit_title {
            return self.title.clone();
        }
        if self.title.is_empty() {
            return self.role.keyword().to_owned();
        }
        format!("{} {}", self.role, self.title)
    }
}

/// One executable step bound to a fixture of type `T`.
///
/// Role, title, and ordinal are fixed when the descriptor is created.
pub struct StepDescriptor<T> {
    details: StepDetails,
    callable: StepCallable<T>,
}

/// Inputs for [`StepDescriptor::new`].
pub(crate) struct StepParts<'a> {
    pub role: Role,
    pub effective_role: Role,
    pub ordinal: usize,
    pub method: &'a str,
    pub title: Option<&'a str>,
    pub arguments: Vec<ArgumentSnapshot>,
}

impl<T> StepDescriptor<T> {
    /// Builds a descriptor, rendering its title with `formatter`.
    pub(crate) fn new(
        parts: StepParts<'_>,
        formatter: &TitleFormatter,
        callable: StepCallable<T>,
    ) -> Self {
        let StepParts {
            role,
            effective_role,
            ordinal,
            method,
            title,
            arguments,
        } = parts;
        let template = title.map_or_else(
            || formatter.default_template(method, arguments.len()),
            str::to_owned,
        );
        let details = StepDetails {
            role,
            effective_role,
            title: formatter.format(&template, &arguments),
            explicit_title: title.is_some(),
            ordinal,
            method: method.to_owned(),
            arguments,
        };
        Self { details, callable }
    }

    /// Descriptive details of the step.
    #[must_use]
    pub const fn details(&self) -> &StepDetails {
        &self.details
    }

    /// Invokes the step against `target`.
    ///
    /// # Errors
    ///
    /// Returns the [`StepFailure`] reported by the step body. Panics are not
    /// caught here; the runner handles them.
    pub fn invoke(&self, target: &mut T) -> Result<(), StepFailure> {
        (self.callable)(target)
    }

    pub(crate) fn into_details(self) -> StepDetails {
        self.details
    }
}

impl<T> fmt::Debug for StepDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepDescriptor")
            .field("details", &self.details)
            .field("callable", &"<step>")
            .finish()
    }
}
