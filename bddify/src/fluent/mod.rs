//! Fluent step registration.
//!
//! [`FluentScanner`] builds a scenario from explicit, caller-ordered
//! registrations instead of naming conventions. Method names carry no
//! meaning here: the role comes from the builder method used to register
//! the step.

mod invocation;
mod macros;

use crate::error::{BddifyError, BddifyResult, ConfigurationError};
use crate::settings::BddifySettings;
use crate::step::{Role, StepDescriptor, StepParts};
use crate::story::{Narrative, Story};
use crate::title::{self, TitleFormatter};

pub use invocation::Invocation;

/// Builder collecting fluent step registrations for one fixture instance.
///
/// Registration errors are held until [`FluentScanner::build`] or one of the
/// `bddify` methods, so no step runs when any registration is invalid.
pub struct FluentScanner<T> {
    target: T,
    steps: Vec<StepDescriptor<T>>,
    previous: Option<Role>,
    errors: Vec<ConfigurationError>,
    registrations: usize,
    narrative: Option<Narrative>,
    settings_error: Option<BddifyError>,
    formatter: TitleFormatter,
}

impl<T: Default + 'static> FluentScanner<T> {
    /// Starts a scenario against `T::default()`.
    #[must_use]
    pub fn scan() -> Self {
        Self::for_instance(T::default())
    }
}

impl<T: 'static> FluentScanner<T> {
    /// Starts a scenario against an existing instance.
    ///
    /// Settings are loaded from the environment straight away because
    /// titles are rendered as steps are registered. A loading failure is
    /// reported by [`FluentScanner::build`].
    #[must_use]
    pub fn for_instance(target: T) -> Self {
        let (formatter, settings_error) = match BddifySettings::load() {
            Ok(settings) => (TitleFormatter::new(&settings), None),
            Err(err) => (TitleFormatter::default(), Some(err)),
        };
        Self {
            target,
            steps: Vec::new(),
            previous: None,
            errors: Vec::new(),
            registrations: 0,
            narrative: None,
            settings_error,
            formatter,
        }
    }

    /// Uses `settings` instead of the ones loaded from the environment.
    ///
    /// Apply before registering steps; titles are rendered at registration.
    #[must_use]
    pub fn with_settings(mut self, settings: &BddifySettings) -> Self {
        self.formatter = TitleFormatter::new(settings);
        self.settings_error = None;
        self
    }

    /// Attaches story narrative metadata.
    #[must_use]
    pub fn narrative(mut self, narrative: Narrative) -> Self {
        self.narrative = Some(narrative);
        self
    }

    /// Registers a `Given` step.
    #[must_use]
    pub fn given(self, registration: Invocation<T>) -> Self {
        self.register(Role::Given, registration)
    }

    /// Registers a `When` step.
    #[must_use]
    pub fn when(self, registration: Invocation<T>) -> Self {
        self.register(Role::When, registration)
    }

    /// Registers a `Then` step.
    #[must_use]
    pub fn then(self, registration: Invocation<T>) -> Self {
        self.register(Role::Then, registration)
    }

    /// Registers an `And` step continuing the previous step's role.
    #[must_use]
    pub fn and(self, registration: Invocation<T>) -> Self {
        self.register(Role::And, registration)
    }

    fn register(mut self, role: Role, registration: Invocation<T>) -> Self {
        self.registrations += 1;
        let index = self.registrations;
        let (method, arguments, explicit_title, callable) = registration.into_parts();
        if !invocation::is_traceable(&method) {
            self.errors.push(ConfigurationError::UntraceableRegistration {
                index,
                reason: format!("`{method}` is not a single method name"),
            });
            return self;
        }
        let effective_role = match (role, self.previous) {
            (Role::And, Some(inherited)) => inherited,
            (Role::And, None) => {
                self.errors.push(ConfigurationError::DanglingAnd { method });
                return self;
            }
            (declared, _) => declared,
        };
        self.previous = Some(effective_role);
        let parts = StepParts {
            role,
            effective_role,
            ordinal: self.steps.len() + 1,
            method: &method,
            title: explicit_title.as_deref(),
            arguments,
        };
        let step = StepDescriptor::new(parts, &self.formatter, callable);
        tracing::debug!(
            ordinal = step.details().ordinal(),
            step = %step.details().text(),
            "registered fluent step"
        );
        self.steps.push(step);
        self
    }

    /// Returns the instance and its ordered steps without running them.
    ///
    /// # Errors
    ///
    /// Returns [`BddifyError::Settings`] when settings could not be loaded
    /// and [`BddifyError::Configuration`] when any registration was invalid.
    pub fn build(self) -> BddifyResult<(T, Vec<StepDescriptor<T>>)> {
        if let Some(err) = self.settings_error {
            return Err(err);
        }
        match ConfigurationError::collapse(self.errors) {
            Some(err) => Err(err.into()),
            None => Ok((self.target, self.steps)),
        }
    }

    /// Runs the scenario, titling it after the fixture type.
    ///
    /// Use [`bddify!`](crate::bddify!) instead to title the scenario after
    /// the calling function.
    ///
    /// # Errors
    ///
    /// As for [`FluentScanner::build`]. Step failures are reported in the
    /// returned [`Story`], not as errors.
    pub fn bddify(self) -> BddifyResult<Story> {
        let scenario_title = title::type_title::<T>();
        self.bddify_titled(&scenario_title)
    }

    /// Runs the scenario with an explicit, verbatim title.
    ///
    /// # Errors
    ///
    /// As for [`FluentScanner::bddify`].
    pub fn bddify_titled(mut self, scenario_title: &str) -> BddifyResult<Story> {
        let narrative = self.narrative.take();
        let (target, steps) = self.build()?;
        Ok(Story::single(
            title::type_title::<T>(),
            narrative,
            scenario_title,
            target,
            steps,
        ))
    }
}
