//! Convention-based step discovery.
//!
//! A fixture lists its methods through [`ConventionSteps`], usually generated
//! by the [`steps`](macro@crate::steps) attribute. The scanner classifies each
//! method by the role keyword its name starts with, skips the rest, and fans
//! methods with several `#[with_args]` markers out into one step per marker.

mod method;

use crate::argument::ArgumentSnapshot;
use crate::error::{BddifyResult, ConfigurationError};
use crate::settings::BddifySettings;
use crate::step::{Role, StepDescriptor, StepParts};
use crate::story::{Narrative, Story};
use crate::title::{self, TitleFormatter};

pub use method::{Parameter, StepInvoker, StepMethod};

/// Fixture whose methods are discovered by naming convention.
pub trait ConventionSteps: Sized + 'static {
    /// Callable methods in declaration order.
    fn step_methods() -> Vec<StepMethod<Self>>;

    /// Optional story narrative reported with the fixture's scenario.
    #[must_use]
    fn narrative() -> Option<Narrative> {
        None
    }
}

/// Classifies a method name by its leading role keyword.
///
/// The first word of a `snake_case` or `CamelCase` identifier is compared
/// with `given`, `when`, `then`, and `and`, ignoring case.
///
/// ```
/// use bddify::{Role, classify};
///
/// assert_eq!(classify("given_primitive_inputs"), Some(Role::Given));
/// assert_eq!(classify("ThenTheMethodIsCalled"), Some(Role::Then));
/// assert_eq!(classify("execute"), None);
/// assert_eq!(classify("thenceforth"), None);
/// ```
#[must_use]
pub fn classify(identifier: &str) -> Option<Role> {
    title::words(identifier)
        .first()
        .and_then(|word| Role::from_keyword(word))
}

/// Builds step descriptors from convention step methods.
#[derive(Debug, Clone, Default)]
pub struct ConventionScanner {
    formatter: TitleFormatter,
}

impl ConventionScanner {
    /// Creates a scanner rendering titles with `settings`.
    #[must_use]
    pub fn new(settings: &BddifySettings) -> Self {
        Self {
            formatter: TitleFormatter::new(settings),
        }
    }

    /// Scans the methods registered by `T`.
    ///
    /// # Errors
    ///
    /// See [`ConventionScanner::scan_methods`].
    pub fn scan<T: ConventionSteps>(&self) -> Result<Vec<StepDescriptor<T>>, ConfigurationError> {
        self.scan_methods(T::step_methods())
    }

    /// Turns `methods` into ordered step descriptors.
    ///
    /// Every marker is validated before anything runs. All problems found in
    /// one scan are reported together.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] when a marker's arity or argument
    /// types do not match the method, a parameterised method has no
    /// markers, or an `And` step has nothing to inherit a role from.
    pub fn scan_methods<T: 'static>(
        &self,
        methods: Vec<StepMethod<T>>,
    ) -> Result<Vec<StepDescriptor<T>>, ConfigurationError> {
        let mut steps = Vec::new();
        let mut errors = Vec::new();
        let mut previous: Option<Role> = None;
        for method in methods {
            let Some(role) = classify(method.name()) else {
                tracing::debug!(method = method.name(), "skipping method without a role prefix");
                continue;
            };
            let effective_role = match (role, previous) {
                (Role::And, Some(inherited)) => inherited,
                (Role::And, None) => {
                    errors.push(ConfigurationError::DanglingAnd {
                        method: method.name().to_owned(),
                    });
                    continue;
                }
                (declared, _) => declared,
            };
            previous = Some(effective_role);
            for arguments in resolve_tuples(&method, &mut errors) {
                let invoker = method.invoker();
                let bound = arguments.clone();
                let parts = StepParts {
                    role,
                    effective_role,
                    ordinal: steps.len() + 1,
                    method: method.name(),
                    title: method.title(),
                    arguments,
                };
                steps.push(StepDescriptor::new(
                    parts,
                    &self.formatter,
                    Box::new(move |target: &mut T| invoker(target, &bound)),
                ));
            }
        }
        match ConfigurationError::collapse(errors) {
            Some(err) => Err(err),
            None => Ok(steps),
        }
    }
}

/// Argument tuples `method` fans out into, recording any mismatches.
fn resolve_tuples<T>(
    method: &StepMethod<T>,
    errors: &mut Vec<ConfigurationError>,
) -> Vec<Vec<ArgumentSnapshot>> {
    let parameters = method.parameters();
    if method.markers().is_empty() {
        if parameters.is_empty() {
            return vec![Vec::new()];
        }
        errors.push(ConfigurationError::MissingArguments {
            method: method.name().to_owned(),
            expected: parameters.len(),
        });
        return Vec::new();
    }
    let mut tuples = Vec::with_capacity(method.markers().len());
    for (index, marker) in method.markers().iter().enumerate() {
        match check_marker(method, index + 1, marker) {
            Ok(()) => tuples.push(marker.clone()),
            Err(err) => errors.push(err),
        }
    }
    tuples
}

fn check_marker<T>(
    method: &StepMethod<T>,
    marker: usize,
    arguments: &[ArgumentSnapshot],
) -> Result<(), ConfigurationError> {
    let parameters = method.parameters();
    if arguments.len() != parameters.len() {
        return Err(ConfigurationError::ArityMismatch {
            method: method.name().to_owned(),
            marker,
            expected: parameters.len(),
            actual: arguments.len(),
        });
    }
    let mismatch = parameters
        .iter()
        .zip(arguments)
        .find(|(parameter, argument)| !parameter.accepts(argument));
    if let Some((parameter, argument)) = mismatch {
        return Err(ConfigurationError::TypeMismatch {
            method: method.name().to_owned(),
            marker,
            parameter: parameter.name().to_owned(),
            expected: parameter.type_name(),
            actual: argument.type_name(),
        });
    }
    Ok(())
}

/// Runs a convention fixture as a single-scenario story.
pub trait Bddify: ConventionSteps {
    /// Scans and runs the fixture, titling the scenario after its type.
    ///
    /// # Errors
    ///
    /// Returns [`crate::BddifyError::Configuration`] when scanning fails and
    /// [`crate::BddifyError::Settings`] when settings cannot be loaded. Step
    /// failures are reported in the returned [`Story`], not as errors.
    fn bddify(self) -> BddifyResult<Story> {
        let scenario_title = title::type_title::<Self>();
        self.bddify_titled(&scenario_title)
    }

    /// Scans and runs the fixture with an explicit scenario title.
    ///
    /// The title is used verbatim.
    ///
    /// # Errors
    ///
    /// As for [`Bddify::bddify`].
    fn bddify_titled(self, scenario_title: &str) -> BddifyResult<Story> {
        let settings = BddifySettings::load()?;
        let steps = ConventionScanner::new(&settings).scan::<Self>()?;
        Ok(Story::single(
            title::type_title::<Self>(),
            Self::narrative(),
            scenario_title,
            self,
            steps,
        ))
    }
}

impl<T: ConventionSteps> Bddify for T {}

#[cfg(test)]
mod tests;
