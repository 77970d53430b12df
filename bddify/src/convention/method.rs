//! Static registration records for convention step methods.

use std::any::{TypeId, type_name};
use std::fmt;
use std::rc::Rc;

use crate::argument::ArgumentSnapshot;
use crate::error::StepFailure;

/// Invokes a step method with a bound argument tuple.
pub type StepInvoker<T> = Rc<dyn Fn(&mut T, &[ArgumentSnapshot]) -> Result<(), StepFailure>>;

/// Declared parameter of a step method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parameter {
    name: &'static str,
    type_id: Option<TypeId>,
    type_name: &'static str,
}

impl Parameter {
    /// Parameter of type `V`; marker arguments must have exactly this type.
    #[must_use]
    pub fn of<V: ?Sized + 'static>(name: &'static str) -> Self {
        Self {
            name,
            type_id: Some(TypeId::of::<V>()),
            type_name: type_name::<V>(),
        }
    }

    /// Parameter whose type cannot be named, such as `impl Trait`.
    ///
    /// Only the arity of markers is checked against it.
    #[must_use]
    pub const fn opaque(name: &'static str) -> Self {
        Self {
            name,
            type_id: None,
            type_name: "_",
        }
    }

    /// Parameter name as written in the method signature.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Declared type name.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Whether `argument` can be passed to this parameter.
    #[must_use]
    pub fn accepts(&self, argument: &ArgumentSnapshot) -> bool {
        self.type_id.is_none_or(|id| id == argument.type_id())
    }
}

/// One step-producing method of a fixture, as registered by `#[steps]`.
pub struct StepMethod<T> {
    name: &'static str,
    parameters: Vec<Parameter>,
    markers: Vec<Vec<ArgumentSnapshot>>,
    title: Option<String>,
    invoker: StepInvoker<T>,
}

impl<T> StepMethod<T> {
    /// Registers `name` with the closure that calls it.
    ///
    /// # Examples
    ///
    /// ```
    /// use bddify::{ArgumentSnapshot, Parameter, StepMethod, __private::bind};
    ///
    /// #[derive(Default)]
    /// struct Fixture {
    ///     seen: Vec<i32>,
    /// }
    ///
    /// let method = StepMethod::<Fixture>::new("given_an_input", |target, args| {
    ///     target.seen.push(bind(args, 0)?);
    ///     Ok(())
    /// })
    /// .parameter(Parameter::of::<i32>("input"))
    /// .with_args(vec![ArgumentSnapshot::literal(7_i32)]);
    /// assert_eq!(method.markers().len(), 1);
    /// ```
    #[must_use]
    pub fn new<F>(name: &'static str, invoker: F) -> Self
    where
        F: Fn(&mut T, &[ArgumentSnapshot]) -> Result<(), StepFailure> + 'static,
    {
        Self {
            name,
            parameters: Vec::new(),
            markers: Vec::new(),
            title: None,
            invoker: Rc::new(invoker),
        }
    }

    /// Appends a declared parameter.
    #[must_use]
    pub fn parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Appends an argument-tuple marker.
    #[must_use]
    pub fn with_args(mut self, arguments: Vec<ArgumentSnapshot>) -> Self {
        self.markers.push(arguments);
        self
    }

    /// Sets an explicit title template.
    #[must_use]
    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Method name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Declared parameters in positional order.
    #[must_use]
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Argument tuples in declaration order.
    #[must_use]
    pub fn markers(&self) -> &[Vec<ArgumentSnapshot>] {
        &self.markers
    }

    /// Explicit title template, if any.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub(crate) fn invoker(&self) -> StepInvoker<T> {
        Rc::clone(&self.invoker)
    }
}

impl<T> fmt::Debug for StepMethod<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepMethod")
            .field("name", &self.name)
            .field("parameters", &self.parameters)
            .field("markers", &self.markers)
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}
