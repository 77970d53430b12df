//! A single fluent registration: one method call with captured arguments.

use std::fmt;

use crate::argument::ArgumentSnapshot;
use crate::error::StepFailure;
use crate::step::{IntoStepOutcome, StepCallable};

/// One "invoke method M with these arguments" registration.
///
/// Usually produced by [`step!`](crate::step!), which evaluates each argument
/// once and records its source text.
pub struct Invocation<T> {
    method: String,
    arguments: Vec<ArgumentSnapshot>,
    title: Option<String>,
    callable: StepCallable<T>,
}

impl<T: 'static> Invocation<T> {
    /// Creates a registration for `method` with already-evaluated arguments.
    ///
    /// `callable` must call `method` with values equal to `arguments`; the
    /// snapshots only describe the call for titles and reports.
    #[must_use]
    pub fn new<F, R>(method: impl Into<String>, arguments: Vec<ArgumentSnapshot>, callable: F) -> Self
    where
        F: Fn(&mut T) -> R + 'static,
        R: IntoStepOutcome,
    {
        Self {
            method: method.into(),
            arguments,
            title: None,
            callable: Box::new(move |target: &mut T| -> Result<(), StepFailure> {
                callable(target).into_step_outcome()
            }),
        }
    }
}

impl<T> Invocation<T> {
    /// Sets an explicit title.
    ///
    /// `{0}`, `{1}`, … are replaced with the rendered arguments; everything
    /// else is kept verbatim.
    #[must_use]
    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Name of the invoked method.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Argument snapshots in positional order.
    #[must_use]
    pub fn arguments(&self) -> &[ArgumentSnapshot] {
        &self.arguments
    }

    /// Explicit title, if set.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub(crate) fn into_parts(self) -> (String, Vec<ArgumentSnapshot>, Option<String>, StepCallable<T>) {
        (self.method, self.arguments, self.title, self.callable)
    }
}

impl<T> fmt::Debug for Invocation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invocation")
            .field("method", &self.method)
            .field("arguments", &self.arguments)
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

/// Whether `method` names exactly one method: a plain Rust identifier.
pub(crate) fn is_traceable(method: &str) -> bool {
    let mut chars = method.chars();
    chars
        .next()
        .is_some_and(|first| first.is_alphabetic() || first == '_')
        && chars.all(|ch| ch.is_alphanumeric() || ch == '_')
}
