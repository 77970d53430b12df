//! Failure captured from a single step body.

use std::any::Any;
use std::error::Error as StdError;

use thiserror::Error;

type BoxedCause = Box<dyn StdError + Send + Sync + 'static>;

/// Failure raised by a step body, either as an `Err` return or a panic.
///
/// The runner converts every failure into a [`crate::StepResult`]; a
/// `StepFailure` never escapes a scenario run as an error.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct StepFailure {
    message: String,
    panicked: bool,
    #[source]
    cause: Option<BoxedCause>,
}

impl StepFailure {
    /// Creates a failure carrying only a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            panicked: false,
            cause: None,
        }
    }

    /// Wraps an error returned by a step body.
    ///
    /// The error's display text becomes the message and the error itself is
    /// kept as the underlying cause.
    #[must_use]
    pub fn from_error(err: impl Into<BoxedCause>) -> Self {
        let cause = err.into();
        Self {
            message: cause.to_string(),
            panicked: false,
            cause: Some(cause),
        }
    }

    /// Converts a panic payload caught by the runner.
    #[must_use]
    pub fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|msg| (*msg).to_owned())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| String::from("step panicked with a non-string payload"));
        Self {
            message,
            panicked: true,
            cause: None,
        }
    }

    /// Message describing the failure.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether the step body panicked rather than returning an error.
    #[must_use]
    pub const fn panicked(&self) -> bool {
        self.panicked
    }

    /// Message followed by every nested cause, separated by `: `.
    ///
    /// The wrapped error itself is not repeated because its text already
    /// forms the message.
    #[must_use]
    pub fn detail(&self) -> String {
        let mut detail = self.message.clone();
        let mut next = self
            .cause
            .as_deref()
            .and_then(|cause| cause.source());
        while let Some(cause) = next {
            detail.push_str(": ");
            detail.push_str(&cause.to_string());
            next = cause.source();
        }
        detail
    }
}
