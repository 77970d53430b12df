//! Argument capture: binds step parameters to values and renderable text.
//!
//! Every argument is evaluated once, when the step is registered, and stored
//! as an [`ArgumentSnapshot`]. The snapshot keeps the value, a rendered form
//! used in step titles, and a [`Provenance`] tag describing the expression
//! the value came from.

mod provenance;
mod render;
mod sequence;

use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::rc::Rc;

pub use provenance::Provenance;
pub use render::StepArgument;
pub use sequence::{Sequence, sequence};

use crate::error::StepFailure;

/// Immutable snapshot of one step argument.
#[derive(Clone)]
pub struct ArgumentSnapshot {
    value: Rc<dyn Any>,
    type_id: TypeId,
    type_name: &'static str,
    provenance: Provenance,
    source: Option<String>,
    rendered: String,
    renderer: fn(&dyn Any, &str) -> String,
    null: bool,
}

impl ArgumentSnapshot {
    /// Captures `value` read from the expression `source`.
    ///
    /// Provenance is inferred from `source`, except that sequence values are
    /// always tagged [`Provenance::Sequence`].
    #[must_use]
    pub fn capture<V: StepArgument>(value: V, source: &str) -> Self {
        let provenance = Provenance::infer(source);
        Self::build(value, provenance, Some(source.to_owned()))
    }

    /// Captures a value declared inline, such as a `#[with_args]` marker.
    #[must_use]
    pub fn literal<V: StepArgument>(value: V) -> Self {
        Self::build(value, Provenance::Literal, None)
    }

    /// Captures `value` with an explicit provenance tag.
    #[must_use]
    pub fn with_provenance<V: StepArgument>(value: V, provenance: Provenance) -> Self {
        Self::build(value, provenance, None)
    }

    fn build<V: StepArgument>(value: V, provenance: Provenance, source: Option<String>) -> Self {
        let rendered = value.render();
        let null = value.is_null();
        Self {
            value: Rc::new(value),
            type_id: TypeId::of::<V>(),
            type_name: type_name::<V>(),
            provenance: if V::IS_SEQUENCE {
                Provenance::Sequence
            } else {
                provenance
            },
            source,
            rendered,
            renderer: render_erased::<V>,
            null,
        }
    }

    /// Returns a copy of the value when it has type `V`.
    #[must_use]
    pub fn value<V: Clone + 'static>(&self) -> Option<V> {
        self.value.downcast_ref::<V>().cloned()
    }

    /// Whether the captured value has type `V`.
    #[must_use]
    pub fn is<V: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<V>()
    }

    /// Type identifier of the captured value.
    #[must_use]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Rust type name of the captured value.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// How the value was obtained.
    #[must_use]
    pub const fn provenance(&self) -> Provenance {
        self.provenance
    }

    /// Source text of the argument expression, when known.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Rendered form used for title substitution, with `None` written as
    /// `null`.
    #[must_use]
    pub fn rendered(&self) -> &str {
        &self.rendered
    }

    /// Renders the value again, writing `null_text` for every `None` it
    /// holds, including those nested inside collections.
    ///
    /// ```
    /// use bddify::ArgumentSnapshot;
    ///
    /// let snapshot = ArgumentSnapshot::literal(vec![Some(1), None]);
    /// assert_eq!(snapshot.rendered(), "[1, null]");
    /// assert_eq!(snapshot.render_with("nil"), "[1, nil]");
    /// ```
    #[must_use]
    pub fn render_with(&self, null_text: &str) -> String {
        (self.renderer)(&*self.value, null_text)
    }

    /// Whether the argument is null (`None`).
    #[must_use]
    pub const fn is_null(&self) -> bool {
        self.null
    }
}

fn render_erased<V: StepArgument>(value: &dyn Any, null_text: &str) -> String {
    value
        .downcast_ref::<V>()
        .map_or_else(String::new, |typed| typed.render_with(null_text))
}

impl fmt::Debug for ArgumentSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgumentSnapshot")
            .field("type_name", &self.type_name)
            .field("provenance", &self.provenance)
            .field("source", &self.source)
            .field("rendered", &self.rendered)
            .field("null", &self.null)
            .finish_non_exhaustive()
    }
}

/// Typed argument bound by the `step!` macro.
///
/// Holds the evaluated value so the step can be invoked with the exact type
/// its parameter expects, alongside the type-erased snapshot used for titles
/// and reporting.
#[derive(Debug)]
pub struct Captured<V> {
    value: V,
    snapshot: ArgumentSnapshot,
}

impl<V: StepArgument> Captured<V> {
    /// Wraps a value already evaluated from the expression `source`.
    #[must_use]
    pub fn new(value: V, source: &str) -> Self {
        let snapshot = ArgumentSnapshot::capture(value.clone(), source);
        Self { value, snapshot }
    }

    /// Snapshot describing the value.
    #[must_use]
    pub fn snapshot(&self) -> ArgumentSnapshot {
        self.snapshot.clone()
    }

    /// Fresh copy of the value for one invocation.
    #[must_use]
    pub fn get(&self) -> V {
        self.value.clone()
    }
}

/// Reads the argument at `position` as `V` for a convention step invoker.
///
/// # Errors
///
/// Returns a [`StepFailure`] when the position is out of range or the value
/// has a different type. Scanning validates both up front, so this only
/// fires for hand-built step methods that bypass validation.
pub fn bind<V: StepArgument>(arguments: &[ArgumentSnapshot], position: usize) -> Result<V, StepFailure> {
    let snapshot = arguments.get(position).ok_or_else(|| {
        StepFailure::new(format!("no argument bound at position {position}"))
    })?;
    snapshot.value::<V>().ok_or_else(|| {
        StepFailure::new(format!(
            "argument {position} is `{}`, expected `{}`",
            snapshot.type_name(),
            type_name::<V>()
        ))
    })
}
