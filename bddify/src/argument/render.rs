//! Rendering rules for values bound to step parameters.

/// Text written for `None` when no null text is configured.
pub(crate) const NULL_TEXT: &str = "null";

/// Value that can be bound to a step parameter.
///
/// Implementations decide how the value appears when substituted into a step
/// title. Enums should derive this trait with
/// [`#[derive(StepArgument)]`](macro@crate::StepArgument) so they render by
/// variant name.
///
/// # Examples
///
/// ```
/// use bddify::StepArgument;
///
/// assert_eq!(42_u8.render(), "42");
/// assert_eq!(Some("ok").render(), "ok");
/// assert_eq!(None::<i32>.render(), "null");
/// assert_eq!(vec![Some(1), None].render(), "[1, null]");
/// ```
pub trait StepArgument: Clone + 'static {
    /// Whether the value is a materialized lazy sequence.
    const IS_SEQUENCE: bool = false;

    /// Renders the value for title substitution.
    fn render(&self) -> String;

    /// Renders the value, writing `null_text` for any `None` it contains.
    ///
    /// Only containers need to override this; scalar values render the same
    /// whatever the null text.
    fn render_with(&self, _null_text: &str) -> String {
        self.render()
    }

    /// Whether the value represents an absent (null) argument.
    fn is_null(&self) -> bool {
        false
    }
}

macro_rules! display_arguments {
    ($($ty:ty),* $(,)?) => {
        $(
            impl StepArgument for $ty {
                fn render(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

display_arguments!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char,
    String,
);

impl StepArgument for &'static str {
    fn render(&self) -> String {
        (*self).to_owned()
    }
}

impl<T: StepArgument> StepArgument for Option<T> {
    const IS_SEQUENCE: bool = T::IS_SEQUENCE;

    fn render(&self) -> String {
        self.render_with(NULL_TEXT)
    }

    fn render_with(&self, null_text: &str) -> String {
        self.as_ref()
            .map_or_else(|| null_text.to_owned(), |value| value.render_with(null_text))
    }

    fn is_null(&self) -> bool {
        self.is_none()
    }
}

impl<T: StepArgument> StepArgument for Vec<T> {
    fn render(&self) -> String {
        render_items(self, NULL_TEXT)
    }

    fn render_with(&self, null_text: &str) -> String {
        render_items(self, null_text)
    }
}

impl<T: StepArgument, const N: usize> StepArgument for [T; N] {
    fn render(&self) -> String {
        render_items(self, NULL_TEXT)
    }

    fn render_with(&self, null_text: &str) -> String {
        render_items(self, null_text)
    }
}

impl<T: StepArgument> StepArgument for &'static [T] {
    fn render(&self) -> String {
        render_items(*self, NULL_TEXT)
    }

    fn render_with(&self, null_text: &str) -> String {
        render_items(*self, null_text)
    }
}

impl<R: 'static> StepArgument for fn() -> R {
    fn render(&self) -> String {
        String::from("fn")
    }
}

/// Renders a collection as `[a, b, c]`.
pub(crate) fn render_items<'a, T, I>(items: I, null_text: &str) -> String
where
    T: StepArgument,
    I: IntoIterator<Item = &'a T>,
{
    let rendered: Vec<String> = items
        .into_iter()
        .map(|item| item.render_with(null_text))
        .collect();
    format!("[{}]", rendered.join(", "))
}
