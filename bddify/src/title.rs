//! Human-readable titles for steps, scenarios, and stories.
//!
//! Identifiers are split into words with `heck`, so `snake_case` method names
//! and `CamelCase` type names humanize the same way:
//!
//! ```
//! use bddify::title;
//!
//! assert_eq!(
//!     title::humanize("WhenTitleIsNotProvidedItIsFetchedFromMethodName"),
//!     "When title is not provided it is fetched from method name",
//! );
//! assert_eq!(title::step_title("given_primitive_inputs"), "primitive inputs");
//! ```

use heck::ToSnakeCase;

use crate::argument::ArgumentSnapshot;
use crate::settings::BddifySettings;
use crate::step::Role;

/// Splits an identifier into lower-case words.
#[must_use]
pub fn words(identifier: &str) -> Vec<String> {
    identifier
        .to_snake_case()
        .split('_')
        .filter(|word| !word.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Turns an identifier into a sentence: first word capitalised, the rest
/// lower-case, separated by single spaces.
#[must_use]
pub fn humanize(identifier: &str) -> String {
    capitalise(&words(identifier).join(" "))
}

/// Turns a step method name into step text without its role keyword.
///
/// The role is reported next to the text, so `given_primitive_inputs`
/// becomes `primitive inputs`. A name made only of a keyword yields an empty
/// string.
#[must_use]
pub fn step_title(identifier: &str) -> String {
    let all = words(identifier);
    let skip = usize::from(
        all.first()
            .is_some_and(|word| Role::from_keyword(word).is_some()),
    );
    all.into_iter().skip(skip).collect::<Vec<_>>().join(" ")
}

/// Humanized name of a fixture type, without its module path or generics.
#[must_use]
pub fn type_title<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    let without_generics = full.split('<').next().unwrap_or(full);
    let short = without_generics
        .rsplit("::")
        .next()
        .unwrap_or(without_generics);
    humanize(short)
}

/// Humanized name of the function that owns the item at `item_path`.
///
/// `item_path` is the type name of an item declared inside that function,
/// as produced by [`scenario_title!`](crate::scenario_title). The item's
/// own segment and any closure segments are dropped, so
/// `tests::when_title_is_missing::here` becomes `When title is missing`.
#[must_use]
pub fn function_title(item_path: &str) -> String {
    let owner = item_path
        .rsplit("::")
        .skip(1)
        .find(|segment| !segment.starts_with('{'))
        .unwrap_or(item_path);
    humanize(owner)
}

fn capitalise(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Renders step titles from templates and argument snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleFormatter {
    null_text: String,
    separator: String,
}

impl Default for TitleFormatter {
    fn default() -> Self {
        Self::new(&BddifySettings::default())
    }
}

impl TitleFormatter {
    /// Creates a formatter using the rendering options in `settings`.
    #[must_use]
    pub fn new(settings: &BddifySettings) -> Self {
        Self {
            null_text: settings.null_text.clone(),
            separator: settings.argument_separator.clone(),
        }
    }

    /// Template used when a step has no explicit title.
    ///
    /// The step text is followed by one placeholder per argument:
    ///
    /// ```
    /// use bddify::TitleFormatter;
    ///
    /// let formatter = TitleFormatter::default();
    /// assert_eq!(
    ///     formatter.default_template("given_primitive_inputs", 2),
    ///     "primitive inputs {0}, {1}",
    /// );
    /// ```
    #[must_use]
    pub fn default_template(&self, identifier: &str, arity: usize) -> String {
        let text = step_title(identifier);
        if arity == 0 {
            return text;
        }
        let placeholders: Vec<String> = (0..arity).map(|i| format!("{{{i}}}")).collect();
        let joined = placeholders.join(&self.separator);
        if text.is_empty() {
            joined
        } else {
            format!("{text} {joined}")
        }
    }

    /// Substitutes `{n}` placeholders with the n-th argument's rendered form.
    ///
    /// Every `None`, at the top level or inside a collection, is written as
    /// the configured null text.
    ///
    /// Placeholders without a matching argument, and braces that do not form
    /// a placeholder, are kept as literal text.
    #[must_use]
    pub fn format(&self, template: &str, arguments: &[ArgumentSnapshot]) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        while let Some((before, after)) = rest.split_once('{') {
            out.push_str(before);
            let substituted = after.split_once('}').and_then(|(inner, remainder)| {
                let snapshot = placeholder_index(inner).and_then(|i| arguments.get(i))?;
                Some((snapshot, remainder))
            });
            if let Some((snapshot, remainder)) = substituted {
                out.push_str(&self.render(snapshot));
                rest = remainder;
            } else {
                out.push('{');
                rest = after;
            }
        }
        out.push_str(rest);
        out
    }

    fn render(&self, snapshot: &ArgumentSnapshot) -> String {
        snapshot.render_with(&self.null_text)
    }
}

fn placeholder_index(inner: &str) -> Option<usize> {
    if inner.is_empty() || !inner.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    inner.parse().ok()
}
