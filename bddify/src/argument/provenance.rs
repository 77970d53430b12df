//! Classifies how a step argument was obtained from its expression text.

use serde::Serialize;

/// How the caller obtained an argument value.
///
/// Provenance is descriptive metadata. It never changes how a step runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Provenance {
    /// Written inline: numbers, strings, `None`, array literals, constants.
    Literal,
    /// Read from a local binding, or computed by the caller.
    Variable,
    /// Read from a field (`fixture.inputs`).
    Field,
    /// Read through a zero-argument accessor (`fixture.inputs()`).
    Property,
    /// Materialized from a lazily-produced sequence.
    Sequence,
}

/// Conversions that copy a value without changing where it came from.
const PASS_THROUGH: [&str; 5] = [".clone()", ".to_owned()", ".to_string()", ".to_vec()", ".into()"];

impl Provenance {
    /// Infers provenance from the source text of an argument expression.
    ///
    /// # Examples
    ///
    /// ```
    /// use bddify::Provenance;
    ///
    /// assert_eq!(Provenance::infer("\"1\""), Provenance::Literal);
    /// assert_eq!(Provenance::infer("input1"), Provenance::Variable);
    /// assert_eq!(Provenance::infer("fixture.inputs.clone()"), Provenance::Field);
    /// assert_eq!(Provenance::infer("fixture.inputs()"), Provenance::Property);
    /// ```
    #[must_use]
    pub fn infer(source: &str) -> Self {
        let text = strip_borrow(source.trim());
        if let Some(inner) = PASS_THROUGH
            .iter()
            .find_map(|suffix| text.strip_suffix(suffix))
        {
            return Self::infer(inner);
        }
        if is_literal(text) || is_path(text, "::") {
            Self::Literal
        } else if is_identifier(text) {
            Self::Variable
        } else if text.strip_suffix("()").is_some_and(|receiver| is_path(receiver, ".")) {
            Self::Property
        } else if is_path(text, ".") {
            Self::Field
        } else {
            Self::Variable
        }
    }
}

fn strip_borrow(text: &str) -> &str {
    text.strip_prefix('&')
        .map_or(text, |rest| rest.trim_start().trim_start_matches("mut ").trim_start())
}

fn is_literal(text: &str) -> bool {
    if matches!(text, "true" | "false" | "None") {
        return true;
    }
    if let Some(inner) = text.strip_prefix("Some(").and_then(|rest| rest.strip_suffix(')')) {
        return is_literal(strip_borrow(inner.trim()));
    }
    if text.starts_with("vec!") {
        return true;
    }
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some('"' | '\'' | '['), _) => true,
        (Some(first), _) if first.is_ascii_digit() => true,
        (Some('-'), Some(second)) => second.is_ascii_digit(),
        (Some('b' | 'r'), Some('"' | '\'' | '#')) => true,
        _ => false,
    }
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    chars
        .next()
        .is_some_and(|first| first.is_alphabetic() || first == '_')
        && chars.all(|ch| ch.is_alphanumeric() || ch == '_')
}

/// Whether `text` is two or more identifiers (or tuple indices) joined by
/// `separator`.
fn is_path(text: &str, separator: &str) -> bool {
    let mut segments = text.split(separator).map(str::trim);
    let Some(head) = segments.next() else {
        return false;
    };
    let mut tail = segments.peekable();
    is_identifier(head)
        && tail.peek().is_some()
        && tail.all(|segment| {
            is_identifier(segment)
                || (!segment.is_empty() && segment.chars().all(|ch| ch.is_ascii_digit()))
        })
}
