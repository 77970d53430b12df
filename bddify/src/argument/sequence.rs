//! Restartable snapshots of lazily-produced sequences.

use std::ops::Deref;

use super::render::{NULL_TEXT, StepArgument, render_items};

/// Fixed, ordered snapshot of a finite iterator.
///
/// A step that accepts a lazily-produced sequence takes a `Sequence<T>`
/// instead. The source iterator is consumed once, when the argument is
/// captured; the snapshot can then be iterated any number of times.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Sequence<T>(Vec<T>);

/// Materializes `source` into a [`Sequence`], consuming it exactly once.
///
/// Elements keep their iteration order, including any `None` entries.
///
/// # Examples
///
/// ```
/// use bddify::sequence;
///
/// let words = ["1", "2"].into_iter().map(Some).chain(std::iter::once(None));
/// let snapshot = sequence(words);
/// assert_eq!(snapshot.as_slice(), &[Some("1"), Some("2"), None]);
/// assert_eq!(snapshot.iter().count(), snapshot.iter().count());
/// ```
pub fn sequence<I: IntoIterator>(source: I) -> Sequence<I::Item> {
    source.into_iter().collect()
}

impl<T> Sequence<T> {
    /// Borrows the elements as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    /// Returns the elements as a vector.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.0
    }
}

impl<T> Deref for Sequence<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> FromIterator<T> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<T> IntoIterator for Sequence<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Sequence<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T: PartialEq> PartialEq<Vec<T>> for Sequence<T> {
    fn eq(&self, other: &Vec<T>) -> bool {
        self.0 == *other
    }
}

impl<T: StepArgument> StepArgument for Sequence<T> {
    const IS_SEQUENCE: bool = true;

    fn render(&self) -> String {
        render_items(&self.0, NULL_TEXT)
    }

    fn render_with(&self, null_text: &str) -> String {
        render_items(&self.0, null_text)
    }
}
