//! Aggregation container for several [`ConfigurationError`] values.

use std::{error::Error, fmt};

use super::ConfigurationError;

/// Collection of [`ConfigurationError`]s produced during a single scan.
///
/// # Examples
///
/// ```
/// use bddify::ConfigurationError;
///
/// let err = ConfigurationError::collapse(vec![
///     ConfigurationError::DanglingAnd { method: "and_more".into() },
///     ConfigurationError::MissingArguments { method: "given_input".into(), expected: 1 },
/// ]);
/// if let Some(ConfigurationError::Aggregate(agg)) = err {
///     assert_eq!(agg.len(), 2);
/// }
/// ```
#[derive(Debug, Default)]
pub struct AggregatedErrors(Vec<ConfigurationError>);

impl AggregatedErrors {
    /// Create a new aggregation from a vector of errors.
    #[must_use]
    pub const fn new(errors: Vec<ConfigurationError>) -> Self {
        Self(errors)
    }

    /// Iterate over the contained errors.
    #[must_use = "iterators should be consumed to inspect errors"]
    pub fn iter(&self) -> std::slice::Iter<'_, ConfigurationError> {
        self.0.iter()
    }

    /// Number of errors in the aggregation.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the aggregation holds no errors.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AggregatedErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {e}", i + 1)?;
        }
        Ok(())
    }
}

impl Error for AggregatedErrors {}

impl<'a> IntoIterator for &'a AggregatedErrors {
    type Item = &'a ConfigurationError;
    type IntoIter = std::slice::Iter<'a, ConfigurationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for AggregatedErrors {
    type Item = ConfigurationError;
    type IntoIter = std::vec::IntoIter<ConfigurationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
