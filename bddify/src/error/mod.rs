//! Error types produced while scanning, running, and reporting scenarios.

mod aggregate;
mod failure;
mod types;

pub use aggregate::AggregatedErrors;
pub use failure::StepFailure;
pub use types::{BddifyError, BddifyResult, ConfigurationError};

#[cfg(test)]
mod tests;
