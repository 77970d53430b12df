//! Test helpers shared across crates in the bddify workspace.
//!
//! [`figment`] wraps `figment::Jail` for settings tests and [`recorder`]
//! provides a call log for checking which steps ran.

pub mod figment;
pub mod recorder;

pub use recorder::CallLog;
