//! `figment::Jail` helpers for settings tests.
//!
//! A jail isolates environment variables for the duration of a closure, so
//! tests can set `BDDIFY_*` variables without leaking them into other tests.

use std::fmt;

use anyhow::{Context, Result, anyhow};
use figment::Jail;

/// Runs `f` inside a [`figment::Jail`] and returns its output.
///
/// # Errors
///
/// Returns an error when the jail cannot be created or `f` fails.
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut Jail) -> figment::error::Result<T>,
{
    let mut slot = None;
    Jail::try_with(|jail| {
        slot = Some(f(jail)?);
        Ok(())
    })
    .map_err(|err| anyhow!("figment jail failed: {err}"))?;
    slot.context("jail closure produced no value")
}

/// Sets each `(key, value)` pair inside a jail, then runs `f`.
///
/// ```
/// use bddify_test_helpers::figment::with_env;
///
/// let seen = with_env(&[("BDDIFY_NULL_TEXT", "nil")], || {
///     Ok(std::env::var("BDDIFY_NULL_TEXT").ok())
/// })
/// .expect("jail should run");
/// assert_eq!(seen.as_deref(), Some("nil"));
/// ```
///
/// # Errors
///
/// As for [`with_jail`].
pub fn with_env<F, T>(vars: &[(&str, &str)], f: F) -> Result<T>
where
    F: FnOnce() -> figment::error::Result<T>,
{
    with_jail(|jail| {
        for (key, value) in vars {
            jail.set_env(key, value);
        }
        f()
    })
}

/// Converts a displayable error into a [`figment::Error`] so it can cross a
/// jail boundary.
#[expect(
    clippy::needless_pass_by_value,
    reason = "used directly as a `map_err` adapter"
)]
pub fn figment_error<E: fmt::Display>(err: E) -> figment::Error {
    figment::Error::from(err.to_string())
}
