//! Runtime settings controlling how step titles are rendered.
//!
//! Settings are layered with `figment`: built-in defaults first, then any
//! `BDDIFY_`-prefixed environment variables.

use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};

use crate::error::BddifyResult;

/// Prefix for environment variables read by [`BddifySettings::load`].
pub const ENV_PREFIX: &str = "BDDIFY_";

/// Title rendering settings.
///
/// # Examples
///
/// ```
/// use bddify::BddifySettings;
///
/// let settings = BddifySettings::default();
/// assert_eq!(settings.null_text, "null");
/// assert_eq!(settings.argument_separator, ", ");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BddifySettings {
    /// Text substituted for a null argument in a step title.
    pub null_text: String,
    /// Separator between argument placeholders in default step titles.
    pub argument_separator: String,
}

impl Default for BddifySettings {
    fn default() -> Self {
        Self {
            null_text: String::from("null"),
            argument_separator: String::from(", "),
        }
    }
}

impl BddifySettings {
    /// Loads settings from defaults and `BDDIFY_*` environment variables.
    ///
    /// `BDDIFY_NULL_TEXT=nil` renders null arguments as `nil`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::BddifyError::Settings`] when an environment value
    /// cannot be extracted.
    pub fn load() -> BddifyResult<Self> {
        Self::figment().extract().map_err(|err| Box::new(err).into())
    }

    /// Provider stack used by [`BddifySettings::load`].
    ///
    /// Every setting is text, so environment values are merged verbatim
    /// rather than through figment's value parser, which trims them and reads
    /// `0` or `true` as non-strings. `BDDIFY_ARGUMENT_SEPARATOR=" / "` keeps
    /// its spaces.
    #[must_use]
    pub fn figment() -> Figment {
        Env::prefixed(ENV_PREFIX).iter().fold(
            Figment::from(Serialized::defaults(Self::default())),
            |layers, (key, value)| layers.merge(Serialized::default(key.as_str(), value)),
        )
    }
}
