//! Core crate for the `bddify` scenario engine.
//!
//! A fixture is a plain type whose methods act as Given/When/Then steps. Steps
//! are discovered in one of two ways and then executed by the same runner:
//!
//! - **Convention**: annotate an inherent `impl` block with [`steps`]. Method
//!   names starting with `given`, `when`, `then` or `and` become steps in
//!   declaration order, and `#[with_args(...)]` markers fan a method out into
//!   one step per argument tuple.
//! - **Fluent**: register calls explicitly with [`FluentScanner`] and the
//!   [`step!`] macro, which captures argument values at registration time.
//!
//! ```rust
//! use bddify::{Bddify, steps};
//!
//! #[derive(Default)]
//! struct Counter {
//!     total: u32,
//! }
//!
//! #[steps]
//! impl Counter {
//!     #[with_args(2)]
//!     #[with_args(3)]
//!     fn given_an_increment(&mut self, by: u32) {
//!         self.total += by;
//!     }
//!
//!     fn then_the_total_is_five(&self) {
//!         assert_eq!(self.total, 5);
//!     }
//! }
//!
//! # fn main() -> bddify::BddifyResult<()> {
//! let story = Counter::default().bddify()?;
//! story.ensure_passed()?;
//! # Ok(())
//! # }
//! ```
//!
//! Both discovery modes title the story after the fixture type. The scenario
//! takes the fixture type name too, unless it is run through [`bddify!`],
//! which titles it after the calling function, or given a title explicitly.
//!
//! The procedural macros live in the companion `bddify_macros` crate.

pub use bddify_macros::{StepArgument, steps};

mod argument;
mod convention;
mod error;
mod fluent;
mod report;
mod runner;
mod settings;
mod step;
mod story;
pub mod title;

pub use argument::{ArgumentSnapshot, Provenance, Sequence, StepArgument, sequence};
pub use convention::{
    Bddify, ConventionScanner, ConventionSteps, Parameter, StepInvoker, StepMethod, classify,
};
pub use error::{
    AggregatedErrors, BddifyError, BddifyResult, ConfigurationError, StepFailure,
};
pub use fluent::{FluentScanner, Invocation};
pub use report::{ScenarioReport, StepReport, StoryReport};
pub use runner::{ScenarioResult, ScenarioRunner, ScenarioStatus, StepResult, StepStatus};
pub use settings::BddifySettings;
pub use step::{IntoStepOutcome, Role, StepDescriptor, StepDetails};
pub use story::{Narrative, Scenario, Story};
pub use title::TitleFormatter;

#[doc(hidden)]
pub mod __private {
    //! Support items referenced by macro expansions. Not part of the public API.

    pub use crate::argument::{Captured, bind};
    pub use crate::step::StepCallable;
}
