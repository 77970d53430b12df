//! Procedural macros for `bddify`.
//!
//! `#[steps]` registers the step methods of an inherent `impl` block so the
//! convention scanner can discover them, and `#[derive(StepArgument)]` lets
//! unit enums appear in step titles by variant name.

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemImpl, parse_macro_input};

mod crate_path;
mod registration;
mod step_argument;

/// Registers the step methods of an inherent `impl` block.
///
/// Every non-generic method taking `&self` or `&mut self` whose name starts
/// with `given`, `when`, `then`, or `and` is listed in declaration order.
/// Methods may carry these helper attributes, which are removed from the
/// output:
///
/// - `#[with_args(a, b, ...)]` supplies one argument tuple. Repeat it to run
///   the method once per tuple.
/// - `#[step_title("...")]` sets an explicit title; `{0}`, `{1}`, ... are
///   replaced with the rendered arguments.
/// - `#[not_a_step]` excludes a method that would otherwise be registered.
///
/// The attribute itself accepts `crate = "path"` for renamed dependencies and
/// `as_a`, `i_want`, `so_that` to attach a story narrative.
#[proc_macro_attribute]
pub fn steps(attr: TokenStream, item: TokenStream) -> TokenStream {
    let item = parse_macro_input!(item as ItemImpl);
    registration::expand(attr.into(), item)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Derives `StepArgument` for an enum whose variants carry no data.
///
/// Each variant renders as its name. Use `#[bddify(crate = "path")]` when the
/// runtime crate is renamed.
#[proc_macro_derive(StepArgument, attributes(bddify))]
pub fn derive_step_argument(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    step_argument::derive(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

#[cfg(test)]
mod tests;
