//! Unit tests for the `#[steps]` and `StepArgument` token generators.

use anyhow::{Result, anyhow, ensure};
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use rstest::rstest;
use syn::{DeriveInput, ItemImpl, parse_quote};

use crate::registration::expand;
use crate::step_argument::derive;

fn expand_ok(attr: TokenStream2, item: ItemImpl) -> Result<String> {
    expand(attr, item)
        .map(|tokens| tokens.to_string())
        .map_err(|err| anyhow!("expansion failed: {err}"))
}

fn expand_err(attr: TokenStream2, item: ItemImpl) -> Result<String> {
    match expand(attr, item) {
        Ok(tokens) => Err(anyhow!("expected an error, got {tokens}")),
        Err(err) => Ok(err.to_string()),
    }
}

#[rstest]
fn steps_registers_marked_methods_and_strips_helpers() -> Result<()> {
    let item: ItemImpl = parse_quote! {
        impl Counter {
            #[with_args(2)]
            fn when_adding(&mut self, amount: u32) {
                self.total += amount;
            }

            fn helper(&self) {}
        }
    };
    let tokens = expand_ok(quote! {}, item)?;
    let expected = quote! {
        impl Counter {
            fn when_adding(&mut self, amount: u32) {
                self.total += amount;
            }

            fn helper(&self) {}
        }
        impl bddify::ConventionSteps for Counter {
            fn step_methods() -> ::std::vec::Vec<bddify::StepMethod<Self>> {
                ::std::vec![
                    bddify::StepMethod::<Self>::new(
                        "when_adding",
                        |target: &mut Self, arguments: &[bddify::ArgumentSnapshot]| {
                            bddify::IntoStepOutcome::into_step_outcome(
                                Self::when_adding(target, bddify::__private::bind(arguments, 0usize)?)
                            )
                        },
                    )
                    .parameter(bddify::Parameter::of::<u32>("amount"))
                    .with_args(::std::vec![bddify::ArgumentSnapshot::literal::<u32>(2)])
                ]
            }
        }
    };
    ensure!(
        tokens == expected.to_string(),
        "generated tokens differ: {tokens} != {expected}"
    );
    Ok(())
}

#[rstest]
fn methods_are_listed_in_declaration_order() -> Result<()> {
    let item: ItemImpl = parse_quote! {
        impl Fixture {
            fn given_a(&mut self) {}
            fn when_b(&mut self) {}
            fn and_c(&self) {}
            fn then_d(&self) {}
        }
    };
    let tokens = expand_ok(quote! {}, item)?;
    let positions: Vec<Option<usize>> = ["\"given_a\"", "\"when_b\"", "\"and_c\"", "\"then_d\""]
        .iter()
        .map(|name| tokens.find(name))
        .collect();
    ensure!(positions.iter().all(Option::is_some), "missing step: {tokens}");
    ensure!(positions.is_sorted(), "steps out of order: {tokens}");
    Ok(())
}

#[rstest]
#[case::no_prefix(quote! { fn setup(&mut self) {} })]
#[case::associated(quote! { fn given_new() -> Self { Self } })]
#[case::by_value(quote! { fn given_consumed(self) {} })]
#[case::generic(quote! { fn given_generic<T: Default>(&mut self) {} })]
#[case::excluded(quote! { #[not_a_step] fn given_helper(&mut self) {} })]
#[case::prefix_lookalike(quote! { fn thence_onwards(&self) {} })]
fn non_step_methods_are_not_registered(#[case] method: TokenStream2) -> Result<()> {
    let item: ItemImpl = parse_quote! {
        impl Fixture {
            #method
        }
    };
    let tokens = expand_ok(quote! {}, item)?;
    ensure!(
        tokens.contains(":: std :: vec ! []"),
        "expected an empty registration: {tokens}"
    );
    ensure!(!tokens.contains("not_a_step"), "helper attribute should be stripped");
    Ok(())
}

#[rstest]
fn repeated_markers_and_titles_are_emitted_in_order() -> Result<()> {
    let item: ItemImpl = parse_quote! {
        impl Fixture {
            #[with_args(1, "one")]
            #[with_args(2, "two")]
            #[step_title("Using {0} and {1}")]
            fn given_inputs(&mut self, number: i32, word: &str) {}
        }
    };
    let tokens = expand_ok(quote! {}, item)?;
    let first = tokens
        .find("literal :: < i32 > (1)")
        .ok_or_else(|| anyhow!("first marker missing: {tokens}"))?;
    let second = tokens
        .find("literal :: < i32 > (2)")
        .ok_or_else(|| anyhow!("second marker missing: {tokens}"))?;
    ensure!(first < second, "markers out of order");
    ensure!(
        tokens.contains("literal :: < & str > (\"one\")"),
        "typed string marker missing: {tokens}"
    );
    ensure!(
        tokens.contains(". titled (\"Using {0} and {1}\")"),
        "title missing: {tokens}"
    );
    ensure!(!tokens.contains("# [with_args"), "markers should be stripped");
    ensure!(!tokens.contains("# [step_title"), "title attribute should be stripped");
    Ok(())
}

#[rstest]
fn surplus_marker_values_are_left_for_runtime_arity_checks() -> Result<()> {
    let item: ItemImpl = parse_quote! {
        impl Fixture {
            #[with_args(1, 2)]
            fn given_one(&mut self, value: i32) {}
        }
    };
    let tokens = expand_ok(quote! {}, item)?;
    ensure!(
        tokens.contains(
            "with_args (:: std :: vec ! [bddify :: ArgumentSnapshot :: literal :: < i32 > (1) , bddify :: ArgumentSnapshot :: literal (2)])"
        ),
        "unexpected marker tokens: {tokens}"
    );
    Ok(())
}

#[rstest]
fn narrative_and_crate_path_options_are_applied() -> Result<()> {
    let item: ItemImpl = parse_quote! {
        impl Fixture {
            fn given_a(&mut self) {}
        }
    };
    let attr = quote! {
        crate = "renamed", as_a = "tester", i_want = "narratives", so_that = "stories read well"
    };
    let tokens = expand_ok(attr, item)?;
    ensure!(
        tokens.contains("impl renamed :: ConventionSteps for Fixture"),
        "crate path not applied: {tokens}"
    );
    ensure!(!tokens.contains("bddify ::"), "default path leaked: {tokens}");
    ensure!(
        tokens.contains(
            "renamed :: Narrative :: new (\"tester\" , \"narratives\" , \"stories read well\")"
        ),
        "narrative missing: {tokens}"
    );
    Ok(())
}

#[rstest]
#[case::partial_narrative(quote! { as_a = "tester" }, "must be given together")]
#[case::unknown_option(quote! { story = "x" }, "unsupported steps option")]
fn invalid_options_are_rejected(#[case] attr: TokenStream2, #[case] message: &str) -> Result<()> {
    let item: ItemImpl = parse_quote! {
        impl Fixture {}
    };
    let err = expand_err(attr, item)?;
    ensure!(err.contains(message), "unexpected error: {err}");
    Ok(())
}

#[rstest]
#[case::trait_impl(
    parse_quote! { impl Default for Fixture { fn default() -> Self { Self } } },
    "inherent impl blocks"
)]
#[case::helper_on_non_step(
    parse_quote! { impl Fixture { #[with_args(1)] fn setup(&mut self, value: i32) {} } },
    "step attributes need"
)]
#[case::excluded_with_marker(
    parse_quote! { impl Fixture { #[not_a_step] #[with_args(1)] fn given_x(&mut self, v: i32) {} } },
    "cannot be combined"
)]
#[case::impl_trait_param(
    parse_quote! { impl Fixture { #[with_args("a")] fn given_x(&mut self, v: impl Into<String>) {} } },
    "`impl Trait` parameters"
)]
#[case::duplicate_title(
    parse_quote! { impl Fixture { #[step_title("a")] #[step_title("b")] fn given_x(&mut self) {} } },
    "duplicate #[step_title]"
)]
fn invalid_methods_are_rejected(#[case] item: ItemImpl, #[case] message: &str) -> Result<()> {
    let err = expand_err(quote! {}, item)?;
    ensure!(err.contains(message), "unexpected error: {err}");
    Ok(())
}

#[rstest]
fn step_argument_renders_variants_by_name() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        #[derive(Clone)]
        enum Colour {
            Red,
            Green,
        }
    };
    let tokens = derive(input).map_err(|err| anyhow!("derive failed: {err}"))?;
    let expected = quote! {
        impl bddify::StepArgument for Colour {
            fn render(&self) -> ::std::string::String {
                match *self {
                    Self::Red => ::std::string::String::from("Red"),
                    Self::Green => ::std::string::String::from("Green"),
                }
            }
        }
    };
    ensure!(
        tokens.to_string() == expected.to_string(),
        "generated tokens differ: {tokens} != {expected}"
    );
    Ok(())
}

#[rstest]
#[case::data_variant(
    parse_quote! { enum Shape { Circle(f64) } },
    "variants carry no data"
)]
#[case::structure(parse_quote! { struct Point { x: i32 } }, "only be derived for enums")]
#[case::unknown_option(
    parse_quote! { #[bddify(rename = "x")] enum E { A } },
    "unsupported bddify option"
)]
fn step_argument_rejects_unsupported_inputs(
    #[case] input: DeriveInput,
    #[case] message: &str,
) -> Result<()> {
    let err = derive(input)
        .err()
        .map(|err| err.to_string())
        .ok_or_else(|| anyhow!("expected an error"))?;
    ensure!(err.contains(message), "unexpected error: {err}");
    Ok(())
}
