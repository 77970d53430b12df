//! Parsing for `#[steps]` options and the helper attributes on methods.

use heck::ToSnakeCase;
use proc_macro2::{Span, TokenStream};
use syn::parse::Parser;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Attribute, Expr, FnArg, Ident, ImplItemFn, LitStr, Pat, Token, Type};

use crate::crate_path::RuntimePath;

const ROLE_KEYWORDS: [&str; 4] = ["given", "when", "then", "and"];

/// Options accepted by `#[steps(...)]`.
#[derive(Default)]
pub(crate) struct StepsArgs {
    pub crate_path: RuntimePath,
    pub as_a: Option<LitStr>,
    pub i_want: Option<LitStr>,
    pub so_that: Option<LitStr>,
}

/// A method registered as a convention step.
pub(crate) struct StepFn {
    pub ident: Ident,
    pub params: Vec<Param>,
    pub markers: Vec<Vec<Expr>>,
    pub title: Option<LitStr>,
}

/// One typed parameter of a step method, excluding the receiver.
pub(crate) struct Param {
    pub name: String,
    pub ty: Type,
}

/// Helper attributes found on a method.
#[derive(Default)]
struct HelperAttrs {
    markers: Vec<Vec<Expr>>,
    title: Option<LitStr>,
    excluded: bool,
    span: Option<Span>,
}

impl HelperAttrs {
    fn declares_step_data(&self) -> bool {
        !self.markers.is_empty() || self.title.is_some()
    }
}

pub(crate) fn parse_args(tokens: TokenStream) -> syn::Result<StepsArgs> {
    let mut args = StepsArgs::default();
    let parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("crate") {
            args.crate_path.set_from(&meta)?;
        } else if meta.path.is_ident("as_a") {
            args.as_a = Some(meta.value()?.parse()?);
        } else if meta.path.is_ident("i_want") {
            args.i_want = Some(meta.value()?.parse()?);
        } else if meta.path.is_ident("so_that") {
            args.so_that = Some(meta.value()?.parse()?);
        } else {
            return Err(meta.error("unsupported steps option"));
        }
        Ok(())
    });
    parser.parse2(tokens)?;
    Ok(args)
}

/// Whether `name` starts with a role keyword, using the same word split as
/// the runtime scanner.
pub(crate) fn has_role_prefix(name: &str) -> bool {
    name.to_snake_case()
        .split('_')
        .find(|word| !word.is_empty())
        .is_some_and(|word| ROLE_KEYWORDS.contains(&word))
}

/// Strips helper attributes from `method` and describes it as a step.
///
/// Returns `Ok(None)` for methods that are not steps: names without a role
/// keyword, associated functions, by-value receivers, and generic or async
/// methods. Helper attributes on such methods are an error.
pub(crate) fn step_fn(method: &mut ImplItemFn) -> syn::Result<Option<StepFn>> {
    let helpers = take_helper_attrs(&mut method.attrs)?;
    let span = helpers.span.unwrap_or_else(|| method.sig.ident.span());
    if helpers.excluded {
        if helpers.declares_step_data() {
            return Err(syn::Error::new(
                span,
                "#[not_a_step] cannot be combined with #[with_args] or #[step_title]",
            ));
        }
        return Ok(None);
    }

    let sig = &method.sig;
    let registrable = has_role_prefix(&sig.ident.to_string())
        && sig
            .receiver()
            .is_some_and(|receiver| receiver.reference.is_some())
        && sig.generics.params.is_empty()
        && sig.asyncness.is_none();
    if !registrable {
        if helpers.declares_step_data() {
            return Err(syn::Error::new(
                span,
                "step attributes need a non-generic method taking `&self` or `&mut self` \
                 whose name starts with given, when, then, or and",
            ));
        }
        return Ok(None);
    }

    let params = sig
        .inputs
        .iter()
        .filter_map(|input| match input {
            FnArg::Typed(pat_type) => Some(pat_type),
            FnArg::Receiver(_) => None,
        })
        .enumerate()
        .map(|(index, pat_type)| {
            if let Type::ImplTrait(impl_trait) = pat_type.ty.as_ref() {
                return Err(syn::Error::new_spanned(
                    impl_trait,
                    "`impl Trait` parameters cannot be bound from #[with_args]; use a concrete type",
                ));
            }
            let name = match pat_type.pat.as_ref() {
                Pat::Ident(pat) => pat.ident.to_string(),
                _ => format!("arg{index}"),
            };
            Ok(Param {
                name,
                ty: pat_type.ty.as_ref().clone(),
            })
        })
        .collect::<syn::Result<Vec<_>>>()?;

    Ok(Some(StepFn {
        ident: sig.ident.clone(),
        params,
        markers: helpers.markers,
        title: helpers.title,
    }))
}

fn take_helper_attrs(attrs: &mut Vec<Attribute>) -> syn::Result<HelperAttrs> {
    let mut helpers = HelperAttrs::default();
    let mut kept = Vec::with_capacity(attrs.len());
    for attr in attrs.drain(..) {
        let path = attr.path();
        if path.is_ident("with_args") {
            let values = attr.parse_args_with(Punctuated::<Expr, Token![,]>::parse_terminated)?;
            helpers.markers.push(values.into_iter().collect());
        } else if path.is_ident("step_title") {
            if helpers.title.is_some() {
                return Err(syn::Error::new_spanned(attr, "duplicate #[step_title]"));
            }
            helpers.title = Some(attr.parse_args::<LitStr>()?);
        } else if path.is_ident("not_a_step") {
            attr.meta.require_path_only()?;
            helpers.excluded = true;
        } else {
            kept.push(attr);
            continue;
        }
        helpers.span.get_or_insert(attr.span());
    }
    *attrs = kept;
    Ok(helpers)
}
