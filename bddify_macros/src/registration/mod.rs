//! Expansion of the `#[steps]` attribute.
//!
//! The annotated `impl` block is re-emitted with helper attributes removed,
//! followed by a `ConventionSteps` implementation listing its step methods.

mod generate;
mod parse;

use proc_macro2::TokenStream;
use quote::quote;
use syn::{ImplItem, ItemImpl};


/// Expands `#[steps(attr)] item`.
pub(crate) fn expand(attr: TokenStream, mut item: ItemImpl) -> syn::Result<TokenStream> {
    let args = parse::parse_args(attr)?;
    if let Some((_, path, _)) = &item.trait_ {
        return Err(syn::Error::new_spanned(
            path,
            "#[steps] applies to inherent impl blocks, not trait implementations",
        ));
    }
    let krate = args.crate_path.tokens();

    let mut steps = Vec::new();
    let mut error: Option<syn::Error> = None;
    for impl_item in &mut item.items {
        let ImplItem::Fn(method) = impl_item else {
            continue;
        };
        match parse::step_fn(method) {
            Ok(Some(step)) => steps.push(step),
            Ok(None) => {}
            Err(err) => match error.as_mut() {
                Some(existing) => existing.combine(err),
                None => error = Some(err),
            },
        }
    }
    if let Some(err) = error {
        return Err(err);
    }

    let narrative = generate::narrative(&krate, &args)?;
    let registration = generate::convention_impl(&krate, &item, &steps, narrative.as_ref());
    Ok(quote! {
        #item
        #registration
    })
}
