//! Token generation for `ConventionSteps` implementations.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::ItemImpl;

use super::parse::{StepFn, StepsArgs};

/// Builds the `narrative` override when the narrative options are present.
pub(crate) fn narrative(krate: &TokenStream, args: &StepsArgs) -> syn::Result<Option<TokenStream>> {
    match (&args.as_a, &args.i_want, &args.so_that) {
        (None, None, None) => Ok(None),
        (Some(as_a), Some(i_want), Some(so_that)) => Ok(Some(quote! {
            fn narrative() -> ::core::option::Option<#krate::Narrative> {
                ::core::option::Option::Some(#krate::Narrative::new(#as_a, #i_want, #so_that))
            }
        })),
        _ => Err(syn::Error::new(
            Span::call_site(),
            "as_a, i_want, and so_that must be given together",
        )),
    }
}

/// Builds the `StepMethod` registration for one method.
pub(crate) fn step_method(krate: &TokenStream, step: &StepFn) -> TokenStream {
    let ident = &step.ident;
    let name = ident.to_string();
    let parameters = step.params.iter().map(|param| {
        let param_name = &param.name;
        let ty = &param.ty;
        quote! { .parameter(#krate::Parameter::of::<#ty>(#param_name)) }
    });
    let markers = step.markers.iter().map(|marker| {
        let values = marker.iter().enumerate().map(|(index, value)| {
            step.params.get(index).map_or_else(
                || quote! { #krate::ArgumentSnapshot::literal(#value) },
                |param| {
                    let ty = &param.ty;
                    quote! { #krate::ArgumentSnapshot::literal::<#ty>(#value) }
                },
            )
        });
        quote! { .with_args(::std::vec![#(#values),*]) }
    });
    let title = step.title.as_ref().map(|title| quote! { .titled(#title) });
    let arguments = if step.params.is_empty() {
        quote! { _ }
    } else {
        quote! { arguments }
    };
    let bound = (0..step.params.len()).map(|position| {
        quote! { #krate::__private::bind(arguments, #position)? }
    });
    quote! {
        #krate::StepMethod::<Self>::new(
            #name,
            |target: &mut Self, #arguments: &[#krate::ArgumentSnapshot]| {
                #krate::IntoStepOutcome::into_step_outcome(Self::#ident(target #(, #bound)*))
            },
        )
        #(#parameters)*
        #(#markers)*
        #title
    }
}

/// Builds `impl ConventionSteps` for the annotated block's self type.
pub(crate) fn convention_impl(
    krate: &TokenStream,
    item: &ItemImpl,
    steps: &[StepFn],
    narrative: Option<&TokenStream>,
) -> TokenStream {
    let self_ty = &item.self_ty;
    let (impl_generics, _, where_clause) = item.generics.split_for_impl();
    let methods = steps.iter().map(|step| step_method(krate, step));
    quote! {
        impl #impl_generics #krate::ConventionSteps for #self_ty #where_clause {
            fn step_methods() -> ::std::vec::Vec<#krate::StepMethod<Self>> {
                ::std::vec![#(#methods),*]
            }

            #narrative
        }
    }
}
