//! Generates `StepArgument` implementations for unit enums.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields};

use crate::crate_path::RuntimePath;

/// Extract `crate = "..."` from `#[bddify(...)]` attributes.
fn parse_crate_path(attrs: &[syn::Attribute]) -> syn::Result<RuntimePath> {
    let mut crate_path = RuntimePath::default();
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("bddify")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("crate") {
                return crate_path.set_from(&meta);
            }
            Err(meta.error("unsupported bddify option"))
        })?;
    }
    Ok(crate_path)
}

/// Build the `StepArgument` implementation for the input enum.
pub(crate) fn derive(input: DeriveInput) -> syn::Result<TokenStream> {
    let krate = parse_crate_path(&input.attrs)?.tokens();

    let ident = input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Data::Enum(data) = input.data else {
        return Err(syn::Error::new_spanned(
            ident,
            "StepArgument can only be derived for enums; implement it by hand for other types",
        ));
    };

    let mut arms = Vec::with_capacity(data.variants.len());
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                &variant.ident,
                "StepArgument can only be derived for enums whose variants carry no data",
            ));
        }
        let variant_ident = &variant.ident;
        let label = variant_ident.to_string();
        arms.push(quote! { Self::#variant_ident => ::std::string::String::from(#label), });
    }

    Ok(quote! {
        impl #impl_generics #krate::StepArgument for #ident #ty_generics #where_clause {
            fn render(&self) -> ::std::string::String {
                match *self {
                    #(#arms)*
                }
            }
        }
    })
}
