//! The path generated code uses to reach the `bddify` runtime.
//!
//! Defaults to `bddify`. A `crate = "..."` option overrides it when the
//! runtime is renamed or re-exported.

use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::LitStr;
use syn::meta::ParseNestedMeta;

/// Runtime crate path selected by an optional `crate = "..."` option.
#[derive(Default)]
pub(crate) struct RuntimePath(Option<syn::Path>);

impl RuntimePath {
    /// Reads the value of a `crate = "..."` option. The option may appear
    /// once per attribute.
    pub(crate) fn set_from(&mut self, meta: &ParseNestedMeta<'_>) -> syn::Result<()> {
        let lit: LitStr = meta.value()?.parse()?;
        if self.0.is_some() {
            return Err(meta.error("duplicate crate option"));
        }
        let path = lit
            .parse::<syn::Path>()
            .map_err(|err| syn::Error::new(lit.span(), format!("invalid crate path: {err}")))?;
        self.0 = Some(path);
        Ok(())
    }

    /// Tokens prefixing every runtime item in generated code.
    pub(crate) fn tokens(&self) -> TokenStream {
        self.0
            .as_ref()
            .map_or_else(|| quote! { bddify }, ToTokens::to_token_stream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, ensure};
    use rstest::rstest;
    use syn::parse::Parser;

    fn read(tokens: TokenStream) -> syn::Result<RuntimePath> {
        let mut path = RuntimePath::default();
        syn::meta::parser(|meta| {
            if meta.path.is_ident("crate") {
                path.set_from(&meta)
            } else {
                Err(meta.error("unexpected option"))
            }
        })
        .parse2(tokens)?;
        Ok(path)
    }

    #[rstest]
    #[case::absent(quote! {}, "bddify")]
    #[case::renamed(quote! { crate = "bdd" }, "bdd")]
    #[case::re_exported(quote! { crate = "harness::bddify" }, "harness :: bddify")]
    fn selects_runtime_tokens(#[case] option: TokenStream, #[case] expected: &str) -> Result<()> {
        let tokens = read(option)?.tokens().to_string();
        ensure!(tokens == expected, "unexpected tokens: {tokens}");
        Ok(())
    }

    #[rstest]
    #[case::not_a_path(quote! { crate = "not a path" }, "invalid crate path")]
    #[case::repeated(quote! { crate = "one", crate = "two" }, "duplicate crate option")]
    fn rejects_bad_options(#[case] option: TokenStream, #[case] expected: &str) -> Result<()> {
        let message = read(option).err().map(|err| err.to_string()).unwrap_or_default();
        ensure!(message.starts_with(expected), "unexpected error: {message}");
        Ok(())
    }
}
