mod args;
use args::TestArgs;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Error, ItemFn, ReturnType, parse_macro_input};

/// Marks a function as a test whose producer threads must not leak.
///
/// The body runs inside `yielder::testing::leak_checked`, which fails the
/// test if a producer thread started by the body is still alive when it
/// returns. Use `#[yielder::test(leak_check = false)]` for a plain test.
#[proc_macro_attribute]
pub fn test(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as TestArgs);
    let input = parse_macro_input!(item as ItemFn);

    let attrs = &input.attrs;
    let vis = &input.vis;
    let sig = &input.sig;
    let block = &input.block;

    if let Some(asyncness) = sig.asyncness {
        return Error::new_spanned(
            asyncness,
            "#[yielder::test] cannot be used on an async function",
        )
        .to_compile_error()
        .into();
    }

    if !sig.inputs.is_empty() {
        return Error::new_spanned(
            &sig.inputs,
            "#[yielder::test] functions cannot take arguments",
        )
        .to_compile_error()
        .into();
    }

    let body: TokenStream2 = if args.leak_check {
        match &sig.output {
            ReturnType::Default => quote! { ::yielder::testing::leak_checked(move || #block) },
            ReturnType::Type(_, ty) => {
                quote! { ::yielder::testing::leak_checked(move || -> #ty #block) }
            }
        }
    } else {
        quote! { #block }
    };

    quote! {
        #[::core::prelude::v1::test]
        #(#attrs)*
        #vis #sig {
            #body
        }
    }
    .into()
}
